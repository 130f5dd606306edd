//! Payroll test run result models.
//!
//! This module contains the per-employee [`PayrollTestResult`], the
//! population-level [`TestRunSummary`] and the [`TestRunReport`] that
//! bundles them with the period covered.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceDay, AttendanceSummary, AuditWarning, DateRange};

/// Payroll figures for one employee over a test run period.
///
/// Monetary figures are rounded to whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTestResult {
    /// Employee identifier.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// Employee code.
    pub employee_code: String,
    /// Department name.
    pub department: String,
    /// Monthly cost to company the gross is pro-rated from.
    pub monthly_ctc: Decimal,
    /// Attendance counts for the period.
    pub attendance: AttendanceSummary,
    /// Gross pay for days worked.
    pub gross_salary: Decimal,
    /// Basic pay.
    pub basic_salary: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Dearness allowance.
    pub da: Decimal,
    /// Residual after basic and the allowances.
    pub special_allowance: Decimal,
    /// Other allowances.
    pub other_allowances: Decimal,
    /// Employee retirement contribution.
    pub epf_employee: Decimal,
    /// Employer retirement contribution.
    pub epf_employer: Decimal,
    /// Employee health-insurance contribution.
    pub esic_employee: Decimal,
    /// Employer health-insurance contribution.
    pub esic_employer: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Labour welfare fund.
    pub lwf: Decimal,
    /// Statutory bonus.
    pub bonus: Decimal,
    /// Employee deductions.
    pub total_deductions: Decimal,
    /// Gross plus bonus minus deductions.
    pub net_salary: Decimal,
    /// Gross divided by working days; zero with no working days.
    pub leave_daily_rate: Decimal,
    /// Leave days times the leave daily rate.
    pub leave_wages: Decimal,
    /// Day-by-day attendance the figures were computed from.
    pub attendance_days: Vec<AttendanceDay>,
    /// Business warnings for this employee.
    pub warnings: Vec<AuditWarning>,
}

/// Totals across every employee in a test run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunSummary {
    /// Employees processed.
    pub total_employees: u32,
    /// Sum of gross salaries.
    pub total_gross_salary: Decimal,
    /// Sum of net salaries.
    pub total_net_salary: Decimal,
    /// Sum of employee retirement contributions.
    pub total_epf_employee: Decimal,
    /// Sum of employer retirement contributions.
    pub total_epf_employer: Decimal,
    /// Sum of employee health-insurance contributions.
    pub total_esic_employee: Decimal,
    /// Sum of employer health-insurance contributions.
    pub total_esic_employer: Decimal,
    /// Sum of professional tax.
    pub total_professional_tax: Decimal,
    /// Sum of labour welfare fund.
    pub total_lwf: Decimal,
    /// Sum of bonuses.
    pub total_bonus: Decimal,
    /// Sum of employee deductions.
    pub total_deductions: Decimal,
}

impl TestRunSummary {
    /// Adds one employee's figures to the totals.
    pub fn add(&mut self, result: &PayrollTestResult) {
        self.total_employees += 1;
        self.total_gross_salary += result.gross_salary;
        self.total_net_salary += result.net_salary;
        self.total_epf_employee += result.epf_employee;
        self.total_epf_employer += result.epf_employer;
        self.total_esic_employee += result.esic_employee;
        self.total_esic_employer += result.esic_employer;
        self.total_professional_tax += result.professional_tax;
        self.total_lwf += result.lwf;
        self.total_bonus += result.bonus;
        self.total_deductions += result.total_deductions;
    }
}

impl<'a> FromIterator<&'a PayrollTestResult> for TestRunSummary {
    fn from_iter<I: IntoIterator<Item = &'a PayrollTestResult>>(iter: I) -> Self {
        let mut summary = TestRunSummary::default();
        for result in iter {
            summary.add(result);
        }
        summary
    }
}

/// The output of a payroll test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunReport {
    /// Period the attendance covers.
    pub period: DateRange,
    /// Per-employee results in input order.
    pub results: Vec<PayrollTestResult>,
    /// Population totals.
    pub summary: TestRunSummary,
}
