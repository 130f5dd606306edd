//! Payroll test run.
//!
//! Computes a simulated payroll for a population of employees over a date
//! range: attendance is recorded or generated per employee, monthly CTC is
//! pro-rated by days worked, and the gross is split and run through the
//! statutory deductions. Intermediate figures are kept unrounded; every
//! reported amount is rounded to whole units.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceDay, AttendanceRecord, AttendanceSummary, AuditWarning, DateRange, PayrollEmployee,
    PayrollTestResult, TestRunReport, TestRunSummary, WarningSeverity,
};

use super::attendance::{RandomSource, generate_attendance, prorate_gross};
use super::retirement::calculate_provident_fund;
use super::rounding::{percent_of, round_whole};
use super::salary_split::NEGATIVE_RESIDUAL_WARNING;
use super::statutory::{calculate_bonus, calculate_esic, flat_fee};

/// Run-wide options chosen on the test run screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRunOptions {
    /// Whether to pay the statutory bonus to applicable employees.
    pub include_bonus: bool,
    /// Bonus percentage of basic; the configured default when absent.
    pub bonus_percentage: Option<Decimal>,
}

/// Calculates one employee's payroll from their attendance days.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the employee's monthly CTC is
/// negative or above the configured maximum, or when the bonus percentage
/// lies outside `0..=100`.
pub fn calculate_employee_payroll(
    employee: &PayrollEmployee,
    attendance_days: Vec<AttendanceDay>,
    options: &TestRunOptions,
    config: &StatutoryConfig,
) -> EngineResult<PayrollTestResult> {
    let max_ctc = config.structure().max_gross_pay;
    if employee.monthly_ctc < Decimal::ZERO || employee.monthly_ctc > max_ctc {
        return Err(EngineError::invalid_input(
            format!("employees[{}].monthly_ctc", employee.id),
            format!(
                "must be between 0 and {} (got {})",
                max_ctc, employee.monthly_ctc
            ),
        ));
    }

    let rates = config.rates();
    let split = &config.structure().test_run;
    let applicability = &employee.applicability;
    let bonus_percentage = options
        .bonus_percentage
        .unwrap_or(rates.default_bonus_percentage);
    if bonus_percentage < Decimal::ZERO || bonus_percentage > Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid_input(
            "bonus_percentage",
            format!("must be between 0 and 100 (got {})", bonus_percentage),
        ));
    }

    let attendance = AttendanceSummary::from_days(&attendance_days);
    let gross = prorate_gross(
        employee.monthly_ctc,
        attendance.days_worked,
        rates.prorate_divisor_days,
    );

    let basic = percent_of(gross, split.basic_of_gross);
    let hra = percent_of(basic, split.hra_of_basic);
    let da = percent_of(basic, split.da_of_basic);
    let other = percent_of(basic, split.other_of_basic);
    let special = gross - (basic + hra + da + other);

    let mut warnings = Vec::new();
    if special < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: NEGATIVE_RESIDUAL_WARNING.to_string(),
            message: format!(
                "Basic and allowances exceed gross of {}; special allowance is {}",
                round_whole(gross),
                round_whole(special)
            ),
            severity: WarningSeverity::High,
        });
    }

    let pf = calculate_provident_fund(basic, applicability.pf, &rates.retirement);
    let esic = calculate_esic(gross, applicability.esic, &rates.health_insurance);
    let professional_tax = flat_fee(rates.professional_tax, applicability.pt);
    let lwf = flat_fee(rates.labour_welfare_fund, applicability.lwf);
    let bonus = calculate_bonus(
        basic,
        bonus_percentage,
        options.include_bonus && applicability.bonus,
    );

    let total_deductions = pf.employee + esic.employee + professional_tax + lwf;
    let net = gross + bonus - total_deductions;

    let gross_salary = round_whole(gross);
    let (leave_daily_rate, leave_wages) = if attendance.working_days == 0 {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let working_days = Decimal::from(attendance.working_days);
        (
            round_whole(gross_salary / working_days),
            round_whole(gross_salary * Decimal::from(attendance.leave_days) / working_days),
        )
    };

    Ok(PayrollTestResult {
        employee_id: employee.id.clone(),
        employee_name: employee.display_name(),
        employee_code: employee.display_code(),
        department: employee.department_name().to_string(),
        monthly_ctc: employee.monthly_ctc,
        attendance,
        gross_salary,
        basic_salary: round_whole(basic),
        hra: round_whole(hra),
        da: round_whole(da),
        special_allowance: round_whole(special),
        other_allowances: round_whole(other),
        epf_employee: pf.employee,
        epf_employer: pf.employer,
        esic_employee: esic.employee,
        esic_employer: esic.employer,
        professional_tax,
        lwf,
        bonus,
        total_deductions,
        net_salary: round_whole(net),
        leave_daily_rate,
        leave_wages,
        attendance_days,
        warnings,
    })
}

/// Runs a payroll test over every active employee.
///
/// Attendance for each employee is taken from `records` where present and
/// generated from `source` otherwise. Results keep the input order.
pub fn run_payroll_test<S: RandomSource + ?Sized>(
    employees: &[PayrollEmployee],
    records: &[AttendanceRecord],
    period: DateRange,
    options: &TestRunOptions,
    config: &StatutoryConfig,
    source: &mut S,
) -> EngineResult<TestRunReport> {
    let period = DateRange::new(period.start, period.end)?;
    let mut results = Vec::new();

    for employee in employees.iter().filter(|e| e.active) {
        let days = generate_attendance(&employee.id, &period, records, source);
        let result = calculate_employee_payroll(employee, days, options, config)?;

        debug!(
            employee_id = %result.employee_id,
            days_worked = %result.attendance.days_worked,
            gross = %result.gross_salary,
            net = %result.net_salary,
            "Processed test run employee"
        );

        results.push(result);
    }

    let summary: TestRunSummary = results.iter().collect();

    Ok(TestRunReport {
        period,
        results,
        summary,
    })
}
