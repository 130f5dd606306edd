//! Register of leave with wages for a calendar year.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::config::LeaveRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceStatus, LeaveRegister, LeaveRegisterEntry, LeaveRequest,
    LeaveStatus, PayrollEmployee,
};

use super::rounding::round_whole;

/// Department label used when the register covers everyone.
pub const ALL_DEPARTMENTS: &str = "All Departments";

/// Normal daily rate of wages: `round(basic / divisor)`.
///
/// A missing or zero basic falls back to the configured default.
pub fn leave_daily_rate(basic_salary: Option<Decimal>, rules: &LeaveRules) -> Decimal {
    let basic = basic_salary
        .filter(|b| !b.is_zero())
        .unwrap_or(rules.default_basic_salary);
    round_whole(basic / Decimal::from(rules.wage_divisor_days))
}

/// Builds one employee's register row for `year`.
///
/// Only approved leave requests that start within the year count, for their
/// full inclusive length. Day totals saturate at `u32::MAX`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the leave wages overflow.
pub fn calculate_leave_register_entry(
    serial_number: u32,
    employee: &PayrollEmployee,
    year: i32,
    records: &[AttendanceRecord],
    leave_requests: &[LeaveRequest],
    rules: &LeaveRules,
) -> EngineResult<LeaveRegisterEntry> {
    let in_year: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee.id && r.date.year() == year)
        .collect();
    let days_worked = in_year
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count() as u32;
    let layoff_days = in_year
        .iter()
        .filter(|r| r.status == AttendanceStatus::Layoff)
        .count() as u32;

    let (maternity_leave_days, leave_enjoyed) = leave_requests
        .iter()
        .filter(|l| {
            l.employee_id == employee.id
                && l.status == LeaveStatus::Approved
                && l.start_date.year() == year
        })
        .fold((0u32, 0u32), |(maternity, enjoyed), l| {
            if l.is_maternity() {
                (maternity.saturating_add(l.day_count()), enjoyed)
            } else {
                (maternity, enjoyed.saturating_add(l.day_count()))
            }
        });

    let previous_balance = 0;
    let earned_leave = days_worked / rules.days_per_earned_leave;
    let total_leave = previous_balance + earned_leave;
    let daily_rate = leave_daily_rate(employee.basic_salary, rules);
    let leave_wages = daily_rate
        .checked_mul(Decimal::from(leave_enjoyed))
        .ok_or_else(|| {
            EngineError::invalid_input(
                format!("employees[{}].basic_salary", employee.id),
                format!(
                    "leave wages overflow at a daily rate of {} for {} days",
                    daily_rate, leave_enjoyed
                ),
            )
        })?;

    Ok(LeaveRegisterEntry {
        serial_number,
        employee_code: employee.display_code(),
        employee_name: employee.display_name(),
        join_date: employee.join_date,
        years_of_service: employee
            .join_date
            .map(|joined| year - joined.year())
            .unwrap_or(0),
        days_worked,
        layoff_days,
        maternity_leave_days,
        leave_enjoyed,
        total_days: days_worked
            .saturating_add(layoff_days)
            .saturating_add(maternity_leave_days)
            .saturating_add(leave_enjoyed),
        previous_balance,
        earned_leave,
        total_leave,
        balance_leave: i64::from(total_leave) - i64::from(leave_enjoyed),
        daily_rate,
        leave_wages,
    })
}

/// Builds the register for every employee, numbered from 1 in input order.
///
/// # Errors
///
/// Propagates the first failing entry from [`calculate_leave_register_entry`].
///
/// # Example
///
/// ```
/// use ctc_engine::calculation::build_leave_register;
/// use ctc_engine::config::StatutoryConfig;
///
/// let config = StatutoryConfig::fy2025_26();
/// let register =
///     build_leave_register("Acme Works", None, 2026, &[], &[], &[], &config.rates().leave)
///         .unwrap();
/// assert_eq!(register.department, "All Departments");
/// assert!(register.entries.is_empty());
/// ```
pub fn build_leave_register(
    establishment: &str,
    department: Option<&str>,
    year: i32,
    employees: &[PayrollEmployee],
    records: &[AttendanceRecord],
    leave_requests: &[LeaveRequest],
    rules: &LeaveRules,
) -> EngineResult<LeaveRegister> {
    let entries = employees
        .iter()
        .zip(1u32..)
        .map(|(employee, serial)| {
            calculate_leave_register_entry(serial, employee, year, records, leave_requests, rules)
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(LeaveRegister {
        establishment: establishment.to_string(),
        department: department.unwrap_or(ALL_DEPARTMENTS).to_string(),
        year,
        entries,
    })
}
