//! Leave request and leave register models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; counts towards the register.
    Approved,
    /// Rejected.
    Rejected,
}

/// A leave request as fetched from the HR system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The employee who requested leave.
    pub employee_id: String,
    /// Free-form leave type; "maternity" is treated separately.
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Approval state.
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Days covered, counting both ends. Zero if the dates are reversed.
    pub fn day_count(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        days.max(0) as u32
    }

    /// Returns true for maternity leave.
    pub fn is_maternity(&self) -> bool {
        self.leave_type.eq_ignore_ascii_case("maternity")
    }
}

/// One row of the register of leave with wages for a calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRegisterEntry {
    /// Row number, starting at 1.
    pub serial_number: u32,
    /// Employee code.
    pub employee_code: String,
    /// Employee name.
    pub employee_name: String,
    /// Date of entry into service.
    pub join_date: Option<NaiveDate>,
    /// Calendar year minus joining year.
    pub years_of_service: i32,
    /// Days of work performed.
    pub days_worked: u32,
    /// Days of lay-off.
    pub layoff_days: u32,
    /// Days of maternity leave with wages.
    pub maternity_leave_days: u32,
    /// Days of leave with wages enjoyed.
    pub leave_enjoyed: u32,
    /// Sum of the four day counts above.
    pub total_days: u32,
    /// Balance carried from the preceding year.
    pub previous_balance: u32,
    /// Leave earned during the year.
    pub earned_leave: u32,
    /// Previous balance plus earned leave.
    pub total_leave: u32,
    /// Total leave minus leave enjoyed; negative when overdrawn.
    pub balance_leave: i64,
    /// Normal daily rate of wages.
    pub daily_rate: Decimal,
    /// Wages paid for leave enjoyed.
    pub leave_wages: Decimal,
}

/// The register of leave with wages for a calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRegister {
    /// Establishment name printed in the header.
    pub establishment: String,
    /// Department name printed in the header.
    pub department: String,
    /// Calendar year.
    pub year: i32,
    /// One entry per employee.
    pub entries: Vec<LeaveRegisterEntry>,
}
