//! Request types for the compensation engine API.
//!
//! This module defines the JSON request bodies for `/ctc`, `/test-run` and
//! `/leave-register`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendanceRecord, CompensationInput, ComponentPercentages, DateRangePreset, LeaveRequest,
    PayFrequency, PayrollEmployee, StatutoryFlags, TaxRegime,
};

/// Request body for the `/ctc` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtcRequest {
    /// Gross pay as entered.
    pub gross_pay: Decimal,
    /// Whether `gross_pay` is monthly or annual.
    #[serde(default)]
    pub pay_frequency: PayFrequency,
    /// Component split; the configured defaults when omitted.
    #[serde(default)]
    pub percentages: Option<ComponentPercentages>,
    /// Applicable statutory deductions.
    #[serde(default)]
    pub flags: StatutoryFlags,
    /// Selected tax regime.
    #[serde(default)]
    pub regime: TaxRegime,
}

impl CtcRequest {
    /// Converts the request into a calculator input.
    pub fn into_input(self, default_percentages: &ComponentPercentages) -> CompensationInput {
        CompensationInput {
            gross_pay: self.gross_pay,
            pay_frequency: self.pay_frequency,
            percentages: self
                .percentages
                .unwrap_or_else(|| default_percentages.clone()),
            flags: self.flags,
            regime: self.regime,
        }
    }
}

/// Request body for the `/test-run` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRunRequest {
    /// Date the presets resolve against; the server's current date if omitted.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Period to run over.
    #[serde(default)]
    pub date_range: DateRangePreset,
    /// Whether to pay the statutory bonus.
    #[serde(default)]
    pub include_bonus: bool,
    /// Bonus percentage of basic.
    #[serde(default)]
    pub bonus_percentage: Option<Decimal>,
    /// Seed for generated attendance; random when omitted.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Employees to include. Inactive employees are skipped.
    pub employees: Vec<PayrollEmployee>,
    /// Recorded attendance. Unrecorded weekdays are generated.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

/// Request body for the `/leave-register` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRegisterRequest {
    /// Calendar year.
    pub year: i32,
    /// Establishment name for the register header.
    #[serde(default = "default_establishment")]
    pub establishment: String,
    /// Department name for the register header.
    #[serde(default)]
    pub department: Option<String>,
    /// Employees to include.
    pub employees: Vec<PayrollEmployee>,
    /// Recorded attendance.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Leave requests.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
}

fn default_establishment() -> String {
    "ASN HR Consultancy & Services".to_string()
}
