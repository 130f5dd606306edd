//! Employee model for batch payroll and leave registers.
//!
//! This module defines the [`PayrollEmployee`] struct and the statutory
//! applicability flags the payroll test run reads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which statutory items apply to an employee in the payroll test run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicability {
    /// Provident-fund retirement contribution.
    #[serde(default)]
    pub pf: bool,
    /// Health-insurance contribution.
    #[serde(default)]
    pub esic: bool,
    /// Professional tax.
    #[serde(default)]
    pub pt: bool,
    /// Labour welfare fund.
    #[serde(default)]
    pub lwf: bool,
    /// Statutory bonus.
    #[serde(default)]
    pub bonus: bool,
}

/// An employee as fetched from the HR system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEmployee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Employee code shown in registers; falls back to `EMP{id}`.
    #[serde(default)]
    pub code: Option<String>,
    /// First name.
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Department name, if assigned.
    #[serde(default)]
    pub department: Option<String>,
    /// Monthly cost to company.
    #[serde(default)]
    pub monthly_ctc: Decimal,
    /// Monthly basic salary used for leave wages.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
    /// Date the employee joined.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// Whether the employee is currently active.
    #[serde(default = "active_default")]
    pub active: bool,
    /// Applicable statutory items.
    #[serde(default)]
    pub applicability: Applicability,
}

fn active_default() -> bool {
    true
}

impl PayrollEmployee {
    /// Full display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctc_engine::models::PayrollEmployee;
    ///
    /// let employee: PayrollEmployee = serde_json::from_str(
    ///     r#"{ "id": "7", "first_name": "Asha", "last_name": "Rao" }"#,
    /// ).unwrap();
    /// assert_eq!(employee.display_name(), "Asha Rao");
    /// assert_eq!(employee.display_code(), "EMP7");
    /// ```
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Employee code, or `EMP{id}` when none is recorded.
    pub fn display_code(&self) -> String {
        self.code
            .clone()
            .unwrap_or_else(|| format!("EMP{}", self.id))
    }

    /// Department name, or "Unassigned".
    pub fn department_name(&self) -> &str {
        self.department.as_deref().unwrap_or("Unassigned")
    }
}
