//! Configuration types for statutory and salary-structure rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ComponentPercentages, TaxRegime};

/// Largest `max_gross_pay` a rule set may configure.
const MAX_GROSS_PAY_LIMIT: u64 = 1_000_000_000_000_000;

/// Metadata describing the statutory rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Short code for the rule set (e.g., "IN-FY2025-26").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The financial year the rates apply to (e.g., "2025-26").
    pub financial_year: String,
    /// ISO currency code used for display purposes only.
    pub currency: String,
}

/// Provident-fund style retirement contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementConfig {
    /// Employee share as a fraction of basic pay (e.g., 0.12).
    pub employee_rate: Decimal,
    /// Employer share used by the payroll test run (e.g., 0.13).
    pub employer_rate: Decimal,
    /// Basic-pay ceiling the payroll test run applies the rates to.
    pub wage_ceiling: Decimal,
    /// Maximum monthly employee contribution in the CTC calculator.
    pub monthly_ceiling: Decimal,
}

/// Health-insurance style contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInsuranceConfig {
    /// Employee share as a fraction of gross pay.
    pub employee_rate: Decimal,
    /// Employer share as a fraction of gross pay.
    pub employer_rate: Decimal,
    /// Monthly gross above which no contribution is due.
    pub gross_ceiling: Decimal,
}

/// Rules used by the statutory leave register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRules {
    /// Days of work performed per day of leave earned.
    pub days_per_earned_leave: u32,
    /// Divisor turning a monthly basic into a daily leave-wage rate.
    pub wage_divisor_days: u32,
    /// Basic salary assumed when an employee record has none.
    pub default_basic_salary: Decimal,
}

/// Flat fees and rates from `statutory.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Retirement contribution rules.
    pub retirement: RetirementConfig,
    /// Health-insurance contribution rules.
    pub health_insurance: HealthInsuranceConfig,
    /// Monthly professional tax when applicable.
    pub professional_tax: Decimal,
    /// Monthly labour welfare fund deduction when applicable.
    pub labour_welfare_fund: Decimal,
    /// Default bonus percentage of basic for the payroll test run.
    pub default_bonus_percentage: Decimal,
    /// Fixed day count monthly pay is pro-rated over.
    pub prorate_divisor_days: u32,
    /// Leave register rules.
    pub leave: LeaveRules,
}

/// The statutory file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryFile {
    /// Rule set metadata.
    pub metadata: ConfigMetadata,
    /// Statutory rates.
    pub rates: StatutoryRates,
}

/// How the payroll test run splits a pro-rated gross.
///
/// Basic is a percentage of gross; the allowances are percentages of basic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunSplit {
    /// Basic pay as a percentage of gross.
    pub basic_of_gross: Decimal,
    /// HRA as a percentage of basic.
    pub hra_of_basic: Decimal,
    /// DA as a percentage of basic.
    pub da_of_basic: Decimal,
    /// Other allowances as a percentage of basic.
    pub other_of_basic: Decimal,
}

/// Salary structure defaults from `salary_structure.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Default component split for the CTC calculator.
    pub ctc_defaults: ComponentPercentages,
    /// Total allocation above which input is rejected outright.
    pub max_allocation_percentage: Decimal,
    /// Largest gross pay or monthly CTC accepted as input.
    pub max_gross_pay: Decimal,
    /// Split used by the payroll test run.
    pub test_run: TestRunSplit,
}

/// A single bracket: income above `lower_bound` is taxed at `rate` until the
/// next bracket's lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (exclusive of income below it).
    pub lower_bound: Decimal,
    /// Marginal rate in `[0, 1)`.
    pub rate: Decimal,
}

/// An ordered, validated sequence of tax brackets.
///
/// Bounds are strictly increasing and non-negative; rates lie in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxBracketTable {
    pub(super) brackets: Vec<TaxBracket>,
}

impl TaxBracketTable {
    /// Builds a table, rejecting unsorted bounds or out-of-range rates.
    ///
    /// # Example
    ///
    /// ```
    /// use ctc_engine::config::{TaxBracket, TaxBracketTable};
    /// use rust_decimal_macros::dec;
    ///
    /// let table = TaxBracketTable::new(vec![
    ///     TaxBracket { lower_bound: dec!(0), rate: dec!(0) },
    ///     TaxBracket { lower_bound: dec!(250000), rate: dec!(0.05) },
    /// ]);
    /// assert!(table.is_ok());
    ///
    /// let unsorted = TaxBracketTable::new(vec![
    ///     TaxBracket { lower_bound: dec!(250000), rate: dec!(0.05) },
    ///     TaxBracket { lower_bound: dec!(0), rate: dec!(0) },
    /// ]);
    /// assert!(unsorted.is_err());
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        if brackets.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "tax bracket table must not be empty".to_string(),
            });
        }

        for bracket in &brackets {
            if bracket.lower_bound < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "tax bracket lower bound {} must not be negative",
                        bracket.lower_bound
                    ),
                });
            }
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    message: format!("tax bracket rate {} must be in [0, 1)", bracket.rate),
                });
            }
        }

        if let Some(pair) = brackets
            .windows(2)
            .find(|pair| pair[0].lower_bound >= pair[1].lower_bound)
        {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "tax bracket bounds must be strictly increasing ({} then {})",
                    pair[0].lower_bound, pair[1].lower_bound
                ),
            });
        }

        Ok(Self { brackets })
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxBracketTable {
    type Error = EngineError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxBracketTable> for Vec<TaxBracket> {
    fn from(table: TaxBracketTable) -> Self {
        table.brackets
    }
}

/// Itemised deduction estimate: `min(retirement + base_amount, cap)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemisedDeductionRule {
    /// Amount added to the annual retirement contribution.
    pub base_amount: Decimal,
    /// Upper limit of the deduction.
    pub cap: Decimal,
}

/// Everything needed to compute income tax under one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegimeSchedule {
    /// Which regime this schedule describes.
    pub regime: TaxRegime,
    /// Flat deduction from annual income.
    pub standard_deduction: Decimal,
    /// Taxable income at or below which no tax is due.
    pub rebate_threshold: Decimal,
    /// Surcharge applied on top of slab tax (e.g., 0.04).
    pub cess_rate: Decimal,
    /// Itemised deduction estimate, if the regime allows one.
    #[serde(default)]
    pub itemised_deduction: Option<ItemisedDeductionRule>,
    /// Progressive bracket table.
    pub brackets: TaxBracketTable,
}

/// The complete statutory configuration.
///
/// Aggregates the metadata, statutory rates, salary structure and the two
/// tax regime schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatutoryConfig {
    pub(super) metadata: ConfigMetadata,
    pub(super) rates: StatutoryRates,
    pub(super) structure: SalaryStructure,
    pub(super) new_regime: TaxRegimeSchedule,
    pub(super) old_regime: TaxRegimeSchedule,
}

impl StatutoryConfig {
    /// Creates a configuration from its component parts.
    pub fn new(
        metadata: ConfigMetadata,
        rates: StatutoryRates,
        structure: SalaryStructure,
        new_regime: TaxRegimeSchedule,
        old_regime: TaxRegimeSchedule,
    ) -> EngineResult<Self> {
        if new_regime.regime != TaxRegime::New || old_regime.regime != TaxRegime::Old {
            return Err(EngineError::InvalidConfig {
                message: "regime schedules are assigned to the wrong regime".to_string(),
            });
        }
        if rates.prorate_divisor_days == 0 || rates.leave.wage_divisor_days == 0 {
            return Err(EngineError::InvalidConfig {
                message: "day divisors must be greater than zero".to_string(),
            });
        }
        if rates.leave.days_per_earned_leave == 0 {
            return Err(EngineError::InvalidConfig {
                message: "days_per_earned_leave must be greater than zero".to_string(),
            });
        }
        if structure.max_gross_pay <= Decimal::ZERO
            || structure.max_gross_pay > Decimal::from(MAX_GROSS_PAY_LIMIT)
        {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "max_gross_pay must be positive and at most {}",
                    MAX_GROSS_PAY_LIMIT
                ),
            });
        }

        Ok(Self {
            metadata,
            rates,
            structure,
            new_regime,
            old_regime,
        })
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &ConfigMetadata {
        &self.metadata
    }

    /// Returns the statutory rates.
    pub fn rates(&self) -> &StatutoryRates {
        &self.rates
    }

    /// Returns the salary structure defaults.
    pub fn structure(&self) -> &SalaryStructure {
        &self.structure
    }

    /// Returns the schedule for the given regime.
    pub fn regime(&self, regime: TaxRegime) -> &TaxRegimeSchedule {
        match regime {
            TaxRegime::New => &self.new_regime,
            TaxRegime::Old => &self.old_regime,
        }
    }
}
