//! Built-in statutory configuration for FY 2025-26.
//!
//! These values mirror the files shipped under `config/fy2025_26/` so the
//! calculators can run without touching the filesystem.

use rust_decimal_macros::dec;

use crate::models::{ComponentPercentages, TaxRegime};

use super::types::{
    ConfigMetadata, HealthInsuranceConfig, ItemisedDeductionRule, LeaveRules, RetirementConfig,
    SalaryStructure, StatutoryConfig, StatutoryRates, TaxBracket, TaxBracketTable,
    TaxRegimeSchedule, TestRunSplit,
};

impl StatutoryConfig {
    /// Returns the built-in FY 2025-26 rule set.
    ///
    /// # Example
    ///
    /// ```
    /// use ctc_engine::config::StatutoryConfig;
    /// use ctc_engine::models::TaxRegime;
    /// use rust_decimal_macros::dec;
    ///
    /// let config = StatutoryConfig::fy2025_26();
    /// assert_eq!(config.regime(TaxRegime::New).standard_deduction, dec!(75000));
    /// ```
    pub fn fy2025_26() -> Self {
        Self {
            metadata: ConfigMetadata {
                code: "IN-FY2025-26".to_string(),
                name: "Indian payroll statutory rules".to_string(),
                financial_year: "2025-26".to_string(),
                currency: "INR".to_string(),
            },
            rates: StatutoryRates {
                retirement: RetirementConfig {
                    employee_rate: dec!(0.12),
                    employer_rate: dec!(0.13),
                    wage_ceiling: dec!(15000),
                    monthly_ceiling: dec!(1800),
                },
                health_insurance: HealthInsuranceConfig {
                    employee_rate: dec!(0.0075),
                    employer_rate: dec!(0.0325),
                    gross_ceiling: dec!(21000),
                },
                professional_tax: dec!(200),
                labour_welfare_fund: dec!(25),
                default_bonus_percentage: dec!(8.33),
                prorate_divisor_days: 30,
                leave: LeaveRules {
                    days_per_earned_leave: 20,
                    wage_divisor_days: 26,
                    default_basic_salary: dec!(15000),
                },
            },
            structure: SalaryStructure {
                ctc_defaults: ComponentPercentages::default(),
                max_allocation_percentage: dec!(200),
                max_gross_pay: dec!(1000000000000),
                test_run: TestRunSplit {
                    basic_of_gross: dec!(50),
                    hra_of_basic: dec!(50),
                    da_of_basic: dec!(10),
                    other_of_basic: dec!(20),
                },
            },
            new_regime: TaxRegimeSchedule {
                regime: TaxRegime::New,
                standard_deduction: dec!(75000),
                rebate_threshold: dec!(1200000),
                cess_rate: dec!(0.04),
                itemised_deduction: None,
                brackets: table(&[
                    (dec!(0), dec!(0)),
                    (dec!(400000), dec!(0.05)),
                    (dec!(800000), dec!(0.10)),
                    (dec!(1200000), dec!(0.15)),
                    (dec!(1600000), dec!(0.20)),
                    (dec!(2000000), dec!(0.25)),
                    (dec!(2400000), dec!(0.30)),
                ]),
            },
            old_regime: TaxRegimeSchedule {
                regime: TaxRegime::Old,
                standard_deduction: dec!(50000),
                rebate_threshold: dec!(500000),
                cess_rate: dec!(0.04),
                itemised_deduction: Some(ItemisedDeductionRule {
                    base_amount: dec!(100000),
                    cap: dec!(150000),
                }),
                brackets: table(&[
                    (dec!(0), dec!(0)),
                    (dec!(250000), dec!(0.05)),
                    (dec!(500000), dec!(0.20)),
                    (dec!(1000000), dec!(0.30)),
                ]),
            },
        }
    }
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        Self::fy2025_26()
    }
}

// Literal tables above are sorted, so this skips validation.
fn table(pairs: &[(rust_decimal::Decimal, rust_decimal::Decimal)]) -> TaxBracketTable {
    TaxBracketTable {
        brackets: pairs
            .iter()
            .map(|&(lower_bound, rate)| TaxBracket { lower_bound, rate })
            .collect(),
    }
}
