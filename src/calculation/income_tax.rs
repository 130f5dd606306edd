//! Progressive income tax calculation.
//!
//! This module computes annual income tax under a [`TaxRegimeSchedule`]:
//! deductions are subtracted from annual income, a full rebate applies at or
//! below the regime's threshold, and above it each bracket's marginal rate
//! applies only to the income inside that bracket. Cess is added on top of
//! the slab tax.

use rust_decimal::Decimal;

use crate::config::{TaxBracketTable, TaxRegimeSchedule};
use crate::models::{AuditStep, BracketSlice, IncomeTaxAssessment};

use super::rounding::round_currency;

/// The result of an income tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// The full assessment.
    pub assessment: IncomeTaxAssessment,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Splits taxable income across a bracket table.
///
/// Only brackets the income reaches produce a slice. The top slice ends at
/// `taxable_income`.
pub fn bracket_slices(taxable_income: Decimal, table: &TaxBracketTable) -> Vec<BracketSlice> {
    let brackets = table.brackets();
    let mut slices = Vec::new();

    for (i, bracket) in brackets.iter().enumerate() {
        if taxable_income <= bracket.lower_bound {
            break;
        }
        let to = match brackets.get(i + 1) {
            Some(next) => taxable_income.min(next.lower_bound),
            None => taxable_income,
        };
        slices.push(BracketSlice {
            from: bracket.lower_bound,
            to,
            rate: bracket.rate,
            tax: (to - bracket.lower_bound) * bracket.rate,
        });
    }

    slices
}

/// Itemised deduction for the schedule given the annual employee retirement
/// contribution. Zero when the regime allows none.
pub fn itemised_deduction(
    annual_retirement_contribution: Decimal,
    schedule: &TaxRegimeSchedule,
) -> Decimal {
    match &schedule.itemised_deduction {
        Some(rule) => (annual_retirement_contribution + rule.base_amount).min(rule.cap),
        None => Decimal::ZERO,
    }
}

/// Annual tax on an already-reduced taxable income.
///
/// Zero at or below the rebate threshold; otherwise slab tax plus cess,
/// rounded to two places.
///
/// # Example
///
/// ```
/// use ctc_engine::calculation::tax_on_taxable_income;
/// use ctc_engine::config::StatutoryConfig;
/// use ctc_engine::models::TaxRegime;
/// use rust_decimal_macros::dec;
///
/// let config = StatutoryConfig::fy2025_26();
/// let schedule = config.regime(TaxRegime::New);
/// assert_eq!(tax_on_taxable_income(dec!(1200000), schedule), dec!(0));
/// assert_eq!(tax_on_taxable_income(dec!(2325000), schedule), dec!(292500));
/// ```
pub fn tax_on_taxable_income(taxable_income: Decimal, schedule: &TaxRegimeSchedule) -> Decimal {
    if taxable_income <= schedule.rebate_threshold {
        return Decimal::ZERO;
    }
    let slab_tax: Decimal = bracket_slices(taxable_income, &schedule.brackets)
        .iter()
        .map(|s| s.tax)
        .sum();
    round_currency(slab_tax + slab_tax * schedule.cess_rate)
}

/// Calculates income tax on annual income under a regime.
///
/// `annual_retirement_contribution` is the employee's annual retirement
/// contribution. It only matters for regimes with an itemised deduction and
/// is passed in explicitly rather than derived from any other regime's
/// computation.
///
/// # Arguments
///
/// * `annual_income` - Gross annual income before deductions
/// * `annual_retirement_contribution` - Basis for the itemised deduction
/// * `schedule` - The regime's deductions, threshold, brackets and cess
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use ctc_engine::calculation::calculate_income_tax;
/// use ctc_engine::config::StatutoryConfig;
/// use ctc_engine::models::TaxRegime;
/// use rust_decimal_macros::dec;
///
/// let config = StatutoryConfig::fy2025_26();
/// let result = calculate_income_tax(dec!(2400000), dec!(21600), config.regime(TaxRegime::New), 1);
/// assert_eq!(result.assessment.taxable_income, dec!(2325000));
/// assert_eq!(result.assessment.slab_tax, dec!(281250));
/// assert_eq!(result.assessment.monthly_tax, dec!(24375));
/// ```
pub fn calculate_income_tax(
    annual_income: Decimal,
    annual_retirement_contribution: Decimal,
    schedule: &TaxRegimeSchedule,
    step_number: u32,
) -> IncomeTaxResult {
    let itemised = itemised_deduction(annual_retirement_contribution, schedule);
    let taxable_income =
        (annual_income - schedule.standard_deduction - itemised).max(Decimal::ZERO);
    let rebate_applied = taxable_income <= schedule.rebate_threshold;

    let slices = if rebate_applied {
        Vec::new()
    } else {
        bracket_slices(taxable_income, &schedule.brackets)
    };
    let slab_tax: Decimal = slices.iter().map(|s| s.tax).sum();
    let cess = slab_tax * schedule.cess_rate;
    let annual_tax = round_currency(slab_tax + cess);
    let monthly_tax = round_currency(annual_tax / Decimal::from(12));

    let reasoning = if rebate_applied {
        format!(
            "{} regime: taxable income {} is within the rebate threshold {}, no tax due",
            schedule.regime,
            taxable_income.normalize(),
            schedule.rebate_threshold.normalize()
        )
    } else {
        let parts: Vec<String> = slices
            .iter()
            .filter(|s| !s.tax.is_zero())
            .map(|s| s.tax.normalize().to_string())
            .collect();
        format!(
            "{} regime: slab tax {} = {}; plus cess {} = {} annual, {} monthly",
            schedule.regime,
            parts.join(" + "),
            slab_tax.normalize(),
            schedule.cess_rate.normalize(),
            annual_tax.normalize(),
            monthly_tax.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        input: serde_json::json!({
            "regime": schedule.regime,
            "annual_income": annual_income.normalize().to_string(),
            "standard_deduction": schedule.standard_deduction.normalize().to_string(),
            "itemised_deduction": itemised.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "rebate_applied": rebate_applied,
            "slab_tax": slab_tax.normalize().to_string(),
            "cess": cess.normalize().to_string(),
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_tax": monthly_tax.normalize().to_string()
        }),
        reasoning,
    };

    IncomeTaxResult {
        assessment: IncomeTaxAssessment {
            regime: schedule.regime,
            annual_income,
            standard_deduction: schedule.standard_deduction,
            itemised_deduction: itemised,
            taxable_income,
            rebate_applied,
            slices,
            slab_tax,
            cess,
            annual_tax,
            monthly_tax,
        },
        audit_step,
    }
}
