//! Salary component split.
//!
//! This module splits a gross figure into the percentaged earning components
//! and the residual special allowance.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, ComponentAmount, ComponentBreakdown, ComponentPercentages,
    EarningComponent, PeriodAmount, WarningSeverity,
};

use super::rounding::percent_of;

/// Warning code raised when the special allowance goes negative.
pub const NEGATIVE_RESIDUAL_WARNING: &str = "NEGATIVE_SPECIAL_ALLOWANCE";

/// The result of splitting gross pay, including the audit step.
#[derive(Debug, Clone)]
pub struct ComponentSplitResult {
    /// The itemised components.
    pub breakdown: ComponentBreakdown,
    /// Raised when allocations exceed 100%.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

/// Rejects percentage allocations that cannot be meant seriously.
///
/// Negative percentages, any single percentage above 100, and totals above
/// `max_total` are errors. Totals between 100 and `max_total` are accepted;
/// the residual simply goes negative.
pub fn validate_percentages(
    percentages: &ComponentPercentages,
    max_total: Decimal,
) -> EngineResult<()> {
    for (field, value) in percentages.entries() {
        if value < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                format!("percentages.{}", field),
                format!("must not be negative (got {})", value),
            ));
        }
        if value > Decimal::ONE_HUNDRED {
            return Err(EngineError::invalid_input(
                format!("percentages.{}", field),
                format!("must not exceed 100 (got {})", value),
            ));
        }
    }

    let total = percentages.total();
    if total > max_total {
        return Err(EngineError::invalid_input(
            "percentages",
            format!("total allocation {}% exceeds the {}% limit", total, max_total),
        ));
    }

    Ok(())
}

/// Splits a single gross figure.
///
/// Each percentaged component is `gross × percentage / 100`; the special
/// allowance is whatever remains, so the components always sum to `gross`.
///
/// # Example
///
/// ```
/// use ctc_engine::calculation::split_gross;
/// use ctc_engine::models::{ComponentPercentages, EarningComponent};
/// use rust_decimal_macros::dec;
///
/// let parts = split_gross(dec!(50000), &ComponentPercentages::default());
/// assert_eq!(parts[0], (EarningComponent::Basic, dec!(20000)));
/// assert_eq!(parts[5], (EarningComponent::SpecialAllowance, dec!(7500)));
/// ```
pub fn split_gross(
    gross: Decimal,
    percentages: &ComponentPercentages,
) -> [(EarningComponent, Decimal); 6] {
    let basic = percent_of(gross, percentages.basic);
    let hra = percent_of(gross, percentages.hra);
    let da = percent_of(gross, percentages.da);
    let lta = percent_of(gross, percentages.lta);
    let performance = percent_of(gross, percentages.performance);
    let special = gross - (basic + hra + da + lta + performance);

    [
        (EarningComponent::Basic, basic),
        (EarningComponent::HouseRentAllowance, hra),
        (EarningComponent::DearnessAllowance, da),
        (EarningComponent::LeaveTravelAllowance, lta),
        (EarningComponent::PerformanceBonus, performance),
        (EarningComponent::SpecialAllowance, special),
    ]
}

/// Splits monthly and annual gross into an itemised breakdown.
///
/// The two columns are split independently so that each one sums exactly
/// to its own gross figure.
pub fn calculate_component_split(
    gross: PeriodAmount,
    percentages: &ComponentPercentages,
    step_number: u32,
) -> ComponentSplitResult {
    let monthly = split_gross(gross.monthly, percentages);
    let annual = split_gross(gross.annual, percentages);
    let explicit: Vec<Decimal> = percentages.entries().iter().map(|(_, v)| *v).collect();

    let components: Vec<ComponentAmount> = monthly
        .iter()
        .zip(annual.iter())
        .enumerate()
        .map(|(i, (&(component, monthly), &(_, annual)))| ComponentAmount {
            component,
            percentage: explicit.get(i).copied(),
            amount: PeriodAmount { monthly, annual },
        })
        .collect();

    let breakdown = ComponentBreakdown { components };
    let special = breakdown.amount(EarningComponent::SpecialAllowance);
    let allocated = percentages.total();

    let warning = (special.monthly < Decimal::ZERO || special.annual < Decimal::ZERO).then(|| {
        AuditWarning {
            code: NEGATIVE_RESIDUAL_WARNING.to_string(),
            message: format!(
                "Component percentages total {}%; special allowance is {} per month",
                allocated.normalize(),
                special.monthly.normalize()
            ),
            severity: WarningSeverity::High,
        }
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "component_split".to_string(),
        rule_name: "Salary Component Split".to_string(),
        input: serde_json::json!({
            "monthly_gross": gross.monthly.normalize().to_string(),
            "annual_gross": gross.annual.normalize().to_string(),
            "allocated_percentage": allocated.normalize().to_string()
        }),
        output: serde_json::json!(
            breakdown
                .components
                .iter()
                .map(|c| (
                    serde_json::to_value(c.component)
                        .ok()
                        .and_then(|v| v.as_str().map(str::to_string))
                        .unwrap_or_default(),
                    serde_json::json!(c.amount.monthly.normalize().to_string())
                ))
                .collect::<serde_json::Map<String, serde_json::Value>>()
        ),
        reasoning: format!(
            "{}% of gross allocated to named components; special allowance = {} - named components = {}",
            allocated.normalize(),
            gross.monthly.normalize(),
            special.monthly.normalize()
        ),
    };

    ComponentSplitResult {
        breakdown,
        warning,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn pct(basic: Decimal, hra: Decimal, da: Decimal, lta: Decimal, perf: Decimal) -> ComponentPercentages {
        ComponentPercentages {
            basic,
            hra,
            da,
            lta,
            performance: perf,
        }
    }

    #[test]
    fn test_default_split_of_50000() {
        let result = calculate_component_split(
            PeriodAmount::from_monthly(dec!(50000)),
            &ComponentPercentages::default(),
            1,
        );
        let b = &result.breakdown;

        assert_eq!(b.amount(EarningComponent::Basic).monthly, dec!(20000));
        assert_eq!(b.amount(EarningComponent::HouseRentAllowance).monthly, dec!(10000));
        assert_eq!(b.amount(EarningComponent::DearnessAllowance).monthly, dec!(5000));
        assert_eq!(b.amount(EarningComponent::LeaveTravelAllowance).monthly, dec!(2500));
        assert_eq!(b.amount(EarningComponent::PerformanceBonus).monthly, dec!(5000));
        assert_eq!(b.amount(EarningComponent::SpecialAllowance).monthly, dec!(7500));
        assert_eq!(b.amount(EarningComponent::Basic).annual, dec!(240000));
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_special_allowance_has_no_percentage() {
        let result = calculate_component_split(
            PeriodAmount::from_monthly(dec!(50000)),
            &ComponentPercentages::default(),
            1,
        );
        let special = result.breakdown.components.last().unwrap();
        assert_eq!(special.component, EarningComponent::SpecialAllowance);
        assert_eq!(special.percentage, None);
        assert_eq!(result.breakdown.components[0].percentage, Some(dec!(40)));
    }

    #[test]
    fn test_over_allocation_gives_negative_residual_and_warning() {
        let percentages = pct(dec!(60), dec!(30), dec!(10), dec!(5), dec!(10));
        let result =
            calculate_component_split(PeriodAmount::from_monthly(dec!(10000)), &percentages, 1);

        assert_eq!(
            result.breakdown.amount(EarningComponent::SpecialAllowance).monthly,
            dec!(-1500)
        );
        assert_eq!(result.breakdown.total().monthly, dec!(10000));
        let warning = result.warning.unwrap();
        assert_eq!(warning.code, NEGATIVE_RESIDUAL_WARNING);
        assert_eq!(warning.severity, WarningSeverity::High);
    }

    #[test]
    fn test_exact_hundred_percent_leaves_zero_residual() {
        let percentages = pct(dec!(50), dec!(25), dec!(10), dec!(5), dec!(10));
        let result =
            calculate_component_split(PeriodAmount::from_monthly(dec!(33333.33)), &percentages, 1);
        assert_eq!(
            result.breakdown.amount(EarningComponent::SpecialAllowance).monthly,
            Decimal::ZERO
        );
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_audit_step_records_split() {
        let result = calculate_component_split(
            PeriodAmount::from_monthly(dec!(50000)),
            &ComponentPercentages::default(),
            3,
        );
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "component_split");
        assert_eq!(result.audit_step.output["basic"].as_str().unwrap(), "20000");
        assert_eq!(
            result.audit_step.output["special_allowance"].as_str().unwrap(),
            "7500"
        );
        assert!(result.audit_step.reasoning.contains("85%"));
    }

    #[test]
    fn test_validate_accepts_default_split() {
        assert!(validate_percentages(&ComponentPercentages::default(), dec!(200)).is_ok());
    }

    #[test]
    fn test_validate_accepts_over_hundred_within_limit() {
        let percentages = pct(dec!(60), dec!(30), dec!(10), dec!(5), dec!(10));
        assert!(validate_percentages(&percentages, dec!(200)).is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_percentage() {
        let percentages = pct(dec!(40), dec!(-5), dec!(10), dec!(5), dec!(10));
        match validate_percentages(&percentages, dec!(200)) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "percentages.hra"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_single_component_above_hundred() {
        let percentages = pct(dec!(120), dec!(0), dec!(0), dec!(0), dec!(0));
        assert!(validate_percentages(&percentages, dec!(200)).is_err());
    }

    #[test]
    fn test_validate_rejects_total_above_limit() {
        let percentages = pct(dec!(100), dec!(100), dec!(10), dec!(0), dec!(0));
        match validate_percentages(&percentages, dec!(200)) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "percentages");
                assert!(message.contains("210"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    fn money() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn percentage() -> impl Strategy<Value = Decimal> {
        (0i64..=10_000).prop_map(|bp| Decimal::new(bp, 2))
    }

    proptest! {
        #[test]
        fn prop_components_sum_to_gross(
            gross in money(),
            basic in percentage(),
            hra in percentage(),
            da in percentage(),
            lta in percentage(),
            perf in percentage(),
        ) {
            let percentages = pct(basic, hra, da, lta, perf);
            let split = calculate_component_split(PeriodAmount::from_monthly(gross), &percentages, 1);
            let total = split.breakdown.total();
            prop_assert_eq!(total.monthly, gross);
            prop_assert_eq!(total.annual, gross * Decimal::from(12));
        }
    }
}
