//! CTC breakdown calculation.
//!
//! [`calculate_ctc`] is the top-level calculator: it validates the input,
//! splits gross pay into components, applies the statutory deductions and
//! income tax, and assembles a [`CtcBreakdown`] with a full audit trace.

use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CompensationInput, CtcBreakdown, DeductionSet,
    EarningComponent, PayFrequency, PeriodAmount, WarningSeverity,
};

use super::income_tax::calculate_income_tax;
use super::retirement::calculate_retirement_contribution;
use super::rounding::round_currency;
use super::salary_split::{calculate_component_split, validate_percentages};
use super::statutory::calculate_statutory_deductions;

/// Warning code raised when deductions exceed gross pay.
pub const NEGATIVE_NET_PAY_WARNING: &str = "NEGATIVE_NET_PAY";

/// Rejects input that cannot produce a meaningful breakdown.
pub fn validate_compensation_input(
    input: &CompensationInput,
    config: &StatutoryConfig,
) -> EngineResult<()> {
    if input.gross_pay < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "gross_pay",
            format!("must not be negative (got {})", input.gross_pay),
        ));
    }
    let max_gross_pay = config.structure().max_gross_pay;
    if input.gross_pay > max_gross_pay {
        return Err(EngineError::invalid_input(
            "gross_pay",
            format!("must not exceed {} (got {})", max_gross_pay, input.gross_pay),
        ));
    }
    validate_percentages(
        &input.percentages,
        config.structure().max_allocation_percentage,
    )
}

/// Monthly and annual gross for an input.
///
/// Annual input is divided by twelve and rounded to two places.
pub fn gross_amounts(input: &CompensationInput) -> PeriodAmount {
    match input.pay_frequency {
        PayFrequency::Monthly => PeriodAmount::from_monthly(input.gross_pay),
        PayFrequency::Annual => PeriodAmount {
            monthly: round_currency(input.gross_pay / Decimal::from(12)),
            annual: input.gross_pay,
        },
    }
}

/// Calculates the full CTC breakdown for one compensation input.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for gross pay that is negative or
/// above the configured maximum, or for an unreasonable percentage
/// allocation. Nothing is computed in that case.
///
/// # Examples
///
/// ```
/// use ctc_engine::calculation::calculate_ctc;
/// use ctc_engine::config::StatutoryConfig;
/// use ctc_engine::models::{CompensationInput, EarningComponent};
/// use rust_decimal_macros::dec;
///
/// let config = StatutoryConfig::fy2025_26();
/// let breakdown = calculate_ctc(&CompensationInput::monthly(dec!(50000)), &config).unwrap();
///
/// assert_eq!(breakdown.components.amount(EarningComponent::Basic).monthly, dec!(20000));
/// assert_eq!(breakdown.deductions.retirement_employee.monthly, dec!(1800));
/// assert_eq!(breakdown.deductions.income_tax.monthly, dec!(0));
/// assert_eq!(breakdown.net_pay.monthly, dec!(48000));
/// ```
pub fn calculate_ctc(
    input: &CompensationInput,
    config: &StatutoryConfig,
) -> EngineResult<CtcBreakdown> {
    validate_compensation_input(input, config)?;

    let mut trace = AuditTrace::default();
    let gross = gross_amounts(input);

    let split = calculate_component_split(gross, &input.percentages, trace.next_step_number());
    trace.steps.push(split.audit_step);
    trace.warnings.extend(split.warning);
    let components = split.breakdown;

    let basic = components.amount(EarningComponent::Basic);
    let retirement = calculate_retirement_contribution(
        basic.monthly,
        input.flags.retirement,
        &config.rates().retirement,
        trace.next_step_number(),
    );
    trace.steps.push(retirement.audit_step);

    let statutory = calculate_statutory_deductions(
        gross.monthly,
        input.flags.professional_tax,
        input.flags.health_insurance,
        config.rates(),
        trace.next_step_number(),
    );
    trace.steps.push(statutory.audit_step);

    let tax = calculate_income_tax(
        gross.annual,
        retirement.employee.annual,
        config.regime(input.regime),
        trace.next_step_number(),
    );
    trace.steps.push(tax.audit_step);
    let income_tax = tax.assessment;

    let deductions = DeductionSet {
        retirement_employee: retirement.employee,
        retirement_employer: retirement.employer,
        professional_tax: statutory.professional_tax,
        health_insurance_employee: statutory.health_insurance_employee,
        health_insurance_employer: statutory.health_insurance_employer,
        income_tax: PeriodAmount {
            monthly: income_tax.monthly_tax,
            annual: income_tax.annual_tax,
        },
    };
    let withheld = deductions.total();
    let net_pay = gross - withheld;

    trace.steps.push(AuditStep {
        step_number: trace.next_step_number(),
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "monthly_gross": gross.monthly.normalize().to_string(),
            "retirement_employee": deductions.retirement_employee.monthly.normalize().to_string(),
            "professional_tax": deductions.professional_tax.monthly.normalize().to_string(),
            "esi_employee": deductions.health_insurance_employee.monthly.normalize().to_string(),
            "income_tax": deductions.income_tax.monthly.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_net": net_pay.monthly.normalize().to_string(),
            "annual_net": net_pay.annual.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} deductions = {} per month",
            gross.monthly.normalize(),
            withheld.monthly.normalize(),
            net_pay.monthly.normalize()
        ),
    });

    if net_pay.monthly < Decimal::ZERO {
        trace.warnings.push(AuditWarning {
            code: NEGATIVE_NET_PAY_WARNING.to_string(),
            message: format!(
                "Deductions of {} exceed monthly gross of {}",
                withheld.monthly.normalize(),
                gross.monthly.normalize()
            ),
            severity: WarningSeverity::Medium,
        });
    }

    Ok(CtcBreakdown {
        gross,
        components,
        deductions,
        income_tax,
        net_pay,
        audit_trace: trace,
    })
}
