//! Retirement (provident fund) contribution calculation.
//!
//! The CTC calculator uses a simplified model: the employee share is capped
//! at a monthly ceiling and the employer share mirrors it. The payroll test
//! run caps the basic pay the rates apply to instead, and uses a separate
//! employer rate.

use rust_decimal::Decimal;

use crate::config::RetirementConfig;
use crate::models::{AuditStep, PeriodAmount};

use super::rounding::{round_currency, round_whole};

/// The retirement contribution for a CTC breakdown, including the audit step.
#[derive(Debug, Clone)]
pub struct RetirementResult {
    /// Employee share.
    pub employee: PeriodAmount,
    /// Employer share.
    pub employer: PeriodAmount,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the capped retirement contribution on a monthly basic.
///
/// The monthly employee share is `min(basic × employee_rate, monthly_ceiling)`
/// rounded to two places; the annual figure is twelve times that. When the
/// contribution is not applicable both shares are zero.
///
/// # Examples
///
/// ```
/// use ctc_engine::calculation::calculate_retirement_contribution;
/// use ctc_engine::config::StatutoryConfig;
/// use rust_decimal_macros::dec;
///
/// let config = StatutoryConfig::fy2025_26();
/// let result = calculate_retirement_contribution(dec!(20000), true, &config.rates().retirement, 1);
/// assert_eq!(result.employee.monthly, dec!(1800));
/// assert_eq!(result.employer.annual, dec!(21600));
/// ```
pub fn calculate_retirement_contribution(
    monthly_basic: Decimal,
    applicable: bool,
    config: &RetirementConfig,
    step_number: u32,
) -> RetirementResult {
    if !applicable {
        let audit_step = AuditStep {
            step_number,
            rule_id: "retirement_contribution".to_string(),
            rule_name: "Retirement Contribution".to_string(),
            input: serde_json::json!({
                "monthly_basic": monthly_basic.normalize().to_string(),
                "applicable": false
            }),
            output: serde_json::json!({
                "employee_monthly": "0",
                "employer_monthly": "0"
            }),
            reasoning: "Retirement contribution not applicable".to_string(),
        };
        return RetirementResult {
            employee: PeriodAmount::ZERO,
            employer: PeriodAmount::ZERO,
            audit_step,
        };
    }

    let uncapped = monthly_basic * config.employee_rate;
    let capped = uncapped > config.monthly_ceiling;
    let monthly = round_currency(uncapped.min(config.monthly_ceiling));
    let employee = PeriodAmount::from_monthly(monthly);

    let reasoning = if capped {
        format!(
            "{} x {} = {}, capped at {}",
            monthly_basic.normalize(),
            config.employee_rate.normalize(),
            uncapped.normalize(),
            config.monthly_ceiling.normalize()
        )
    } else {
        format!(
            "{} x {} = {}",
            monthly_basic.normalize(),
            config.employee_rate.normalize(),
            monthly.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "retirement_contribution".to_string(),
        rule_name: "Retirement Contribution".to_string(),
        input: serde_json::json!({
            "monthly_basic": monthly_basic.normalize().to_string(),
            "rate": config.employee_rate.normalize().to_string(),
            "monthly_ceiling": config.monthly_ceiling.normalize().to_string(),
            "applicable": true
        }),
        output: serde_json::json!({
            "employee_monthly": monthly.normalize().to_string(),
            "employer_monthly": monthly.normalize().to_string(),
            "capped": capped
        }),
        reasoning,
    };

    RetirementResult {
        employee,
        employer: employee,
        audit_step,
    }
}

/// Employee and employer provident-fund shares for the payroll test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvidentFundShares {
    /// Employee share.
    pub employee: Decimal,
    /// Employer share.
    pub employer: Decimal,
}

/// Calculates provident-fund shares on a pro-rated basic.
///
/// Both rates apply to `min(basic, wage_ceiling)` and the results are
/// rounded to whole units. Returns zeros when not applicable.
pub fn calculate_provident_fund(
    basic: Decimal,
    applicable: bool,
    config: &RetirementConfig,
) -> ProvidentFundShares {
    if !applicable {
        return ProvidentFundShares {
            employee: Decimal::ZERO,
            employer: Decimal::ZERO,
        };
    }

    let wages = basic.min(config.wage_ceiling);
    ProvidentFundShares {
        employee: round_whole(wages * config.employee_rate),
        employer: round_whole(wages * config.employer_rate),
    }
}
