//! Flat fees and wage-linked statutory contributions.
//!
//! Professional tax, health insurance (ESI), labour welfare fund and the
//! statutory bonus.

use rust_decimal::Decimal;

use crate::config::{HealthInsuranceConfig, StatutoryRates};
use crate::models::{AuditStep, PeriodAmount};

use super::rounding::{percent_of, round_currency, round_whole};

/// Employee and employer health-insurance shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthInsuranceShares {
    /// Withheld from the employee.
    pub employee: Decimal,
    /// Paid by the employer; a cost, never deducted.
    pub employer: Decimal,
}

impl HealthInsuranceShares {
    /// No contribution.
    pub const ZERO: HealthInsuranceShares = HealthInsuranceShares {
        employee: Decimal::ZERO,
        employer: Decimal::ZERO,
    };
}

/// Unrounded health-insurance shares for a monthly gross.
///
/// Zero when not applicable or when `gross` exceeds the ceiling.
pub fn health_insurance_shares(
    gross: Decimal,
    applicable: bool,
    config: &HealthInsuranceConfig,
) -> HealthInsuranceShares {
    if !applicable || gross > config.gross_ceiling {
        return HealthInsuranceShares::ZERO;
    }
    HealthInsuranceShares {
        employee: gross * config.employee_rate,
        employer: gross * config.employer_rate,
    }
}

/// The fixed-fee and ESI deductions for a CTC breakdown.
#[derive(Debug, Clone)]
pub struct StatutoryDeductionsResult {
    /// Professional tax.
    pub professional_tax: PeriodAmount,
    /// Employee health-insurance share.
    pub health_insurance_employee: PeriodAmount,
    /// Employer health-insurance share.
    pub health_insurance_employer: PeriodAmount,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates professional tax and health insurance on a monthly gross.
///
/// Professional tax is the configured flat monthly fee. Health insurance
/// applies only at or below the gross ceiling; the employer share is
/// reported but not deducted. Annual figures are twelve times monthly.
pub fn calculate_statutory_deductions(
    monthly_gross: Decimal,
    professional_tax_applicable: bool,
    health_insurance_applicable: bool,
    rates: &StatutoryRates,
    step_number: u32,
) -> StatutoryDeductionsResult {
    let professional_tax = if professional_tax_applicable {
        rates.professional_tax
    } else {
        Decimal::ZERO
    };

    let health = health_insurance_shares(
        monthly_gross,
        health_insurance_applicable,
        &rates.health_insurance,
    );
    let esi_employee = round_currency(health.employee);
    let esi_employer = round_currency(health.employer);
    let above_ceiling =
        health_insurance_applicable && monthly_gross > rates.health_insurance.gross_ceiling;

    let mut notes = Vec::new();
    notes.push(if professional_tax_applicable {
        format!("professional tax {}", professional_tax.normalize())
    } else {
        "professional tax not applicable".to_string()
    });
    notes.push(if !health_insurance_applicable {
        "ESI not applicable".to_string()
    } else if above_ceiling {
        format!(
            "ESI not due, gross {} above ceiling {}",
            monthly_gross.normalize(),
            rates.health_insurance.gross_ceiling.normalize()
        )
    } else {
        format!(
            "ESI {} x {} = {}",
            monthly_gross.normalize(),
            rates.health_insurance.employee_rate.normalize(),
            esi_employee.normalize()
        )
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_deductions".to_string(),
        rule_name: "Professional Tax and ESI".to_string(),
        input: serde_json::json!({
            "monthly_gross": monthly_gross.normalize().to_string(),
            "professional_tax_applicable": professional_tax_applicable,
            "health_insurance_applicable": health_insurance_applicable
        }),
        output: serde_json::json!({
            "professional_tax": professional_tax.normalize().to_string(),
            "esi_employee": esi_employee.normalize().to_string(),
            "esi_employer": esi_employer.normalize().to_string()
        }),
        reasoning: notes.join("; "),
    };

    StatutoryDeductionsResult {
        professional_tax: PeriodAmount::from_monthly(professional_tax),
        health_insurance_employee: PeriodAmount::from_monthly(esi_employee),
        health_insurance_employer: PeriodAmount::from_monthly(esi_employer),
        audit_step,
    }
}

/// Health-insurance shares for the payroll test run, rounded to whole units.
pub fn calculate_esic(
    gross: Decimal,
    applicable: bool,
    config: &HealthInsuranceConfig,
) -> HealthInsuranceShares {
    let shares = health_insurance_shares(gross, applicable, config);
    HealthInsuranceShares {
        employee: round_whole(shares.employee),
        employer: round_whole(shares.employer),
    }
}

/// Statutory bonus: `round(basic × percentage / 100)`, or zero.
pub fn calculate_bonus(basic: Decimal, percentage: Decimal, applicable: bool) -> Decimal {
    if applicable {
        round_whole(percent_of(basic, percentage))
    } else {
        Decimal::ZERO
    }
}

/// Returns `amount` when applicable, zero otherwise.
pub fn flat_fee(amount: Decimal, applicable: bool) -> Decimal {
    if applicable { amount } else { Decimal::ZERO }
}
