//! CTC breakdown result models.
//!
//! This module contains the [`CtcBreakdown`] type and its associated
//! structures: the itemised earning components, the deduction set and the
//! income tax assessment.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, TaxRegime};

/// An earning component of gross pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningComponent {
    /// Basic salary.
    Basic,
    /// House rent allowance.
    HouseRentAllowance,
    /// Dearness allowance.
    DearnessAllowance,
    /// Leave travel allowance.
    LeaveTravelAllowance,
    /// Performance bonus.
    PerformanceBonus,
    /// Residual absorbing whatever the other components leave over.
    SpecialAllowance,
}

impl EarningComponent {
    /// Label used in rendered tables.
    pub fn label(&self) -> &'static str {
        match self {
            EarningComponent::Basic => "Basic Salary",
            EarningComponent::HouseRentAllowance => "HRA",
            EarningComponent::DearnessAllowance => "DA",
            EarningComponent::LeaveTravelAllowance => "LTA",
            EarningComponent::PerformanceBonus => "Performance Bonus",
            EarningComponent::SpecialAllowance => "Special Allowance",
        }
    }
}

impl fmt::Display for EarningComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A monetary figure expressed per month and per year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAmount {
    /// Amount per month.
    pub monthly: Decimal,
    /// Amount per year.
    pub annual: Decimal,
}

impl PeriodAmount {
    /// A zero amount.
    pub const ZERO: PeriodAmount = PeriodAmount {
        monthly: Decimal::ZERO,
        annual: Decimal::ZERO,
    };

    /// An amount whose annual figure is twelve monthly figures.
    ///
    /// # Example
    ///
    /// ```
    /// use ctc_engine::models::PeriodAmount;
    /// use rust_decimal_macros::dec;
    ///
    /// let amount = PeriodAmount::from_monthly(dec!(200));
    /// assert_eq!(amount.annual, dec!(2400));
    /// ```
    pub fn from_monthly(monthly: Decimal) -> Self {
        Self {
            monthly,
            annual: monthly * Decimal::from(12),
        }
    }
}

impl std::ops::Add for PeriodAmount {
    type Output = PeriodAmount;

    fn add(self, rhs: PeriodAmount) -> PeriodAmount {
        PeriodAmount {
            monthly: self.monthly + rhs.monthly,
            annual: self.annual + rhs.annual,
        }
    }
}

impl std::ops::Sub for PeriodAmount {
    type Output = PeriodAmount;

    fn sub(self, rhs: PeriodAmount) -> PeriodAmount {
        PeriodAmount {
            monthly: self.monthly - rhs.monthly,
            annual: self.annual - rhs.annual,
        }
    }
}

impl std::iter::Sum for PeriodAmount {
    fn sum<I: Iterator<Item = PeriodAmount>>(iter: I) -> Self {
        iter.fold(PeriodAmount::ZERO, |acc, amount| acc + amount)
    }
}

/// One earning component with its percentage and amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAmount {
    /// Which component.
    pub component: EarningComponent,
    /// Percentage of gross; `None` for the residual.
    pub percentage: Option<Decimal>,
    /// The monthly and annual amounts.
    pub amount: PeriodAmount,
}

/// Itemised earning components.
///
/// In each column the components sum exactly to gross pay; the special
/// allowance absorbs any remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    /// Components in display order, special allowance last.
    pub components: Vec<ComponentAmount>,
}

impl ComponentBreakdown {
    /// Looks up a component's amounts.
    pub fn get(&self, component: EarningComponent) -> Option<PeriodAmount> {
        self.components
            .iter()
            .find(|c| c.component == component)
            .map(|c| c.amount)
    }

    /// Amount of a component, zero if absent.
    pub fn amount(&self, component: EarningComponent) -> PeriodAmount {
        self.get(component).unwrap_or(PeriodAmount::ZERO)
    }

    /// Sum across all components.
    pub fn total(&self) -> PeriodAmount {
        self.components.iter().map(|c| c.amount).sum()
    }
}

/// Statutory deductions and employer contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSet {
    /// Employee retirement contribution.
    pub retirement_employee: PeriodAmount,
    /// Employer retirement contribution.
    pub retirement_employer: PeriodAmount,
    /// Professional tax flat fee.
    pub professional_tax: PeriodAmount,
    /// Employee health-insurance contribution.
    pub health_insurance_employee: PeriodAmount,
    /// Employer health-insurance contribution (cost only, not deducted).
    pub health_insurance_employer: PeriodAmount,
    /// Estimated income tax.
    pub income_tax: PeriodAmount,
}

impl DeductionSet {
    /// Everything withheld from the employee.
    pub fn total(&self) -> PeriodAmount {
        self.retirement_employee
            + self.professional_tax
            + self.health_insurance_employee
            + self.income_tax
    }
}

/// Tax computed on one bracket slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    /// Lower bound of the slice.
    pub from: Decimal,
    /// Upper bound of the slice (the taxable income for the top slice).
    pub to: Decimal,
    /// Marginal rate applied.
    pub rate: Decimal,
    /// Tax on this slice.
    pub tax: Decimal,
}

/// The full income tax computation for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxAssessment {
    /// Regime the tax was computed under.
    pub regime: TaxRegime,
    /// Annual income before deductions.
    pub annual_income: Decimal,
    /// Standard deduction applied.
    pub standard_deduction: Decimal,
    /// Itemised deduction estimate applied.
    pub itemised_deduction: Decimal,
    /// Income after deductions, floored at zero.
    pub taxable_income: Decimal,
    /// Whether taxable income fell within the rebate threshold.
    pub rebate_applied: bool,
    /// Per-bracket tax, empty when the rebate applied.
    pub slices: Vec<BracketSlice>,
    /// Sum of the slices.
    pub slab_tax: Decimal,
    /// Surcharge on top of the slab tax.
    pub cess: Decimal,
    /// Total annual tax.
    pub annual_tax: Decimal,
    /// Annual tax divided by twelve, rounded to two places.
    pub monthly_tax: Decimal,
}

/// The complete result of a CTC calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtcBreakdown {
    /// Gross pay.
    pub gross: PeriodAmount,
    /// Earning components.
    pub components: ComponentBreakdown,
    /// Statutory deductions.
    pub deductions: DeductionSet,
    /// Income tax detail behind `deductions.income_tax`.
    pub income_tax: IncomeTaxAssessment,
    /// Gross minus employee deductions.
    pub net_pay: PeriodAmount,
    /// Rules applied and warnings raised.
    pub audit_trace: AuditTrace,
}
