//! Compensation input model.
//!
//! This module defines the [`CompensationInput`] record the CTC calculator
//! consumes, along with its pay frequency, percentage split, statutory
//! applicability flags and tax regime selector.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Whether the entered gross pay is a monthly or an annual figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// Gross pay is per month.
    #[default]
    Monthly,
    /// Gross pay is per year.
    Annual,
}

/// One of the two mutually exclusive income tax regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// The default regime: higher standard deduction, finer brackets.
    #[default]
    New,
    /// The optional regime with itemised deductions and coarser brackets.
    Old,
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxRegime::New => write!(f, "new"),
            TaxRegime::Old => write!(f, "old"),
        }
    }
}

/// Percentage of gross allocated to each explicitly split component.
///
/// The percentages need not sum to 100: whatever remains becomes the
/// special allowance, which goes negative when they exceed 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPercentages {
    /// Basic salary.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Dearness allowance.
    pub da: Decimal,
    /// Leave travel allowance.
    pub lta: Decimal,
    /// Performance bonus.
    pub performance: Decimal,
}

impl ComponentPercentages {
    /// Sum of all explicit percentages.
    ///
    /// # Example
    ///
    /// ```
    /// use ctc_engine::models::ComponentPercentages;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(ComponentPercentages::default().total(), dec!(85));
    /// ```
    pub fn total(&self) -> Decimal {
        self.basic + self.hra + self.da + self.lta + self.performance
    }

    /// Field name and value pairs, in display order.
    pub fn entries(&self) -> [(&'static str, Decimal); 5] {
        [
            ("basic", self.basic),
            ("hra", self.hra),
            ("da", self.da),
            ("lta", self.lta),
            ("performance", self.performance),
        ]
    }
}

impl Default for ComponentPercentages {
    fn default() -> Self {
        Self {
            basic: dec!(40),
            hra: dec!(20),
            da: dec!(10),
            lta: dec!(5),
            performance: dec!(10),
        }
    }
}

/// Which statutory deductions apply to the employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryFlags {
    /// Provident-fund retirement contribution.
    #[serde(default = "enabled")]
    pub retirement: bool,
    /// Professional tax flat fee.
    #[serde(default = "enabled")]
    pub professional_tax: bool,
    /// Health-insurance contribution.
    #[serde(default)]
    pub health_insurance: bool,
}

fn enabled() -> bool {
    true
}

impl Default for StatutoryFlags {
    fn default() -> Self {
        Self {
            retirement: true,
            professional_tax: true,
            health_insurance: false,
        }
    }
}

/// Everything the CTC calculator needs for one computation.
///
/// # Example
///
/// ```
/// use ctc_engine::models::{CompensationInput, PayFrequency, TaxRegime};
/// use rust_decimal_macros::dec;
///
/// let input = CompensationInput::monthly(dec!(50000));
/// assert_eq!(input.pay_frequency, PayFrequency::Monthly);
/// assert_eq!(input.regime, TaxRegime::New);
/// assert_eq!(input.annual_gross(), dec!(600000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// Gross pay as entered.
    pub gross_pay: Decimal,
    /// Whether `gross_pay` is monthly or annual.
    #[serde(default)]
    pub pay_frequency: PayFrequency,
    /// Percentage split of gross across components.
    #[serde(default)]
    pub percentages: ComponentPercentages,
    /// Applicable statutory deductions.
    #[serde(default)]
    pub flags: StatutoryFlags,
    /// Selected tax regime.
    #[serde(default)]
    pub regime: TaxRegime,
}

impl CompensationInput {
    /// A monthly input with the default split, flags and regime.
    pub fn monthly(gross_pay: Decimal) -> Self {
        Self {
            gross_pay,
            pay_frequency: PayFrequency::Monthly,
            percentages: ComponentPercentages::default(),
            flags: StatutoryFlags::default(),
            regime: TaxRegime::default(),
        }
    }

    /// An annual input with the default split, flags and regime.
    pub fn annual(gross_pay: Decimal) -> Self {
        Self {
            pay_frequency: PayFrequency::Annual,
            ..Self::monthly(gross_pay)
        }
    }

    /// Returns a copy with the given regime selected.
    pub fn with_regime(mut self, regime: TaxRegime) -> Self {
        self.regime = regime;
        self
    }

    /// Gross pay per year.
    pub fn annual_gross(&self) -> Decimal {
        match self.pay_frequency {
            PayFrequency::Monthly => self.gross_pay * Decimal::from(12),
            PayFrequency::Annual => self.gross_pay,
        }
    }

    /// Gross pay per month, unrounded.
    pub fn monthly_gross(&self) -> Decimal {
        match self.pay_frequency {
            PayFrequency::Monthly => self.gross_pay,
            PayFrequency::Annual => self.gross_pay / Decimal::from(12),
        }
    }
}
