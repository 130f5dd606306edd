//! Calculation logic for the compensation engine.
//!
//! This module contains the pure calculation functions: the salary component
//! split, retirement and statutory contributions, progressive income tax,
//! the top-level CTC calculator, attendance generation, the payroll test
//! run and the leave register.

mod attendance;
mod ctc;
mod income_tax;
mod leave_register;
mod retirement;
mod rounding;
mod salary_split;
mod statutory;
mod test_run;

pub use attendance::{
    HALFDAY_THRESHOLD, LEAVE_THRESHOLD, PRESENT_THRESHOLD, RandomSource, RngSource,
    SequenceSource, classify_draw, generate_attendance, is_weekend, prorate_gross,
};
pub use ctc::{NEGATIVE_NET_PAY_WARNING, calculate_ctc, gross_amounts, validate_compensation_input};
pub use income_tax::{
    IncomeTaxResult, bracket_slices, calculate_income_tax, itemised_deduction,
    tax_on_taxable_income,
};
pub use leave_register::{
    ALL_DEPARTMENTS, build_leave_register, calculate_leave_register_entry, leave_daily_rate,
};
pub use retirement::{
    ProvidentFundShares, RetirementResult, calculate_provident_fund,
    calculate_retirement_contribution,
};
pub use rounding::{percent_of, round_currency, round_whole};
pub use salary_split::{
    ComponentSplitResult, NEGATIVE_RESIDUAL_WARNING, calculate_component_split, split_gross,
    validate_percentages,
};
pub use statutory::{
    HealthInsuranceShares, StatutoryDeductionsResult, calculate_bonus, calculate_esic,
    calculate_statutory_deductions, flat_fee, health_insurance_shares,
};
pub use test_run::{TestRunOptions, calculate_employee_payroll, run_payroll_test};
