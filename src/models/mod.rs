//! Core data models for the compensation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod breakdown;
mod compensation;
mod employee;
mod leave;
mod payroll;

pub use attendance::{
    AttendanceDay, AttendanceRecord, AttendanceStatus, AttendanceSummary, DateRange,
    DateRangePreset,
};
pub use audit::{AuditStep, AuditTrace, AuditWarning, WarningSeverity};
pub use breakdown::{
    BracketSlice, ComponentAmount, ComponentBreakdown, CtcBreakdown, DeductionSet,
    EarningComponent, IncomeTaxAssessment, PeriodAmount,
};
pub use compensation::{
    CompensationInput, ComponentPercentages, PayFrequency, StatutoryFlags, TaxRegime,
};
pub use employee::{Applicability, PayrollEmployee};
pub use leave::{LeaveRegister, LeaveRegisterEntry, LeaveRequest, LeaveStatus};
pub use payroll::{PayrollTestResult, TestRunReport, TestRunSummary};
