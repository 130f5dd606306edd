//! Compensation engine for Indian payroll.
//!
//! This crate turns a cost-to-company figure into an itemised salary
//! breakdown with statutory deductions and income tax, runs simulated
//! payrolls over recorded or generated attendance, and builds the annual
//! register of leave with wages.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
