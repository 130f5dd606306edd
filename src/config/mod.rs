//! Configuration loading and management for the compensation engine.
//!
//! This module provides the statutory rule set (contribution rates, flat fees,
//! salary-structure defaults and income tax regimes), either built in for
//! FY 2025-26 or loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use ctc_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/fy2025_26").unwrap();
//! println!("Loaded rule set: {}", config.config().metadata().name);
//! ```

mod defaults;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ConfigMetadata, HealthInsuranceConfig, ItemisedDeductionRule, LeaveRules, RetirementConfig,
    SalaryStructure, StatutoryConfig, StatutoryRates, TaxBracket, TaxBracketTable,
    TaxRegimeSchedule, TestRunSplit,
};
