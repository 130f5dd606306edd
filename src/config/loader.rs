//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::TaxRegime;

use super::types::{SalaryStructure, StatutoryConfig, StatutoryFile, TaxRegimeSchedule};

/// Loads and provides access to a statutory configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and validates them into a [`StatutoryConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/fy2025_26/
/// ├── statutory.yaml         # Metadata, contribution rates, flat fees
/// ├── salary_structure.yaml  # Default component splits
/// └── regimes/
///     ├── new.yaml           # New regime brackets and deductions
///     └── old.yaml           # Old regime brackets and deductions
/// ```
///
/// # Example
///
/// ```no_run
/// use ctc_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/fy2025_26").unwrap();
/// println!("Loaded rule set: {}", loader.config().metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/fy2025_26")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A bracket table is unsorted or has a rate outside `[0, 1)`
    /// - A regime is missing or defined twice
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let statutory = Self::load_yaml::<StatutoryFile>(&path.join("statutory.yaml"))?;
        let structure = Self::load_yaml::<SalaryStructure>(&path.join("salary_structure.yaml"))?;
        let (new_regime, old_regime) = Self::load_regimes(&path.join("regimes"))?;

        let config = StatutoryConfig::new(
            statutory.metadata,
            statutory.rates,
            structure,
            new_regime,
            old_regime,
        )?;

        debug!(
            code = %config.metadata().code,
            financial_year = %config.metadata().financial_year,
            "Loaded statutory configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every regime file and returns the (new, old) pair.
    fn load_regimes(regimes_dir: &Path) -> EngineResult<(TaxRegimeSchedule, TaxRegimeSchedule)> {
        let regimes_dir_str = regimes_dir.display().to_string();

        let entries = fs::read_dir(regimes_dir).map_err(|_| EngineError::ConfigNotFound {
            path: regimes_dir_str.clone(),
        })?;

        let mut new_regime = None;
        let mut old_regime = None;

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: regimes_dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let schedule = Self::load_yaml::<TaxRegimeSchedule>(&path)?;
            let slot = match schedule.regime {
                TaxRegime::New => &mut new_regime,
                TaxRegime::Old => &mut old_regime,
            };
            if slot.is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "regime '{}' is defined more than once in {}",
                        schedule.regime, regimes_dir_str
                    ),
                });
            }
            *slot = Some(schedule);
        }

        match (new_regime, old_regime) {
            (Some(new_regime), Some(old_regime)) => Ok((new_regime, old_regime)),
            (None, _) => Err(EngineError::ConfigNotFound {
                path: format!("{} (no new regime file found)", regimes_dir_str),
            }),
            (_, None) => Err(EngineError::ConfigNotFound {
                path: format!("{} (no old regime file found)", regimes_dir_str),
            }),
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> StatutoryConfig {
        self.config
    }
}
