//! Application state for the compensation engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, StatutoryConfig};

/// Shared application state.
///
/// Holds the immutable statutory configuration shared by every handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<StatutoryConfig>,
}

impl AppState {
    /// Creates a new application state with the given configuration.
    pub fn new(config: StatutoryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a state from a loaded configuration directory.
    pub fn from_loader(loader: ConfigLoader) -> Self {
        Self::new(loader.into_config())
    }

    /// Returns the statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StatutoryConfig::default())
    }
}
