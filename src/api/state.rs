//! Shared state for the settlement API handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, EngineSettings};

/// Shared application state.
///
/// Holds the loaded engine configuration. The configuration is immutable
/// once loaded, so handlers share it through an `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the algorithm settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }
}
