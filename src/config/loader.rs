//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{CurrenciesConfig, CurrencyInfo, EngineSettings, SettlementConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml      # Tolerance, negative-balance policy, default currency
/// └── currencies.yaml  # Supported currency codes
/// ```
///
/// # Example
///
/// ```no_run
/// use trip_settlement::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let currency = loader.resolve_currency(None)?;
/// println!("Settling in {}", currency);
/// # Ok::<(), trip_settlement::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SettlementConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if either file is missing
    /// - `ConfigParseError` if either file contains invalid YAML
    /// - `InvalidConfig` if the tolerance is not positive or the default
    ///   currency is not in the currency table
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let currencies = Self::load_yaml::<CurrenciesConfig>(&path.join("currencies.yaml"))?;

        Self::from_config(SettlementConfig::new(settings, currencies.currencies))
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: SettlementConfig) -> EngineResult<Self> {
        let settings = config.settings();

        if settings.tolerance <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "tolerance".to_string(),
                message: format!("must be greater than zero, got {}", settings.tolerance),
            });
        }

        if !config.currencies().contains_key(&settings.default_currency) {
            return Err(EngineError::InvalidConfig {
                field: "default_currency".to_string(),
                message: format!(
                    "'{}' is not listed in the currency table",
                    settings.default_currency
                ),
            });
        }

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

    /// Returns the underlying configuration.
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Returns the algorithm settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Gets a supported currency by its code.
    ///
    /// Codes are matched case-sensitively; callers send upper-case ISO codes.
    pub fn get_currency(&self, code: &str) -> EngineResult<&CurrencyInfo> {
        self.config
            .currencies()
            .get(code)
            .ok_or_else(|| EngineError::UnsupportedCurrency {
                code: code.to_string(),
            })
    }

    /// Picks the currency for a trip.
    ///
    /// Uses `requested` if given, otherwise the configured default. Either way
    /// the code must be supported.
    pub fn resolve_currency(&self, requested: Option<&str>) -> EngineResult<String> {
        let code = requested.unwrap_or(&self.settings().default_currency);
        self.get_currency(code)?;
        Ok(code.to_string())
    }
}
