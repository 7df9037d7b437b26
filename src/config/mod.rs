//! Configuration loading and management for the settlement engine.
//!
//! This module loads the algorithm settings and the supported currency
//! table from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use trip_settlement::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Tolerance: {}", config.settings().tolerance);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CurrenciesConfig, CurrencyInfo, EngineSettings, NegativeBalancePolicy, SettlementConfig,
};
