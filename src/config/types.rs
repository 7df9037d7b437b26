//! Configuration types for the settlement engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_TOLERANCE;

/// How the ledger aggregator treats a pair driven negative by an
/// overpaying settlement.
///
/// Both policies produce the same net balances; they differ in the shape of
/// the directed balances and therefore in the order participants are first
/// encountered during netting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeBalancePolicy {
    /// Flip a negative pair into a positive obligation in the other
    /// direction, merging it with any existing opposite pair.
    #[default]
    Normalize,
    /// Pass negative pairs through unchanged and let signed netting absorb
    /// them.
    Signed,
}

impl NegativeBalancePolicy {
    /// Returns the configuration name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            NegativeBalancePolicy::Normalize => "normalize",
            NegativeBalancePolicy::Signed => "signed",
        }
    }
}

/// Tunables for the settlement algorithms, from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Balances with a magnitude below this are treated as settled.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Treatment of overpaid pairs.
    #[serde(default)]
    pub negative_balance_policy: NegativeBalancePolicy,
    /// Currency used when neither the expenses nor the caller name one.
    pub default_currency: String,
}

fn default_tolerance() -> Decimal {
    DEFAULT_TOLERANCE
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            negative_balance_policy: NegativeBalancePolicy::default(),
            default_currency: "USD".to_string(),
        }
    }
}

impl EngineSettings {
    /// Returns a copy of the settings using a different negative-balance
    /// policy.
    pub fn with_policy(mut self, policy: NegativeBalancePolicy) -> Self {
        self.negative_balance_policy = policy;
        self
    }
}

/// Display information about a supported currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// The human-readable name of the currency.
    pub name: String,
    /// The symbol shown next to amounts.
    pub symbol: String,
}

/// Currencies configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrenciesConfig {
    /// Map of ISO currency code to currency details.
    pub currencies: HashMap<String, CurrencyInfo>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct SettlementConfig {
    settings: EngineSettings,
    currencies: HashMap<String, CurrencyInfo>,
}

impl SettlementConfig {
    /// Creates a new SettlementConfig from its component parts.
    pub fn new(settings: EngineSettings, currencies: HashMap<String, CurrencyInfo>) -> Self {
        Self {
            settings,
            currencies,
        }
    }

    /// Returns the algorithm settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all supported currencies.
    pub fn currencies(&self) -> &HashMap<String, CurrencyInfo> {
        &self.currencies
    }
}
