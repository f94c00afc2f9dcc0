//! # Simulation Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! ## Environment Variables
//! - `TILL_DENOMINATIONS`: comma-separated face values (e.g. `"100,50,10"`)
//! - `TILL_CURRENCY_SYMBOL`: prefix for printed amounts (default `R$`)
//! - `TILL_TIMESTAMP_FORMAT`: chrono format for journal lines

use serde::{Deserialize, Serialize};
use std::env;

use till_core::denomination::STANDARD_FACE_VALUES;
use till_core::journal::DEFAULT_TIMESTAMP_FORMAT;
use till_core::validation::parse_face_values;
use till_core::{Amount, DenominationSet, NoteBundle};

/// Driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    /// Face values the till is built with.
    pub denominations: Vec<u32>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// chrono format for journal timestamps
    pub timestamp_format: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            denominations: STANDARD_FACE_VALUES.to_vec(),
            currency_symbol: "R$".to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl SimConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SimConfig::default();

        if let Some(raw) = lookup("TILL_DENOMINATIONS") {
            config.denominations =
                parse_face_values(&raw).map_err(|e| ConfigError::InvalidValue {
                    key: "TILL_DENOMINATIONS".to_string(),
                    reason: e.to_string(),
                })?;
        }

        if let Some(symbol) = lookup("TILL_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(format) = lookup("TILL_TIMESTAMP_FORMAT") {
            if format.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "TILL_TIMESTAMP_FORMAT".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            config.timestamp_format = format;
        }

        // Fail at startup rather than at the first deposit.
        config.denomination_set()?;

        Ok(config)
    }

    /// The configured denominations as a validated set.
    pub fn denomination_set(&self) -> Result<DenominationSet, ConfigError> {
        DenominationSet::new(self.denominations.iter().copied()).map_err(|e| {
            ConfigError::InvalidValue {
                key: "TILL_DENOMINATIONS".to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Formats an amount with the currency symbol, so `Amount::new(260)`
    /// renders as `R$260` under the default configuration.
    pub fn format_currency(&self, amount: Amount) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }

    /// Formats a bundle as `"1x R$200, 2x R$50"` for the console.
    pub fn format_notes(&self, notes: &NoteBundle) -> String {
        notes
            .iter()
            .map(|(d, count)| format!("{}x {}{}", count, self.currency_symbol, d))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
