use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many entries the ranked queries return unless configured otherwise
pub const DEFAULT_TOP_TRANSACTION_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid ledger configuration - {0}")]
    Parse(#[from] serde_json::Error),

    #[error("top_transaction_limit must be at least 1")]
    ZeroLimit,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerConfig {
    /// Upper bound on the length of both ranked transaction queries
    pub top_transaction_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            top_transaction_limit: DEFAULT_TOP_TRANSACTION_LIMIT,
        }
    }
}

impl LedgerConfig {
    /// Missing fields fall back to their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    pub fn with_top_transaction_limit(limit: usize) -> Result<Self, ConfigError> {
        Self {
            top_transaction_limit: limit,
        }
        .validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.top_transaction_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(self)
    }
}
