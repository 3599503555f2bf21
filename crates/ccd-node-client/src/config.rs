//! # Client Configuration

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Energy granted to a dry run when the caller names none.
pub const DEFAULT_INVOKE_ENERGY: u64 = 1_000_000;

/// Node client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Label of the node, attached to log events.
    pub endpoint: String,

    /// Energy for `invoke_contract` when the context leaves it unset.
    pub default_invoke_energy: u64,

    /// Bound applied by `wait_for_transaction_finalization` when the caller
    /// passes none. `None` waits indefinitely.
    pub finalization_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "localhost:20000".to_string(),
            default_invoke_energy: DEFAULT_INVOKE_ENERGY,
            finalization_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Configuration for tests: short finalization bound.
    pub fn for_testing() -> Self {
        Self {
            endpoint: "mock".to_string(),
            default_invoke_energy: 10_000,
            finalization_timeout_ms: Some(5_000),
        }
    }

    /// Read configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `CCD_NODE_ENDPOINT`: node label (default: localhost:20000)
    /// - `CCD_INVOKE_ENERGY`: default dry run energy (default: 1000000)
    /// - `CCD_FINALIZATION_TIMEOUT_MS`: finalization wait bound (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: env::var("CCD_NODE_ENDPOINT").unwrap_or(defaults.endpoint),
            default_invoke_energy: env::var("CCD_INVOKE_ENERGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_invoke_energy),
            finalization_timeout_ms: env::var("CCD_FINALIZATION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Finalization wait bound as a duration.
    pub fn finalization_timeout(&self) -> Option<Duration> {
        self.finalization_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.default_invoke_energy, 1_000_000);
        assert_eq!(config.finalization_timeout(), None);
    }

    #[test]
    fn test_testing_config() {
        let config = ClientConfig::for_testing();
        assert_eq!(config.finalization_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_config_serde() {
        let config = ClientConfig::for_testing();
        let json = serde_json::to_string(&config).unwrap();
        let back: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
