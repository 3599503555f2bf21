//! Telemetry configuration from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every event
    pub service_name: String,

    /// Log level filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive such as `ccd_node_client=debug`)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include file and line of the event
    pub with_location: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ccd-node-client".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_location: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CCD_SERVICE_NAME`: Service name (default: ccd-node-client)
    /// - `CCD_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CCD_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `CCD_LOG_LOCATION`: Include file and line (default: false)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("CCD_SERVICE_NAME").unwrap_or_else(|_| "ccd-node-client".to_string()),

            log_level: env::var("CCD_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("CCD_JSON_LOGS")
                .map(|v| flag(&v))
                .unwrap_or(is_container),

            with_location: env::var("CCD_LOG_LOCATION").map(|v| flag(&v)).unwrap_or(false),
        }
    }

    /// Configuration for tests: debug level, plain output.
    pub fn for_testing() -> Self {
        Self {
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}

fn flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "ccd-node-client");
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_flag_parsing() {
        assert!(flag("TRUE"));
        assert!(flag("1"));
        assert!(!flag("yes"));
        assert!(!flag("0"));
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: TelemetryConfig = serde_json::from_str(r#"{ "json_logs": true }"#).unwrap();
        assert!(config.json_logs);
        assert_eq!(config.log_level, "info");
    }
}
