//! Structured logging setup.
//!
//! Events carry consistent fields so that log shippers can parse them:
//! - `service`: service name from the configuration
//! - `method`: node method, on facade events
//! - `height` / `block`: block coordinates, on synchronizer events
//! - `transaction`: block item hash, on submission and finalization events

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{TelemetryConfig, TelemetryError};

/// Build the level filter.
///
/// `RUST_LOG` wins over the configured level when it is set and valid.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global subscriber.
///
/// Fails if the filter is invalid or a global subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    let output = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(config.with_location)
            .with_line_number(config.with_location)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(config.with_location)
            .with_line_number(config.with_location)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Structured logging configured"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_config_error() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            log_level: "ccd=notalevel".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(env_filter(&config), Err(TelemetryError::Config(_))));
    }

    #[test]
    fn test_second_init_fails() {
        let config = TelemetryConfig::for_testing();
        let _ = init_logging(&config);
        assert!(matches!(init_logging(&config), Err(TelemetryError::AlreadyInitialized(_))));
    }
}
