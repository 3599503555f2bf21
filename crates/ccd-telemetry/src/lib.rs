//! # CCD Telemetry
//!
//! Structured logging for applications built on the node client.
//!
//! The client crates only emit `tracing` events; this crate installs the
//! subscriber that formats them (plain text for development, JSON for log
//! shippers) behind an `EnvFilter`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ccd_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CCD_SERVICE_NAME` | `ccd-node-client` | Service name on events |
//! | `CCD_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also accepted) |
//! | `CCD_JSON_LOGS` | `false` | JSON output |
//! | `CCD_LOG_LOCATION` | `false` | File and line on events |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),

    /// The level filter does not parse.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
