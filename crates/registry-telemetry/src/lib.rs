//! # Registry Telemetry
//!
//! Structured logging and Prometheus metrics for root registry processes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registry_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_tracing(&config).expect("Failed to init tracing");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUST_LOG` | unset | Filter directives, overrides `RR_LOG_LEVEL` |
//! | `RR_LOG_LEVEL` | `info` | Log level filter |
//! | `RR_JSON_LOGS` | `false` | JSON log lines |
//! | `RR_SERVICE_NAME` | `root-registry` | Service name |
//! | `RR_NETWORK` | `devnet` | Network name |

#![warn(missing_docs)]

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    gather_text, record_batch, record_rejection, record_root_update, record_signed_update,
    register_metrics,
};
pub use tracing_setup::{build_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),

    /// Metric registration or encoding failed
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Invalid filter or configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}
