//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration for registry processes.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Network identifier (mainnet, testnet, devnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "root-registry".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            network: "devnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RR_SERVICE_NAME`: Service name (default: root-registry)
    /// - `RR_LOG_LEVEL`: Log level (default: info); `RUST_LOG` still wins at filter time
    /// - `RR_JSON_LOGS`: `true`/`1` for JSON output (default: false, true in containers)
    /// - `RR_NETWORK`: Network name (default: devnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("RR_SERVICE_NAME")
                .unwrap_or_else(|_| "root-registry".to_string()),

            log_level: env::var("RR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("RR_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            network: env::var("RR_NETWORK").unwrap_or_else(|_| "devnet".to_string()),
        }
    }

    /// Builder-style log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Builder-style output format.
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
