//! rr-admin binary entry point.

use std::process::ExitCode;

use clap::Parser;
use registry_telemetry::{init_tracing, TelemetryConfig};
use rr_admin::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::from_env().with_log_level(
        std::env::var("RR_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
    );
    if let Err(e) = init_tracing(&telemetry) {
        eprintln!("Warning: {e}");
    }

    match run(&cli) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
