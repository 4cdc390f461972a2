//! Oracle Service Binary
//!
//! Main entry point for the payment-proof oracle. Initializes tracing and
//! starts the service with configuration from command-line arguments or
//! environment variables.

use std::process::ExitCode;

use clap::Parser as _;
use grin_oracle_service::config::OracleConfig;

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    grin_oracle_service::telemetry::install_tracing();
    tracing::info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = OracleConfig::parse();
    let result =
        grin_oracle_service::start(config, grin_oracle_service::default_shutdown_signal()).await;
    match result {
        Ok(()) => {
            tracing::info!("good night!");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            // we don't want to double print the error therefore we just return FAILURE
            tracing::error!("{err:?}");
            Ok(ExitCode::FAILURE)
        }
    }
}
