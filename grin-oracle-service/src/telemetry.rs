//! Tracing setup for the oracle service.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber: human-readable formatting plus
/// an environment-based filter (`RUST_LOG`). Call once at startup.
pub fn install_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_line_number(false);
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grin_oracle_service=debug,info".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
