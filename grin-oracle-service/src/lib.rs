//! Grin payment-proof oracle service.
//!
//! The service accepts textual payment-proof records over HTTP,
//! optionally corroborates them against a Grin wallet node over the
//! encrypted owner API, and answers with an EdDSA attestation signature
//! over the record's field commitment. A downstream verifier holds only
//! the oracle public key and checks signatures against it.

use std::sync::Arc;

use axum::extract::FromRef;
use axum::Router;
use eddsa_babyjubjub::EdDSAPrivateKey;
use eyre::Context as _;
use grin_oracle_core::OracleSigner;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::OracleConfig;
use crate::services::oracle::{OracleService, WalletSettings};

mod api;
pub mod config;
mod services;
pub mod telemetry;

#[derive(Clone)]
pub(crate) struct AppState {
    oracle: Arc<OracleService>,
}

impl FromRef<AppState> for Arc<OracleService> {
    fn from_ref(input: &AppState) -> Self {
        input.oracle.clone()
    }
}

/// Builds the service router from a configuration.
///
/// Fails if the signing key is malformed; everything else is deferred to
/// request time.
pub fn router(config: &OracleConfig) -> eyre::Result<Router> {
    let signing_key = load_signing_key(config)?;
    let signer = OracleSigner::Uninitialized.install(signing_key, None)?;
    let public_key = signer.public_key()?;
    tracing::info!(
        "oracle public key: [{}, {}]",
        public_key.pk.x,
        public_key.pk.y
    );
    tracing::info!("commitment encoding: {}", config.encoding_strategy);

    let wallet = config.wallet_url.as_ref().map(|url| WalletSettings {
        url: url.clone(),
        api_user: config.wallet_api_user.clone(),
        api_secret: config.wallet_api_secret.clone(),
        password: config.wallet_password.clone(),
    });
    if wallet.is_none() {
        tracing::warn!("no wallet endpoint configured, proofs are signed without corroboration");
    }

    let oracle = Arc::new(OracleService::new(
        signer,
        config.encoding_strategy,
        wallet,
    ));
    Ok(api::build()
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { oracle }))
}

/// Starts the oracle service and serves until `shutdown_signal` resolves.
pub async fn start(
    config: OracleConfig,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> eyre::Result<()> {
    let router = router(&config)?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("while binding tcp listener")?;
    tracing::info!(
        "starting axum server on {}",
        listener
            .local_addr()
            .map(|x| x.to_string())
            .unwrap_or(String::from("invalid addr"))
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("while serving the oracle API")?;
    tracing::info!("axum server shutdown");
    Ok(())
}

fn load_signing_key(config: &OracleConfig) -> eyre::Result<EdDSAPrivateKey> {
    use secrecy::ExposeSecret as _;
    let bytes = hex::decode(config.signing_key.expose_secret())
        .context("GRIN_ORACLE_SIGNING_KEY must be hex")?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| eyre::eyre!("GRIN_ORACLE_SIGNING_KEY must decode to exactly 32 bytes"))?;
    Ok(EdDSAPrivateKey::from_bytes(&bytes))
}

/// The default shutdown signal. Triggered by CTRL+C or SIGTERM.
pub async fn default_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
