//! Configuration for the payment-proof oracle service.
//!
//! Everything can be set via environment variables or command line
//! arguments using `clap`. Secrets are typed as [`SecretString`] so they
//! never end up in debug output.

use std::net::SocketAddr;

use clap::Parser;
use grin_oracle_core::EncodingStrategy;
use secrecy::SecretString;

/// The configuration for the Grin payment-proof oracle.
#[derive(Parser, Debug)]
pub struct OracleConfig {
    /// The bind addr of the axum server.
    #[clap(long, env = "GRIN_ORACLE_BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind_addr: SocketAddr,

    /// The oracle signing key: 32 bytes, hex encoded.
    #[clap(long, env = "GRIN_ORACLE_SIGNING_KEY")]
    pub signing_key: SecretString,

    /// The commitment encoding the deployed verifier expects
    /// (`six-element` or `single-element`).
    #[clap(
        long,
        env = "GRIN_ORACLE_ENCODING_STRATEGY",
        default_value = "six-element"
    )]
    pub encoding_strategy: EncodingStrategy,

    /// Base URL of the wallet owner API used to corroborate proofs
    /// (e.g. `http://127.0.0.1:3420`). Corroboration is skipped when
    /// unset.
    #[clap(long, env = "GRIN_ORACLE_WALLET_URL")]
    pub wallet_url: Option<String>,

    /// Basic-auth user of the wallet owner API.
    #[clap(long, env = "GRIN_ORACLE_WALLET_API_USER", default_value = "grin")]
    pub wallet_api_user: String,

    /// Basic-auth secret of the wallet owner API.
    #[clap(long, env = "GRIN_ORACLE_WALLET_API_SECRET")]
    pub wallet_api_secret: Option<SecretString>,

    /// Password of the wallet opened for proof verification.
    #[clap(long, env = "GRIN_ORACLE_WALLET_PASSWORD", default_value = "")]
    pub wallet_password: SecretString,
}
