#![deny(missing_docs, clippy::unwrap_used)]
//! Encrypted JSON-RPC client for the Grin wallet owner API (v3).
//!
//! The owner API wraps every call in an encrypted envelope: a one-time
//! ECDH handshake on secp256k1 derives a session secret, and each request
//! body is individually sealed with AES-256-GCM under that secret.
//!
//! Construction is two-phase so a failed key exchange cannot leave a
//! half-built client behind: [`WalletClient::new`] performs no I/O, and
//! [`WalletClient::handshake`] consumes it to produce a
//! [`SecureWalletClient`] that holds the shared secret. One client binds
//! to one endpoint and credential pair for its whole lifetime; the secret
//! is dropped with the client and never reused across instances.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use k256::ecdh::EphemeralSecret;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore as _;
use secrecy::{ExposeSecret, SecretBox, SecretString};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::instrument;

mod cipher;
mod rpc;

pub use cipher::{decrypt, encrypt, NONCE_SIZE, TAG_SIZE};
pub use rpc::{EncryptedEnvelope, RpcResult};

/// Path of the owner API on the wallet listener.
pub const OWNER_API_PATH: &str = "/v3/owner";

/// Errors returned by the wallet client.
///
/// Every variant aborts the in-flight call; nothing here is retried,
/// since a failed decrypt may indicate tampering rather than a transient
/// condition.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP or network errors from the wallet endpoint.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    /// A payload failed to (de)serialize as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The wallet returned a JSON-RPC error object.
    #[error("wallet returned a JSON-RPC error: {0}")]
    Rpc(Value),
    /// The wallet processed the call but answered `result.Err`.
    #[error("wallet declined the request: {0}")]
    Declined(Value),
    /// The response violated the wire protocol.
    #[error("malformed wallet response: {0}")]
    Protocol(String),
    /// Sealing the request body failed.
    #[error("payload encryption failed")]
    Encrypt,
    /// Authenticating and decrypting a payload failed (tag mismatch).
    #[error("failed to authenticate and decrypt the wallet payload")]
    Decrypt,
    /// The wallet's ECDH public key did not parse as a secp256k1 point.
    #[error("the remote ECDH public key is invalid")]
    InvalidRemoteKey,
}

/// A wallet owner-API client before the key exchange.
#[derive(Debug)]
pub struct WalletClient {
    http: reqwest::Client,
    url: String,
    api_user: String,
    api_secret: Option<SecretString>,
}

impl WalletClient {
    /// Builds a client for the wallet listening at `base_url`
    /// (e.g. `http://127.0.0.1:3420`). No I/O happens here.
    pub fn new(
        base_url: &str,
        api_user: impl Into<String>,
        api_secret: Option<SecretString>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}{OWNER_API_PATH}", base_url.trim_end_matches('/')),
            api_user: api_user.into(),
            api_secret,
        }
    }

    /// Performs the ECDH handshake and returns the encrypted-channel
    /// client.
    ///
    /// The ephemeral secp256k1 key is single-use and dropped as soon as
    /// the shared secret is derived.
    #[instrument(level = "debug", skip_all)]
    pub async fn handshake(self) -> Result<SecureWalletClient, Error> {
        let ephemeral = EphemeralSecret::random(&mut OsRng);
        let public = ephemeral.public_key().to_encoded_point(true);
        let result = self
            .call_raw(
                "init_secure_api",
                json!({ "ecdh_pubkey": hex::encode(public.as_bytes()) }),
            )
            .await?;
        let remote_hex = result.as_str().ok_or_else(|| {
            Error::Protocol("init_secure_api did not return a public key".into())
        })?;
        let remote_bytes = hex::decode(remote_hex).map_err(|_| Error::InvalidRemoteKey)?;
        let remote =
            k256::PublicKey::from_sec1_bytes(&remote_bytes).map_err(|_| Error::InvalidRemoteKey)?;
        let shared = ephemeral.diffie_hellman(&remote);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(shared.raw_secret_bytes());
        tracing::debug!("secure session established");
        Ok(SecureWalletClient {
            client: self,
            shared_secret: SecretBox::new(Box::new(secret)),
            next_id: 1,
        })
    }

    /// One plain (outer) JSON-RPC round trip.
    async fn call_raw<P: Serialize>(&self, method: &str, params: P) -> Result<Value, Error> {
        let response = self
            .http
            .post(&self.url)
            .basic_auth(
                &self.api_user,
                self.api_secret.as_ref().map(|s| s.expose_secret()),
            )
            .json(&rpc::RpcRequest::new(1, method, params))
            .send()
            .await?
            .error_for_status()?;
        let response: rpc::RpcResponse = response.json().await?;
        response.into_result()
    }
}

/// A wallet client after the handshake, issuing individually encrypted
/// calls.
///
/// Calls within one session are strictly sequential (`&mut self`):
/// `open_wallet` must yield a token before `verify_payment_proof` can use
/// it.
#[derive(Debug)]
pub struct SecureWalletClient {
    client: WalletClient,
    shared_secret: SecretBox<[u8; 32]>,
    next_id: u64,
}

impl SecureWalletClient {
    /// One encrypted JSON-RPC round trip; returns the inner `Ok` payload.
    #[instrument(level = "debug", skip(self, params))]
    pub async fn call<P: Serialize>(&mut self, method: &str, params: P) -> Result<Value, Error> {
        let id = self.next_id;
        self.next_id += 1;
        let body = serde_json::to_vec(&rpc::RpcRequest::new(id, method, params))?;

        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);
        let sealed = cipher::encrypt(self.shared_secret.expose_secret(), &nonce, &body)?;
        let envelope = EncryptedEnvelope {
            nonce: hex::encode(nonce),
            body_enc: BASE64.encode(sealed),
        };

        let result = self.client.call_raw("encrypted_request_v3", envelope).await?;
        let envelope: EncryptedEnvelope = serde_json::from_value(result)?;
        let nonce = hex::decode(&envelope.nonce)
            .map_err(|_| Error::Protocol("response nonce is not hex".into()))?;
        let nonce: [u8; NONCE_SIZE] = nonce
            .try_into()
            .map_err(|_| Error::Protocol("response nonce must be 12 bytes".into()))?;
        let sealed = BASE64
            .decode(&envelope.body_enc)
            .map_err(|_| Error::Protocol("response body is not base64".into()))?;
        let body = cipher::decrypt(self.shared_secret.expose_secret(), &nonce, &sealed)?;

        let response: rpc::RpcResponse = serde_json::from_slice(&body)?;
        response.into_result()
    }

    /// Opens the wallet and returns the keychain token for follow-up
    /// calls.
    pub async fn open_wallet(&mut self, name: &str, password: &str) -> Result<String, Error> {
        let result = self
            .call("open_wallet", json!({ "name": name, "password": password }))
            .await?;
        result
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| Error::Protocol("open_wallet did not return a token".into()))
    }

    /// Asks the wallet to check a payment proof. `Ok(())` means the wallet
    /// corroborates it; any error means it does not (or could not).
    pub async fn verify_payment_proof<P: Serialize>(
        &mut self,
        token: &str,
        proof: &P,
    ) -> Result<(), Error> {
        self.call(
            "verify_payment_proof",
            json!({ "token": token, "proof": proof }),
        )
        .await?;
        Ok(())
    }
}
