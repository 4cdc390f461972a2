//! Verification orchestration.
//!
//! Responsibilities:
//! - Optionally corroborate the submitted record against a wallet node
//! - Compute the record's commitment under the configured encoding
//! - Sign the commitment with the active oracle key
//!
//! The service is stateless across requests and safe to share behind an
//! `Arc`; each corroboration opens its own wallet session, so no shared
//! secret ever outlives a single request.

use eddsa_babyjubjub::{EdDSAPublicKey, EdDSASignature};
use grin_oracle_core::{
    commit, EncodeError, EncodingStrategy, OracleSigner, PaymentProofRecord, SignerError,
};
use grin_wallet_client::WalletClient;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub(crate) enum OracleServiceError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Signer(#[from] SignerError),
}

/// Wallet endpoint and credentials used for proof corroboration.
pub(crate) struct WalletSettings {
    pub url: String,
    pub api_user: String,
    pub api_secret: Option<SecretString>,
    pub password: SecretString,
}

pub(crate) struct OracleService {
    signer: OracleSigner,
    strategy: EncodingStrategy,
    wallet: Option<WalletSettings>,
}

impl OracleService {
    pub(crate) fn new(
        signer: OracleSigner,
        strategy: EncodingStrategy,
        wallet: Option<WalletSettings>,
    ) -> Self {
        Self {
            signer,
            strategy,
            wallet,
        }
    }

    pub(crate) fn public_key(&self) -> Result<EdDSAPublicKey, OracleServiceError> {
        Ok(self.signer.public_key()?)
    }

    pub(crate) fn strategy(&self) -> EncodingStrategy {
        self.strategy
    }

    /// Verifies one payment-proof record.
    ///
    /// Returns `Ok(Some(signature))` if the oracle attests the record and
    /// `Ok(None)` if it refuses. A refusal deliberately collapses "wallet
    /// unreachable" and "proof invalid" into one answer so callers cannot
    /// probe oracle availability. Encoding errors are the caller's fault
    /// and surface as `Err`.
    #[instrument(level = "debug", skip_all)]
    pub(crate) async fn verify(
        &self,
        record: &PaymentProofRecord,
    ) -> Result<Option<EdDSASignature>, OracleServiceError> {
        if let Some(wallet) = &self.wallet {
            if let Err(err) = corroborate(wallet, record).await {
                tracing::debug!("refusing to sign: {err:?}");
                return Ok(None);
            }
            tracing::debug!("wallet corroborated the payment proof");
        }

        let commitment = commit(record, self.strategy)?;
        let signature = self.signer.sign(&commitment)?;
        Ok(Some(signature))
    }
}

/// One corroboration round trip: handshake, open the wallet, ask it to
/// check the proof. The session (and its shared secret) dies at the end
/// of this function, success or not.
async fn corroborate(
    wallet: &WalletSettings,
    record: &PaymentProofRecord,
) -> Result<(), grin_wallet_client::Error> {
    let client = WalletClient::new(
        &wallet.url,
        wallet.api_user.clone(),
        wallet.api_secret.clone(),
    );
    let mut session = client.handshake().await?;
    let token = session
        .open_wallet("", wallet.password.expose_secret())
        .await?;
    session.verify_payment_proof(&token, record).await
}
