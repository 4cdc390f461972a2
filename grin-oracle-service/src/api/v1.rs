//! Version 1 of the verification API.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use grin_oracle_types::api::v1::{PaymentProofRecord, PublicKeyResponse, VerifyResponse};
use tracing::instrument;

use crate::api::errors::ApiResult;
use crate::services::oracle::OracleService;
use crate::AppState;

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/verify", post(verify))
        .route("/public-key", get(public_key))
}

/// Attests one payment-proof record.
///
/// A well-formed record always yields HTTP 200 with `{valid, signature}`;
/// only malformed records and internal faults map to error statuses.
#[instrument(level = "debug", skip_all)]
async fn verify(
    State(oracle): State<Arc<OracleService>>,
    Json(record): Json<PaymentProofRecord>,
) -> ApiResult<Json<VerifyResponse>> {
    let response = match oracle.verify(&record).await? {
        Some(signature) => VerifyResponse::valid(signature),
        None => VerifyResponse::invalid(),
    };
    Ok(Json(response))
}

/// The active oracle public key, for distribution to the verifier.
async fn public_key(
    State(oracle): State<Arc<OracleService>>,
) -> ApiResult<Json<PublicKeyResponse>> {
    Ok(Json(PublicKeyResponse {
        public_key: oracle.public_key()?.pk,
        encoding: oracle.strategy().to_string(),
    }))
}
