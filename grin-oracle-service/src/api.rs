//! HTTP surface of the oracle service.
//!
//! - [`errors`] – API error types and conversions from service errors.
//! - [`health`] – liveness endpoint (`/health`).
//! - [`v1`] – version 1 of the verification API (`/api/v1`).

use axum::Router;

use crate::AppState;

pub(crate) mod errors;
mod health;
mod v1;

pub(crate) fn build() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", v1::routes())
        .merge(health::routes())
}
