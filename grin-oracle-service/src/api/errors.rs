use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::services::oracle::OracleServiceError;

pub(crate) type ApiResult<T> = Result<T, ApiErrors>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiErrors {
    #[error("malformed payment-proof record: {0}")]
    BadRecord(String),
    #[error(transparent)]
    InternalServerError(#[from] eyre::Report),
}

impl From<OracleServiceError> for ApiErrors {
    fn from(value: OracleServiceError) -> Self {
        tracing::debug!("{value:?}");
        match value {
            OracleServiceError::Encode(err) => ApiErrors::BadRecord(err.to_string()),
            OracleServiceError::Signer(err) => {
                ApiErrors::InternalServerError(eyre::Report::new(err))
            }
        }
    }
}

impl IntoResponse for ApiErrors {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiErrors::BadRecord(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiErrors::InternalServerError(inner) => {
                tracing::error!("{inner:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error has occurred",
                )
                    .into_response()
            }
        }
    }
}
