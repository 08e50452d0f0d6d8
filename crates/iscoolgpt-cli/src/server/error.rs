//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"detail": "..."}`. The status is a
//! pure function of the error category; the underlying cause is never read.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use iscoolgpt_core::types::ErrorBody;
use iscoolgpt_providers::{ErrorKind, ProviderError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input rejected before any provider is involved.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Provider(e) => match e.kind() {
                ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::UpstreamRequest | ErrorKind::EmptyResponse => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
