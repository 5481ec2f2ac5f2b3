//! HTTP error mapping.
//!
//! # Invariants
//! - Validation messages are returned verbatim with `400`.
//! - Storage failures are logged and answered with a short generic `500`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use incident_core::ServiceError;
use log::error;
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body shape shared by every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Generic message only; details stay in the log.
    Internal(&'static str),
}

impl ApiError {
    /// Maps a service failure, logging storage detail under `operation`.
    pub fn from_service(operation: &'static str, err: ServiceError, generic: &'static str) -> Self {
        match err {
            ServiceError::Validation(err) => Self::BadRequest(err.to_string()),
            ServiceError::Storage(err) => {
                error!(
                    "event={} module=api status=error error_code=storage_failure error={}",
                    operation, err
                );
                Self::Internal(generic)
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(self) -> String {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::Internal(message) => message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorBody {
                detail: self.detail(),
            }),
        )
            .into_response()
    }
}
