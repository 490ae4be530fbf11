//! Route level errors.
//!
//! Every failure that reaches a handler is rendered as `{"error": message}`
//! with the status of its variant.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::spotify::SpotifyError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or unusable request input
    #[error("{0}")]
    BadRequest(String),

    /// No usable Spotify session
    #[error("{0}")]
    Unauthorized(String),

    /// Anything else, including upstream provider failures
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        match err {
            SpotifyError::NotConfigured | SpotifyError::NotAuthenticated => {
                ApiError::Unauthorized(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
