//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pwapack_pipeline::PipelineError;

/// API error type.
///
/// Failure responses carry a plain-text message; the status encodes
/// whether the upload was at fault (4xx) or the server was (5xx).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing required file: {0}")]
    MissingPart(&'static str),

    #[error("malformed upload: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingPart(_) | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::Pipeline(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Pipeline(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
