use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Everything a request can fail with. Each variant maps to one status code
/// and is turned into a plain-text response at the handler boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid {name} {value:?}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("upstream response undecodable: {0}")]
    UpstreamDecode(String),
    #[error("response serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    pub fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable(_)
            | ApiError::UpstreamDecode(_)
            | ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_client_error() {
            warn!("rejected request: {message}");
        } else {
            error!("request failed: {message}");
        }
        (status, message).into_response()
    }
}
