use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::error::Error as StdError;

/// Failure while fetching one secret from the sidecar
#[derive(Debug, thiserror::Error)]
pub enum SidecarError {
    /// The request could not be sent or no response arrived
    #[error(transparent)]
    Transport(reqwest::Error),

    /// The response body could not be read to the end
    #[error(transparent)]
    Body(reqwest::Error),

    /// The body was not a JSON object of string values
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl SidecarError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SidecarError::Transport(_) | SidecarError::Body(_))
    }
}

/// Custom error type for API endpoints
///
/// Every variant is reported as a 500 whose plain-text body is the
/// underlying error message, including its source chain.
#[derive(Debug)]
pub enum ApiError {
    /// Outbound secret fetch failed
    Sidecar(SidecarError),
}

impl ApiError {
    fn message(&self) -> String {
        let ApiError::Sidecar(err) = self;

        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.ends_with(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.message()).into_response()
    }
}

impl From<SidecarError> for ApiError {
    fn from(err: SidecarError) -> Self {
        ApiError::Sidecar(err)
    }
}
