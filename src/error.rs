use thiserror::Error;

/// Errors surfaced by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the request: HTTP 401 or envelope code 401.
    /// Callers should route to a credential prompt.
    #[error("unauthorized")]
    Unauthorized,
    /// Any other failure. Carries the backend-supplied message when the
    /// envelope had one, otherwise the transport/decode error or a fixed
    /// fallback string.
    #[error("{message}")]
    RequestFailed { message: String },
}

impl ApiError {
    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::failed(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::failed(err.to_string())
    }
}
