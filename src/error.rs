//! Library error type.
//!
//! ERROR HANDLING
//! ==============
//! Every fallible operation returns `ApiError`. Callers turn it into an
//! operator-facing notice; nothing here retries or recovers.

use crate::forms::ValidationErrors;

/// Errors produced by the API client, form submission and cache reads.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A base URL or file URL is not a usable absolute `http(s)` URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response (connect, TLS, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The session token cannot be sent as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// A local file for an upload or download could not be read or written.
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),

    /// Form input failed client-side validation; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

impl ApiError {
    /// HTTP status carried by the error, if the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server rejected the session token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
