//! Client error types.

use reqwest::StatusCode;

/// Errors that can occur inside the BixyPay client.
///
/// Facade methods never return these directly: the dispatch routine folds
/// them into the error slot of an [`Envelope`](crate::Envelope) as a
/// `{"message": ...}` object. Only client construction surfaces them.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status without a JSON error body.
    #[error("HTTP {status}")]
    Status {
        /// HTTP status code.
        status: StatusCode,
    },

    /// A credential could not be encoded as a header value.
    #[error("invalid {header} header value")]
    InvalidHeader {
        /// Name of the offending header.
        header: &'static str,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// HTTP status associated with the failure, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(err) => err.status(),
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}
