//! The `{data, error}` envelope returned by every API call.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::ClientError;

/// Outcome of a single API call.
///
/// Exactly one of the data payload or the error payload is present. Callers
/// branch on the variant (or on [`Envelope::error`]) instead of handling a
/// returned `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Successful response payload. `Value::Null` when the body was empty.
    Data(Value),
    /// Normalized error payload.
    Error(ApiError),
}

impl Envelope {
    /// The success payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// The error payload, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Data(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    /// Whether the call succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Whether the call failed.
    #[must_use]
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the error payload if the call failed.
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Error(error) => Err(error),
        }
    }

    /// Decode the success payload into a typed view.
    ///
    /// # Errors
    ///
    /// Returns the error payload if the call failed, or a generic message if
    /// the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let data = self.into_result()?;
        serde_json::from_value(data)
            .map_err(|err| ApiError::from_client_error(&ClientError::Serialization(err)))
    }
}

impl From<ApiError> for Envelope {
    fn from(error: ApiError) -> Self {
        Self::Error(error)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            data: Option<&'a Value>,
            error: Option<&'a Value>,
        }

        Wire {
            data: self.data(),
            error: self.error().map(|error| &error.body),
        }
        .serialize(serializer)
    }
}

/// Error payload of a failed call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code, or `None` if the request never got a response.
    pub status: Option<u16>,
    /// Server-provided JSON error body, or a generic `{"message": ...}` object.
    pub body: Value,
}

impl ApiError {
    /// Build an error from a server-provided JSON body.
    #[must_use]
    pub fn from_body(status: u16, body: Value) -> Self {
        Self {
            status: Some(status),
            body,
        }
    }

    /// Build a generic `{"message": ...}` error from an internal failure.
    #[must_use]
    pub fn from_client_error(err: &ClientError) -> Self {
        Self {
            status: err.status().map(|status| status.as_u16()),
            body: json!({ "message": err.to_string() }),
        }
    }

    /// The `message` field of the error body, when the server sent one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.message()) {
            (Some(status), Some(message)) => write!(f, "API error {status}: {message}"),
            (Some(status), None) => write!(f, "API error {status}: {}", self.body),
            (None, Some(message)) => write!(f, "API error: {message}"),
            (None, None) => write!(f, "API error: {}", self.body),
        }
    }
}

impl std::error::Error for ApiError {}
