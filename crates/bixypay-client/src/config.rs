//! Client configuration.

use std::fmt;
use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.bixypay.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Configuration for a [`BixyPayClient`](crate::BixyPayClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., `"https://api.bixypay.com"`).
    pub base_url: String,

    /// Long-lived API key, sent as `X-API-Key`.
    pub api_key: Option<String>,

    /// Bearer token obtained from login, sent as `Authorization: Bearer`.
    pub jwt_token: Option<String>,

    /// Request timeout (default: 30 seconds).
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given base URL with no credentials.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            jwt_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `BIXYPAY_BASE_URL` (default: `https://api.bixypay.com`)
    /// - `BIXYPAY_API_KEY`
    /// - `BIXYPAY_JWT_TOKEN`
    /// - `BIXYPAY_TIMEOUT_SECONDS` (default: 30)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout_seconds = match var("BIXYPAY_TIMEOUT_SECONDS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_TIMEOUT_SECONDS,
                    "Invalid BIXYPAY_TIMEOUT_SECONDS, using default"
                );
                DEFAULT_TIMEOUT_SECONDS
            }),
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        Self {
            base_url: var("BIXYPAY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: var("BIXYPAY_API_KEY"),
            jwt_token: var("BIXYPAY_JWT_TOKEN"),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_jwt_token(mut self, token: impl Into<String>) -> Self {
        self.jwt_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("jwt_token", &self.jwt_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
