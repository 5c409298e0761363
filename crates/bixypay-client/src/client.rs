//! BixyPay HTTP client implementation.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::envelope::{ApiError, Envelope};
use crate::error::ClientError;
use crate::invoices::Invoices;
use crate::merchants::Merchants;
use crate::webhooks::Webhooks;

/// Header carrying the long-lived API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// BixyPay API client.
///
/// Owns the base URL and the credential store. Resource facades
/// ([`auth`](Self::auth), [`merchants`](Self::merchants),
/// [`invoices`](Self::invoices), [`webhooks`](Self::webhooks)) borrow the
/// client and funnel every call through one dispatch routine.
///
/// Clones share credentials: a token captured by [`Auth::login`] on one
/// clone is sent by all of them.
#[derive(Debug, Clone)]
pub struct BixyPayClient {
    client: Client,
    base_url: String,
    credentials: Arc<RwLock<Credentials>>,
}

#[derive(Default, Clone)]
struct Credentials {
    api_key: Option<String>,
    jwt_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("jwt_token", &self.jwt_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl BixyPayClient {
    /// Create a client with no credentials.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., `"https://api.bixypay.com"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::new(base_url))
    }

    /// Create a client configured from `BIXYPAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base URL is empty".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            credentials: Arc::new(RwLock::new(Credentials {
                api_key: config.api_key,
                jwt_token: config.jwt_token,
            })),
        })
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the API key sent as `X-API-Key` on subsequent calls.
    pub fn set_api_key(&self, api_key: impl Into<String>) {
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .api_key = Some(api_key.into());
    }

    /// Set the bearer token sent as `Authorization: Bearer` on subsequent calls.
    pub fn set_jwt_token(&self, token: impl Into<String>) {
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .jwt_token = Some(token.into());
    }

    /// The current bearer token, if one is set.
    #[must_use]
    pub fn jwt_token(&self) -> Option<String> {
        self.credentials().jwt_token
    }

    /// Authentication and API key management.
    #[must_use]
    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    /// Merchant profile, balance and KYC.
    #[must_use]
    pub fn merchants(&self) -> Merchants<'_> {
        Merchants::new(self)
    }

    /// Invoice lifecycle.
    #[must_use]
    pub fn invoices(&self) -> Invoices<'_> {
        Invoices::new(self)
    }

    /// Webhook registration.
    #[must_use]
    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }

    fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Build the headers for one call from the current credentials.
    pub(crate) fn headers(&self) -> Result<HeaderMap, ClientError> {
        let credentials = self.credentials();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = credentials.api_key.filter(|key| !key.is_empty()) {
            let mut value = HeaderValue::from_str(&api_key).map_err(|_| {
                ClientError::InvalidHeader {
                    header: API_KEY_HEADER,
                }
            })?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        if let Some(token) = credentials.jwt_token.filter(|token| !token.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ClientError::InvalidHeader {
                    header: "authorization",
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    pub(crate) async fn get(&self, path: &str) -> Envelope {
        self.request(Method::GET, path, None, None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Envelope {
        self.request(Method::DELETE, path, None, None).await
    }

    pub(crate) async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: Option<&Q>,
    ) -> Envelope {
        let query = match query.map(serde_json::to_value).transpose() {
            Ok(query) => query,
            Err(err) => return self.fail(&Method::GET, path, &err.into()),
        };
        self.request(Method::GET, path, None, query).await
    }

    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Envelope {
        match serde_json::to_value(body) {
            Ok(body) => self.request(method, path, Some(body), None).await,
            Err(err) => self.fail(&method, path, &err.into()),
        }
    }

    /// Dispatch one call and fold every failure into the envelope.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: Option<Value>,
    ) -> Envelope {
        let envelope = match self.execute(&method, path, body, query).await {
            Ok(envelope) => envelope,
            Err(err) => return self.fail(&method, path, &err),
        };

        if let Envelope::Error(error) = &envelope {
            tracing::warn!(%method, path, status = ?error.status, %error, "Request failed");
        }
        envelope
    }

    async fn execute(
        &self,
        method: &Method,
        path: &str,
        body: Option<Value>,
        query: Option<Value>,
    ) -> Result<Envelope, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.headers()?;

        tracing::debug!(
            %method,
            path,
            api_key = headers.contains_key(API_KEY_HEADER),
            bearer = headers.contains_key(AUTHORIZATION),
            "Sending request"
        );

        let mut request = self.client.request(method.clone(), &url).headers(headers);
        if let Some(query) = &query {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(%method, path, status = status.as_u16(), "Received response");

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Envelope::Data(Value::Null));
            }
            return Ok(match serde_json::from_str(&text) {
                Ok(data) => Envelope::Data(data),
                Err(err) => Envelope::Error(ApiError {
                    status: Some(status.as_u16()),
                    body: json!({ "message": ClientError::Serialization(err).to_string() }),
                }),
            });
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(body) if !body.is_null() => Ok(Envelope::Error(ApiError::from_body(
                status.as_u16(),
                body,
            ))),
            _ => Err(ClientError::Status { status }),
        }
    }

    fn fail(&self, method: &Method, path: &str, err: &ClientError) -> Envelope {
        let error = ApiError::from_client_error(err);
        tracing::warn!(
            %method,
            path,
            base_url = %self.base_url,
            status = ?error.status,
            error = %err,
            "Request failed"
        );
        Envelope::Error(error)
    }
}
