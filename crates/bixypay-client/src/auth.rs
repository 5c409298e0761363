//! Authentication and API key management.

use reqwest::Method;
use serde_json::Value;

use crate::client::BixyPayClient;
use crate::envelope::Envelope;
use crate::types::{CreateApiKeyRequest, LoginRequest, RegisterRequest};

const REGISTER_PATH: &str = "/api/v1/auth/register";
const LOGIN_PATH: &str = "/api/v1/auth/login";
const API_KEYS_PATH: &str = "/api/v1/auth/api-keys";

/// Auth facade, obtained from [`BixyPayClient::auth`].
#[derive(Debug, Clone, Copy)]
pub struct Auth<'a> {
    client: &'a BixyPayClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a BixyPayClient) -> Self {
        Self { client }
    }

    /// Register a new merchant account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        business_name: &str,
        business_address: Option<&str>,
    ) -> Envelope {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            business_name: business_name.to_string(),
            business_address: business_address.map(str::to_string),
        };
        self.client.send(Method::POST, REGISTER_PATH, &request).await
    }

    /// Log in and keep the returned `access_token` for subsequent calls.
    pub async fn login(&self, email: &str, password: &str) -> Envelope {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let envelope = self.client.send(Method::POST, LOGIN_PATH, &request).await;

        if let Some(token) = envelope
            .data()
            .and_then(|data| data.get("access_token"))
            .and_then(Value::as_str)
        {
            self.client.set_jwt_token(token);
            tracing::info!("Stored bearer token from login");
        }

        envelope
    }

    /// Create an API key. Scopes default to an empty list.
    pub async fn create_api_key(&self, name: &str, scopes: Option<&[&str]>) -> Envelope {
        let request = CreateApiKeyRequest {
            name: name.to_string(),
            scopes: scopes
                .unwrap_or_default()
                .iter()
                .map(|scope| (*scope).to_string())
                .collect(),
        };
        self.client.send(Method::POST, API_KEYS_PATH, &request).await
    }

    /// List the merchant's API keys.
    pub async fn list_api_keys(&self) -> Envelope {
        self.client.get(API_KEYS_PATH).await
    }

    /// Revoke an API key by ID.
    pub async fn revoke_api_key(&self, key_id: &str) -> Envelope {
        self.client
            .delete(&format!("{API_KEYS_PATH}/{key_id}"))
            .await
    }
}
