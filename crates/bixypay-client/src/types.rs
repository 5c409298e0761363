//! Request and response types for the BixyPay client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Merchant registration request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Registered business name.
    pub business_name: String,
    /// Business address (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_address: Option<String>,
}

/// Login request.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// API key creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateApiKeyRequest {
    /// Human-readable key name.
    pub name: String,
    /// Granted scopes (empty for the server default).
    pub scopes: Vec<String>,
}

/// KYC status update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateKycRequest {
    /// New KYC status.
    pub status: String,
}

/// Invoice status update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceStatusRequest {
    /// New invoice status.
    pub status: String,
    /// On-chain transaction hash settling the invoice (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// Webhook registration request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhookRequest {
    /// Endpoint receiving event deliveries.
    pub url: String,
    /// Subscribed event names (e.g., `"invoice.completed"`).
    pub events: Vec<String>,
}

/// Convenience shape for invoice creation.
///
/// [`Invoices::create`](crate::Invoices::create) accepts any serializable
/// payload; this covers the common fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    /// Amount in major currency units.
    pub amount: f64,
    /// ISO currency code (e.g., `"USD"`).
    pub currency: String,
    /// Line description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Arbitrary merchant metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// URL notified when the invoice changes state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl NewInvoice {
    /// Create an invoice for the given amount and currency.
    #[must_use]
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            description: None,
            metadata: None,
            callback_url: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the metadata object.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the callback URL.
    #[must_use]
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }
}

/// Query parameters for listing invoices.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceQuery {
    /// Page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Status filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Any further server-side filters.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl InvoiceQuery {
    /// Query a single page.
    #[must_use]
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Filter by status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Add an arbitrary filter parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls.
    pub access_token: String,
}

/// Newly created API key. The raw key is only returned once.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyCreated {
    /// Raw API key.
    pub key: String,
}

/// Merchant balance.
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Available balance.
    pub balance: serde_json::Value,
    /// Balance currency.
    pub currency: String,
}

/// Invoice as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice ID.
    pub invoice_id: String,
    /// Invoice amount.
    pub amount: serde_json::Value,
    /// Invoice currency.
    pub currency: String,
    /// Current status.
    pub status: String,
}

/// Registered webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct Webhook {
    /// Webhook ID.
    pub id: String,
    /// Delivery URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Subscribed events.
    #[serde(default)]
    pub events: Vec<String>,
}
