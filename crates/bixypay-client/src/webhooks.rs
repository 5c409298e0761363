//! Webhook registration.

use reqwest::Method;

use crate::client::BixyPayClient;
use crate::envelope::Envelope;
use crate::types::CreateWebhookRequest;

const WEBHOOKS_PATH: &str = "/api/v1/webhooks";

/// Webhooks facade, obtained from [`BixyPayClient::webhooks`].
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a> {
    client: &'a BixyPayClient,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a BixyPayClient) -> Self {
        Self { client }
    }

    /// Register a webhook for the given events.
    pub async fn create(&self, url: &str, events: &[&str]) -> Envelope {
        let request = CreateWebhookRequest {
            url: url.to_string(),
            events: events.iter().map(|event| (*event).to_string()).collect(),
        };
        self.client.send(Method::POST, WEBHOOKS_PATH, &request).await
    }

    /// List registered webhooks.
    pub async fn list(&self) -> Envelope {
        self.client.get(WEBHOOKS_PATH).await
    }

    /// Delete a webhook by ID.
    pub async fn delete(&self, webhook_id: &str) -> Envelope {
        self.client
            .delete(&format!("{WEBHOOKS_PATH}/{webhook_id}"))
            .await
    }
}
