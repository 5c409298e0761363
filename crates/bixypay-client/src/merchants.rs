//! Merchant profile, balance and KYC.

use reqwest::Method;

use crate::client::BixyPayClient;
use crate::envelope::Envelope;
use crate::types::UpdateKycRequest;

/// Merchants facade, obtained from [`BixyPayClient::merchants`].
#[derive(Debug, Clone, Copy)]
pub struct Merchants<'a> {
    client: &'a BixyPayClient,
}

impl<'a> Merchants<'a> {
    pub(crate) fn new(client: &'a BixyPayClient) -> Self {
        Self { client }
    }

    /// Fetch the authenticated merchant's profile.
    pub async fn get_profile(&self) -> Envelope {
        self.client.get("/api/v1/merchants/profile").await
    }

    /// Fetch the authenticated merchant's balance.
    pub async fn get_balance(&self) -> Envelope {
        self.client.get("/api/v1/merchants/balance").await
    }

    /// Update the merchant's KYC status.
    pub async fn update_kyc_status(&self, status: &str) -> Envelope {
        let request = UpdateKycRequest {
            status: status.to_string(),
        };
        self.client
            .send(Method::PATCH, "/api/v1/merchants/kyc", &request)
            .await
    }
}
