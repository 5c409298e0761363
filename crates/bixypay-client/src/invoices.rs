//! Invoice lifecycle.

use reqwest::Method;
use serde::Serialize;

use crate::client::BixyPayClient;
use crate::envelope::Envelope;
use crate::types::{InvoiceQuery, UpdateInvoiceStatusRequest};

const INVOICES_PATH: &str = "/api/v1/transactions/invoices";

/// Invoices facade, obtained from [`BixyPayClient::invoices`].
#[derive(Debug, Clone, Copy)]
pub struct Invoices<'a> {
    client: &'a BixyPayClient,
}

impl<'a> Invoices<'a> {
    pub(crate) fn new(client: &'a BixyPayClient) -> Self {
        Self { client }
    }

    /// Create an invoice from any serializable payload.
    ///
    /// Use [`NewInvoice`](crate::NewInvoice) for the common fields or a
    /// `serde_json::Value` for arbitrary ones.
    pub async fn create<T: Serialize + ?Sized>(&self, invoice: &T) -> Envelope {
        self.client.send(Method::POST, INVOICES_PATH, invoice).await
    }

    /// Fetch an invoice by ID.
    pub async fn get(&self, invoice_id: &str) -> Envelope {
        self.client
            .get(&format!("{INVOICES_PATH}/{invoice_id}"))
            .await
    }

    /// List invoices, optionally filtered. Parameters go in the query string.
    pub async fn list(&self, params: Option<&InvoiceQuery>) -> Envelope {
        self.client.get_with_query(INVOICES_PATH, params).await
    }

    /// Update an invoice's status, optionally recording the settling transaction hash.
    pub async fn update_status(
        &self,
        invoice_id: &str,
        status: &str,
        tx_hash: Option<&str>,
    ) -> Envelope {
        let request = UpdateInvoiceStatusRequest {
            status: status.to_string(),
            tx_hash: tx_hash.map(str::to_string),
        };
        self.client
            .send(
                Method::PATCH,
                &format!("{INVOICES_PATH}/{invoice_id}/status"),
                &request,
            )
            .await
    }
}
