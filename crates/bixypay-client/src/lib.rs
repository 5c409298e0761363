//! BixyPay Client SDK.
//!
//! This crate wraps the BixyPay payment API: merchant registration and login,
//! API key management, invoices and webhooks.
//!
//! Every call returns an [`Envelope`] holding either the response payload or a
//! normalized error payload. Transport failures and non-2xx responses never
//! surface as `Err`.
//!
//! # Example
//!
//! ```no_run
//! use bixypay_client::{BixyPayClient, InvoiceQuery, NewInvoice};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BixyPayClient::new("https://api.bixypay.com")?;
//!
//! // Login stores the bearer token for the calls that follow
//! let login = client.auth().login("merchant@example.com", "hunter2").await;
//! if let Some(error) = login.error() {
//!     eprintln!("login failed: {error}");
//!     return Ok(());
//! }
//!
//! let invoice = client
//!     .invoices()
//!     .create(&NewInvoice::new(99.99, "USD").with_description("Monthly plan"))
//!     .await;
//! println!("{}", serde_json::to_string(&invoice)?);
//!
//! let page = client.invoices().list(Some(&InvoiceQuery::page(1, 10))).await;
//! println!("{:?}", page.data());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod auth;
mod client;
mod config;
mod envelope;
mod error;
mod invoices;
mod merchants;
mod types;
mod webhooks;

pub use auth::Auth;
pub use client::{BixyPayClient, API_KEY_HEADER};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
pub use envelope::{ApiError, Envelope};
pub use error::ClientError;
pub use invoices::Invoices;
pub use merchants::Merchants;
pub use types::*;
pub use webhooks::Webhooks;
