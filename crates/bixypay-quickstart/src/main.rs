//! BixyPay quickstart - end-to-end merchant onboarding walkthrough.
//!
//! Registers a merchant, logs in, creates an API key, switches to API key
//! auth, then reads the balance, creates and lists invoices, and registers a
//! webhook. Stops at the first failed call.
//!
//! Configuration comes from `BIXYPAY_*` environment variables (see
//! [`ClientConfig::from_env`]) plus `BIXYPAY_EMAIL` / `BIXYPAY_PASSWORD`.

use bixypay_client::{
    ApiKeyCreated, Balance, BixyPayClient, ClientConfig, Envelope, Invoice, InvoiceQuery,
    NewInvoice, Webhook,
};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bixypay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Starting BixyPay quickstart");

    let email = std::env::var("BIXYPAY_EMAIL").unwrap_or_else(|_| {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("quickstart+{suffix}@example.com")
    });
    let password =
        std::env::var("BIXYPAY_PASSWORD").unwrap_or_else(|_| "SecurePassword123!".to_string());

    let client = BixyPayClient::with_config(config)?;

    if let Err(err) = run(&client, &email, &password).await {
        tracing::error!(error = %err, "Quickstart stopped");
        return Err(err);
    }

    tracing::info!("All operations completed successfully");
    Ok(())
}

async fn run(client: &BixyPayClient, email: &str, password: &str) -> Result<(), BoxError> {
    let merchant = step(
        "register",
        client
            .auth()
            .register(email, password, "Test Merchant Corp", Some("123 Test Street"))
            .await,
    )?;
    tracing::info!(id = %merchant["id"], "Merchant registered");

    step("login", client.auth().login(email, password).await)?;
    tracing::info!("Logged in");

    let api_key: ApiKeyCreated = client
        .auth()
        .create_api_key("Production API Key", None)
        .await
        .decode()?;
    let prefix: String = api_key.key.chars().take(12).collect();
    tracing::info!(key_prefix = %prefix, "API key created");

    client.set_api_key(api_key.key);

    let balance: Balance = client.merchants().get_balance().await.decode()?;
    tracing::info!(balance = %balance.balance, currency = %balance.currency, "Balance fetched");

    let invoice: Invoice = client
        .invoices()
        .create(
            &NewInvoice::new(99.99, "USD")
                .with_description("Premium Subscription - Monthly")
                .with_metadata(json!({ "customer_id": "cust_12345", "plan": "premium" }))
                .with_callback_url("https://example.com/webhook"),
        )
        .await
        .decode()?;
    tracing::info!(
        invoice_id = %invoice.invoice_id,
        amount = %invoice.amount,
        currency = %invoice.currency,
        status = %invoice.status,
        "Invoice created"
    );

    let invoices = step(
        "list invoices",
        client
            .invoices()
            .list(Some(&InvoiceQuery::page(1, 10)))
            .await,
    )?;
    let count = invoices.as_array().map_or(0, Vec::len);
    tracing::info!(count, "Invoices listed");

    let webhook: Webhook = client
        .webhooks()
        .create(
            "https://example.com/webhooks/bixypay",
            &["invoice.created", "invoice.completed"],
        )
        .await
        .decode()?;
    tracing::info!(id = %webhook.id, "Webhook created");

    Ok(())
}

fn step(name: &str, envelope: Envelope) -> Result<serde_json::Value, BoxError> {
    envelope.into_result().map_err(|error| {
        tracing::warn!(step = name, error = %error.body, "Step failed");
        error.into()
    })
}
