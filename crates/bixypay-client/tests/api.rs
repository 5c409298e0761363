//! End-to-end tests for every facade against a mock BixyPay server.

use bixypay_client::{BixyPayClient, ClientConfig, Envelope, InvoiceQuery, NewInvoice};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

async fn setup() -> (MockServer, BixyPayClient) {
    let server = MockServer::start().await;
    let client = BixyPayClient::new(format!("{}/", server.uri())).expect("client");
    (server, client)
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

fn assert_exactly_one(envelope: &Envelope) {
    assert!(envelope.data().is_some() ^ envelope.error().is_some());
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn register_omits_missing_business_address() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "test@example.com",
            "password": "SecurePassword123!",
            "businessName": "Test Merchant Corp"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "m_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .auth()
        .register("test@example.com", "SecurePassword123!", "Test Merchant Corp", None)
        .await;

    assert_exactly_one(&envelope);
    assert_eq!(envelope.data(), Some(&json!({ "id": "m_1" })));
}

#[tokio::test]
async fn register_sends_business_address() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .and(body_json(json!({
            "email": "test@example.com",
            "password": "pw",
            "businessName": "Acme",
            "businessAddress": "123 Test Street"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "m_2" })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .auth()
        .register("test@example.com", "pw", "Acme", Some("123 Test Street"))
        .await;
    assert!(envelope.is_ok());
}

#[tokio::test]
async fn login_token_is_sent_on_later_calls() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({ "email": "a@b.c", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-abc",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/merchants/profile"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "m_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let login = client.auth().login("a@b.c", "pw").await;
    assert!(login.is_ok());
    assert_eq!(client.jwt_token().as_deref(), Some("jwt-abc"));

    let profile = client.merchants().get_profile().await;
    assert_eq!(profile.data(), Some(&json!({ "id": "m_1" })));
}

#[tokio::test]
async fn login_without_token_leaves_credentials_untouched() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "mfa_required": true })))
        .mount(&server)
        .await;

    let envelope = client.auth().login("a@b.c", "pw").await;
    assert!(envelope.is_ok());
    assert!(client.jwt_token().is_none());
}

#[tokio::test]
async fn failed_login_surfaces_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let envelope = client.auth().login("a@b.c", "wrong").await;

    assert_exactly_one(&envelope);
    let error = envelope.error().expect("error envelope");
    assert_eq!(error.status, Some(401));
    assert_eq!(error.body, json!({ "message": "Invalid credentials" }));
    assert!(client.jwt_token().is_none());
}

#[tokio::test]
async fn create_api_key_defaults_scopes_to_empty() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/api-keys"))
        .and(body_json(json!({ "name": "Production API Key", "scopes": [] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "key": "bxp_live_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .auth()
        .create_api_key("Production API Key", None)
        .await;
    let created: bixypay_client::ApiKeyCreated = envelope.decode().expect("api key");
    assert_eq!(created.key, "bxp_live_1");
}

#[tokio::test]
async fn create_api_key_sends_scopes() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/api-keys"))
        .and(body_json(json!({
            "name": "ci",
            "scopes": ["invoices:read", "invoices:write"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "key": "bxp_ci" })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .auth()
        .create_api_key("ci", Some(&["invoices:read", "invoices:write"][..]))
        .await;
    assert!(envelope.is_ok());
}

#[tokio::test]
async fn list_and_revoke_api_keys() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/api-keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "key_1" }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/auth/api-keys/key_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let listed = client.auth().list_api_keys().await;
    assert_eq!(listed.data(), Some(&json!([{ "id": "key_1" }])));

    let revoked = client.auth().revoke_api_key("key_1").await;
    assert_eq!(revoked, Envelope::Data(Value::Null));
}

// ============================================================================
// Credentials
// ============================================================================

#[tokio::test]
async fn api_key_header_is_sent_after_set() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/merchants/balance"))
        .and(header("x-api-key", "bxp_live_1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "balance": 10.5, "currency": "USD" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.set_api_key("bxp_live_1");
    let balance: bixypay_client::Balance = client
        .merchants()
        .get_balance()
        .await
        .decode()
        .expect("balance");
    assert_eq!(balance.currency, "USD");
}

#[tokio::test]
async fn no_credentials_means_no_auth_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client.webhooks().list().await;

    let request = only_request(&server).await;
    assert!(!request.headers.contains_key("x-api-key"));
    assert!(!request.headers.contains_key("authorization"));
    assert_eq!(
        request.headers.get("content-type").map(|v| v.as_bytes()),
        Some(&b"application/json"[..])
    );
}

#[tokio::test]
async fn both_credentials_are_sent_together() {
    let server = MockServer::start().await;
    let client = BixyPayClient::with_config(
        ClientConfig::new(server.uri())
            .with_api_key("bxp_key")
            .with_jwt_token("jwt-1"),
    )
    .expect("client");

    Mock::given(method("GET"))
        .and(path("/api/v1/merchants/profile"))
        .and(header("x-api-key", "bxp_key"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.merchants().get_profile().await.is_ok());
}

// ============================================================================
// Merchants
// ============================================================================

#[tokio::test]
async fn update_kyc_status_patches() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/merchants/kyc"))
        .and(body_json(json!({ "status": "verified" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "kycStatus": "verified" })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client.merchants().update_kyc_status("verified").await;
    assert_eq!(envelope.data(), Some(&json!({ "kycStatus": "verified" })));
}

// ============================================================================
// Invoices
// ============================================================================

#[tokio::test]
async fn create_invoice_with_arbitrary_payload() {
    let (server, client) = setup().await;

    let payload = json!({
        "amount": 99.99,
        "currency": "USD",
        "metadata": { "customer_id": "cust_12345", "plan": "premium" },
        "customField": [1, 2, 3]
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/transactions/invoices"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "invoiceId": "inv_1",
            "amount": 99.99,
            "currency": "USD",
            "status": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invoice: bixypay_client::Invoice = client
        .invoices()
        .create(&payload)
        .await
        .decode()
        .expect("invoice");
    assert_eq!(invoice.invoice_id, "inv_1");
    assert_eq!(invoice.status, "pending");
}

#[tokio::test]
async fn create_invoice_from_typed_shape() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/transactions/invoices"))
        .and(body_json(json!({
            "amount": 25.0,
            "currency": "EUR",
            "description": "Premium Subscription - Monthly",
            "callbackUrl": "https://example.com/webhook"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "invoiceId": "inv_2" })))
        .expect(1)
        .mount(&server)
        .await;

    let invoice = NewInvoice::new(25.0, "EUR")
        .with_description("Premium Subscription - Monthly")
        .with_callback_url("https://example.com/webhook");
    assert!(client.invoices().create(&invoice).await.is_ok());
}

#[tokio::test]
async fn get_invoice_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/invoices/inv_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "invoiceId": "inv_42" })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client.invoices().get("inv_42").await;
    assert_eq!(envelope.data(), Some(&json!({ "invoiceId": "inv_42" })));
}

#[tokio::test]
async fn list_invoices_sends_query_not_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/invoices"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "invoiceId": "inv_1" }])))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .invoices()
        .list(Some(&InvoiceQuery::page(1, 10)))
        .await;
    assert!(envelope.is_ok());

    let request = only_request(&server).await;
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn list_invoices_without_params_has_no_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/invoices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.invoices().list(None).await.is_ok());

    let request = only_request(&server).await;
    assert!(request.url.query().is_none());
}

#[tokio::test]
async fn update_invoice_status_with_and_without_tx_hash() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/transactions/invoices/inv_1/status"))
        .and(body_json(json!({ "status": "completed", "txHash": "0xabc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "completed" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/transactions/invoices/inv_2/status"))
        .and(body_json(json!({ "status": "cancelled" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "cancelled" })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client
        .invoices()
        .update_status("inv_1", "completed", Some("0xabc"))
        .await
        .is_ok());
    assert!(client
        .invoices()
        .update_status("inv_2", "cancelled", None)
        .await
        .is_ok());
}

// ============================================================================
// Webhooks
// ============================================================================

#[tokio::test]
async fn create_webhook_sends_url_and_events() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/webhooks"))
        .and(body_json(json!({
            "url": "https://example.com/webhooks/bixypay",
            "events": ["invoice.created", "invoice.completed"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "wh_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let webhook: bixypay_client::Webhook = client
        .webhooks()
        .create(
            "https://example.com/webhooks/bixypay",
            &["invoice.created", "invoice.completed"],
        )
        .await
        .decode()
        .expect("webhook");
    assert_eq!(webhook.id, "wh_1");
}

#[tokio::test]
async fn delete_webhook_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/webhooks/wh_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": true })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client.webhooks().delete("wh_1").await;
    assert_eq!(envelope.data(), Some(&json!({ "deleted": true })));
}

// ============================================================================
// Error normalization
// ============================================================================

#[tokio::test]
async fn non_json_error_becomes_generic_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/merchants/balance"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let envelope = client.merchants().get_balance().await;

    assert_exactly_one(&envelope);
    let error = envelope.error().expect("error envelope");
    assert_eq!(error.status, Some(500));
    assert_eq!(
        error.body,
        json!({ "message": "HTTP 500 Internal Server Error" })
    );
}

#[tokio::test]
async fn empty_error_body_becomes_generic_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/webhooks/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let envelope = client.webhooks().delete("missing").await;
    let error = envelope.error().expect("error envelope");
    assert_eq!(error.status, Some(404));
    assert_eq!(error.message(), Some("HTTP 404 Not Found"));
}

#[tokio::test]
async fn invalid_json_on_success_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/merchants/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let envelope = client.merchants().get_profile().await;

    assert_exactly_one(&envelope);
    let error = envelope.error().expect("error envelope");
    assert_eq!(error.status, Some(200));
    assert!(error
        .message()
        .expect("message")
        .starts_with("serialization error"));
}

#[tokio::test]
async fn envelope_serializes_with_both_slots() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Forbidden", "code": 403 })),
        )
        .mount(&server)
        .await;

    let envelope = client.webhooks().list().await;
    assert_eq!(
        serde_json::to_value(&envelope).expect("serialize"),
        json!({ "data": null, "error": { "message": "Forbidden", "code": 403 } })
    );
}
