//! Integration tests for paddle-rs.
//!
//! A local `wiremock` server stands in for Paddle. The checkout and vendor
//! families are mounted under `/checkout` and `/vendor` so that routing by
//! HTTP method is observable.
//!
//! Run with: cargo test --test api_tests
//! Set RUST_LOG=paddle_rs=debug to see request spans.

use std::collections::HashMap;
use std::sync::Once;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use paddle_rs::api::{PricesQuery, UsersQuery, WebhookHistoryQuery};
use paddle_rs::prelude::*;

static INIT: Once = Once::new();

const VENDOR_ID: u64 = 100000;
const AUTH_CODE: &str = "test-auth-code";

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn config_for(server: &MockServer) -> ClientConfig {
    let endpoints = Endpoints::custom(
        &format!("{}/checkout", server.uri()),
        &format!("{}/vendor", server.uri()),
    )
    .expect("mock server URI should be valid");
    ClientConfig::default().with_endpoints(endpoints)
}

/// Create an authenticated client pointed at the mock server
fn create_client(server: &MockServer) -> PaddleClient {
    init_logging();
    PaddleClient::new(Credentials::new(VENDOR_ID, AUTH_CODE), config_for(server))
        .expect("client should build")
}

fn create_unauthenticated_client(server: &MockServer) -> PaddleClient {
    init_logging();
    PaddleClient::unauthenticated(config_for(server)).expect("client should build")
}

fn ok(response: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "response": response }))
}

fn form_of(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

fn query_of(request: &Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

fn prices_body() -> Value {
    json!({
        "customer_country": "GB",
        "products": [{
            "product_id": 1,
            "product_title": "Pro",
            "currency": "GBP",
            "vendor_set_prices_included_tax": false,
            "price": { "gross": 12, "net": 10, "tax": 2 },
            "list_price": { "gross": 12, "net": 10, "tax": 2 }
        }]
    })
}

// =============================================================================
// Credential Injection
// =============================================================================

#[tokio::test]
async fn test_get_without_credentials_sends_no_vendor_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/checkout/2.0/prices"))
        .respond_with(ok(prices_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_unauthenticated_client(&server);
    assert!(!client.is_authenticated());

    let prices = client
        .checkout()
        .prices(&PricesQuery::new([ProductId::new(1), ProductId::new(2)]).customer_country("GB"))
        .await
        .expect("unauthenticated GET should succeed");
    assert_eq!(prices.customer_country, "GB");
    assert_eq!(prices.products[0].price.net, dec!(10));

    let query = query_of(&only_request(&server).await);
    assert_eq!(query.get("product_ids").map(String::as_str), Some("1,2"));
    assert_eq!(query.get("customer_country").map(String::as_str), Some("GB"));
    assert!(!query.contains_key("vendor_id"));
    assert!(!query.contains_key("vendor_auth_code"));
}

#[tokio::test]
async fn test_get_with_credentials_injects_vendor_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/checkout/1.0/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "processing",
            "checkout": { "checkout_id": "abc-123" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let details = client.checkout().order_details("abc-123").await.unwrap();
    assert!(!details.is_processed());
    assert!(details.order.is_none());

    let query = query_of(&only_request(&server).await);
    assert_eq!(query.get("checkout_id").map(String::as_str), Some("abc-123"));
    assert_eq!(query.get("vendor_id").map(String::as_str), Some("100000"));
    assert_eq!(query.get("vendor_auth_code").map(String::as_str), Some(AUTH_CODE));
}

#[tokio::test]
async fn test_post_sends_signed_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/product/get_products"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ok(json!({
            "total": 1,
            "count": 1,
            "products": [{
                "id": 489171,
                "name": "A Product",
                "description": null,
                "base_price": 58,
                "sale_price": null,
                "screenshots": [],
                "icon": null,
                "currency": "USD"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let products = client.product().list_products().await.unwrap();
    assert_eq!(products.total, 1);
    assert_eq!(products.products[0].base_price, dec!(58));

    let form = form_of(&only_request(&server).await);
    assert_eq!(form.len(), 2);
    assert_eq!(form["vendor_id"], "100000");
    assert_eq!(form["vendor_auth_code"], AUTH_CODE);
}

#[tokio::test]
async fn test_caller_supplied_credentials_win() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/product/list_coupons"))
        .respond_with(ok(json!([])))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let coupons: Vec<Value> = client
        .execute(
            HttpMethod::Post,
            "/2.0/product/list_coupons",
            &json!({ "product_id": 1, "vendor_id": 7 }),
        )
        .await
        .unwrap();
    assert!(coupons.is_empty());

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["vendor_id"], "7");
    assert_eq!(form["vendor_auth_code"], AUTH_CODE);
}

#[tokio::test]
async fn test_post_without_credentials_never_reaches_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_unauthenticated_client(&server);
    let err = client.product().list_products().await.unwrap_err();
    assert!(err.is_auth_error());

    // A vendor id alone is not enough
    let half = client.with_credentials(Credentials::from_parts(Some(VENDOR_ID), None));
    let err = half.subscription().list_plans(None).await.unwrap_err();
    assert!(matches!(err, Error::AuthenticationRequired));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

// =============================================================================
// Response Handling
// =============================================================================

#[tokio::test]
async fn test_server_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "success": true, "response": {} })),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client.product().list_products().await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 500 }));
}

#[tokio::test]
async fn test_non_200_success_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client
        .subscription()
        .cancel_user(SubscriptionId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http { status: 201 }));
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = create_unauthenticated_client(&server);
    let err = client.checkout().order_details("x").await.unwrap_err();
    match err {
        Error::MalformedResponse { body } => assert_eq!(body, "<html>maintenance</html>"),
        other => panic!("Expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_remote_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/product/delete_coupon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "message": "bad coupon", "code": 123 }
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client
        .product()
        .delete_coupon("NOPE", None)
        .await
        .unwrap_err();

    assert!(err.is_remote_error());
    assert_eq!(err.remote_code(), Some(123));
    match err {
        Error::RemoteApi { code, message } => {
            assert_eq!(code, 123);
            assert_eq!(message, "bad coupon");
        }
        other => panic!("Expected RemoteApi, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrapped_and_bare_payloads_decode_alike() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/checkout/wrapped"))
        .respond_with(ok(json!({ "id": 42 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/checkout/bare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
        .mount(&server)
        .await;

    let client = create_unauthenticated_client(&server);
    let wrapped: Value = client.execute(HttpMethod::Get, "/wrapped", &()).await.unwrap();
    let bare: Value = client.execute(HttpMethod::Get, "bare", &()).await.unwrap();

    assert_eq!(wrapped, json!({ "id": 42 }));
    assert_eq!(bare, wrapped);
}

#[tokio::test]
async fn test_success_only_endpoint_returns_unit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/subscription/users_cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client
        .subscription()
        .cancel_user(SubscriptionId::new(4125))
        .await
        .unwrap();

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["subscription_id"], "4125");
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok(json!({})).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    init_logging();
    let client = PaddleClient::unauthenticated(
        config_for(&server).with_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let err = client.checkout().order_details("slow").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_timeout());
}

// =============================================================================
// Services
// =============================================================================

#[tokio::test]
async fn test_generate_pay_link_form_encoding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/product/generate_pay_link"))
        .respond_with(ok(json!({ "url": "https://checkout.paddle.com/checkout/custom/abc" })))
        .expect(1)
        .mount(&server)
        .await;

    let link = PayLinkBuilder::custom("Consulting", "https://example.com/hook")
        .price(Price::new(Currency::Usd, dec!(9.99)))
        .price(Price::new(Currency::Gbp, dec!(7.50)))
        .quantity(0)
        .discountable(false)
        .build()
        .unwrap();

    let client = create_client(&server);
    let url = client.product().generate_pay_link(&link).await.unwrap();
    assert!(url.url.ends_with("/abc"));

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["title"], "Consulting");
    assert_eq!(form["webhook_url"], "https://example.com/hook");
    assert_eq!(form["prices[0]"], "USD:9.99");
    assert_eq!(form["prices[1]"], "GBP:7.50");
    assert_eq!(form["quantity"], "1");
    assert_eq!(form["discountable"], "0");
    assert!(!form.contains_key("product_id"));
    assert!(!form.contains_key("recurring_prices[0]"));
}

#[tokio::test]
async fn test_create_coupon() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.1/product/create_coupon"))
        .respond_with(ok(json!({ "coupon_code": ["LAUNCH-1", "LAUNCH-2"] })))
        .expect(1)
        .mount(&server)
        .await;

    let coupon = NewCouponBuilder::new(CouponType::Product, DiscountType::Flat, dec!(5))
        .product(ProductId::new(10))
        .product(ProductId::new(11))
        .currency(Currency::Eur)
        .coupon_prefix("LAUNCH")
        .num_coupons(2)
        .expires(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
        .build()
        .unwrap();

    let client = create_client(&server);
    let created = client.product().create_coupon(&coupon).await.unwrap();
    assert_eq!(created.coupon_code, vec!["LAUNCH-1", "LAUNCH-2"]);

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["product_ids"], "10,11");
    assert_eq!(form["discount_type"], "flat");
    assert_eq!(form["currency"], "EUR");
    assert_eq!(form["allowed_uses"], "999999");
    assert_eq!(form["expires"], "2030-01-01");
}

#[tokio::test]
async fn test_list_transactions_path_and_default_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/subscription/502198/transactions"))
        .respond_with(ok(json!([{
            "order_id": "1042907-384786",
            "checkout_id": "4795118-chre8a807e9d8ee-b86e4ca3c4",
            "amount": "5.00",
            "currency": "USD",
            "status": "completed",
            "created_at": "2017-12-07 23:28:07",
            "is_subscription": true,
            "is_one_off": false
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let transactions = client
        .product()
        .list_transactions(TransactionEntity::Subscription, "502198", None)
        .await
        .unwrap();
    assert_eq!(transactions.len(), 1);
    assert!(transactions[0].is_subscription);

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["page"], "1");
}

#[tokio::test]
async fn test_list_transactions_keeps_id_in_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!([])))
        .mount(&server)
        .await;

    let client = create_client(&server);
    client
        .product()
        .list_transactions(TransactionEntity::Order, "1/../../payment/refund?", None)
        .await
        .unwrap();

    let request = only_request(&server).await;
    assert_eq!(
        request.url.path(),
        "/vendor/2.0/order/1%2F%2E%2E%2F%2E%2E%2Fpayment%2Frefund%3F/transactions"
    );
    assert!(request.url.query().is_none());

    // Dot segments would be resolved away, so nothing is sent for them.
    for id in ["", "..", "."] {
        let err = client
            .product()
            .list_transactions(TransactionEntity::Order, id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_refund_payment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/payment/refund"))
        .respond_with(ok(json!({ "refund_request_id": 12345 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let refund = client
        .product()
        .refund_payment(&OrderId::new("1042907-384786"), Some(dec!(2.50)), None)
        .await
        .unwrap();
    assert_eq!(refund.refund_request_id, 12345);

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["order_id"], "1042907-384786");
    assert_eq!(form["amount"], "2.50");
    assert!(!form.contains_key("reason"));
}

#[tokio::test]
async fn test_list_users_coerces_paging() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/subscription/users"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let query = UsersQuery::default()
        .plan(ProductId::new(9092))
        .page(0)
        .results_per_page(1000);
    let users = client.subscription().list_users(&query).await.unwrap();
    assert!(users.is_empty());

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["plan_id"], "9092");
    assert_eq!(form["page"], "1");
    assert_eq!(form["results_per_page"], "1");
}

#[tokio::test]
async fn test_list_users_default_paging() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/subscription/users"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client
        .subscription()
        .list_users(&UsersQuery::default())
        .await
        .unwrap();

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["page"], "1");
    assert_eq!(form["results_per_page"], "1");
}

#[tokio::test]
async fn test_one_off_charge_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/subscription/4125/charge"))
        .respond_with(ok(json!({
            "invoice_id": 1,
            "subscription_id": 4125,
            "amount": "10.00",
            "currency": "USD",
            "payment_date": "2024-02-01",
            "receipt_url": null,
            "order_id": "1-1",
            "status": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let charge = client
        .subscription()
        .create_one_off_charge(SubscriptionId::new(4125), dec!(10.00), "Setup fee")
        .await
        .unwrap();
    assert_eq!(charge.amount, dec!(10.00));

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["charge_name"], "Setup fee");
    assert_eq!(form["amount"], "10.00");
}

#[tokio::test]
async fn test_webhook_history_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vendor/2.0/alert/webhooks"))
        .respond_with(ok(json!({
            "current_page": 1,
            "total_pages": 1,
            "alerts_per_page": 10,
            "total_alerts": 0,
            "query_head": "2024-01-01 00:00:00",
            "data": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let history = client
        .alert()
        .webhook_history(&WebhookHistoryQuery::default())
        .await
        .unwrap();
    assert!(!history.has_more());

    let form = form_of(&only_request(&server).await);
    assert_eq!(form["page"], "1");
    assert_eq!(form["alerts_per_page"], "10");
}

#[tokio::test]
async fn test_environment_switch_keeps_credentials() {
    let server = MockServer::start().await;
    let client = create_client(&server);

    let sandbox = client.with_environment(Environment::Sandbox);
    assert!(sandbox.is_authenticated());
    assert_eq!(
        sandbox.config().endpoints().vendor(),
        "https://sandbox-vendors.paddle.com/api"
    );

    let production = sandbox.with_environment(Environment::Production);
    assert_eq!(
        production.config().endpoints(),
        &Endpoints::for_environment(Environment::Production)
    );
}
