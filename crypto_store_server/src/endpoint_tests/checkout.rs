use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use crypto_store_engine::{db_types::IntentStatus, OrderFlowApi};
use serde_json::json;

use crate::{
    endpoint_tests::{
        helpers::{get_request, post_request, sample_intent, sample_product},
        mocks::MockStorefront,
    },
    routes::{CheckoutRoute, PaymentStatusRoute},
};

fn configure(mock: MockStorefront) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = OrderFlowApi::new(mock);
        cfg.app_data(web::Data::new(api))
            .service(CheckoutRoute::<MockStorefront>::new())
            .service(PaymentStatusRoute::<MockStorefront>::new());
    }
}

#[actix_web::test]
async fn checkout_creates_a_pending_intent() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_fetch_product_by_id()
        .withf(|id| *id == 1)
        .returning(|id| Ok(Some(sample_product(id, "Hardware wallet", 120.0, true))));
    mock.expect_insert_intent().returning(|new| {
        let now = Utc::now();
        Ok(crypto_store_engine::db_types::PaymentIntent {
            id: 42,
            product_id: new.product_id,
            product_title: new.product_title,
            amount_usd: new.amount_usd,
            currency: new.currency,
            address: new.address,
            amount_crypto: new.amount_crypto,
            status: IntentStatus::Pending,
            buyer_email: new.buyer_email,
            expires_at: new.expires_at,
            confirmed_at: None,
            created_at: now,
            updated_at: now,
        })
    });
    let req = json!({"product_id": "1", "currency": "btc", "buyer_email": "alice@example.com"});
    let (status, body) = post_request("/checkout", req, configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    let intent: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(intent["intent_id"], 42);
    assert_eq!(intent["currency"], "BTC");
    assert_eq!(intent["amount_usd"], 120.0);
    // $120 at the fixed $60,000/BTC rate
    assert_eq!(intent["amount_crypto"], 0.002);
    let address = intent["address"].as_str().unwrap();
    assert!(address.starts_with("BTC_"));
    assert_eq!(address.len(), 38);
}

#[actix_web::test]
async fn checkout_defaults_to_usdc() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_fetch_product_by_id()
        .returning(|id| Ok(Some(sample_product(id, "Sticker pack", 4.5, true))));
    mock.expect_insert_intent().returning(|new| {
        let mut intent = sample_intent(43, IntentStatus::Pending);
        intent.currency = new.currency;
        intent.address = new.address;
        intent.amount_usd = new.amount_usd;
        intent.amount_crypto = new.amount_crypto;
        Ok(intent)
    });
    let req = json!({"product_id": "2"});
    let (status, body) = post_request("/checkout", req, configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    let intent: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(intent["currency"], "USDC");
    // Stablecoins convert 1:1
    assert_eq!(intent["amount_crypto"], 4.5);
}

#[actix_web::test]
async fn checkout_for_a_missing_product_is_404() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_fetch_product_by_id().returning(|_| Ok(None));
    let req = json!({"product_id": "9999"});
    let (status, body) = post_request("/checkout", req, configure(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("error"));
}

#[actix_web::test]
async fn checkout_with_an_unparseable_product_id_is_404() {
    let _ = env_logger::try_init();
    // No expectations: the request must be rejected before the store is touched
    let mock = MockStorefront::new();
    let req = json!({"product_id": "not-a-real-id"});
    let (status, _body) = post_request("/checkout", req, configure(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn checkout_with_an_unsupported_currency_is_400() {
    let _ = env_logger::try_init();
    let mock = MockStorefront::new();
    let req = json!({"product_id": "1", "currency": "DOGE"});
    let (status, _body) = post_request("/checkout", req, configure(mock)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn payment_status_reports_the_intent_snapshot() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_fetch_intent_by_id()
        .withf(|id| *id == 7)
        .returning(|_| Ok(Some(sample_intent(7, IntentStatus::Pending))));
    let (status, body) = get_request("/payments/7", configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    let intent: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(intent["intent_id"], 7);
    assert_eq!(intent["status"], "pending");
    assert_eq!(intent["product_title"], "Hardware wallet");
    // Unset optional fields are omitted rather than rendered as null
    assert!(intent.get("buyer_email").is_none());
    assert!(intent.get("confirmed_at").is_none());
}

#[actix_web::test]
async fn payment_status_for_a_missing_intent_is_404() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_fetch_intent_by_id().returning(|_| Ok(None));
    let (status, _body) = get_request("/payments/999", configure(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn payment_status_with_a_non_numeric_id_is_400() {
    let _ = env_logger::try_init();
    let mock = MockStorefront::new();
    let (status, body) = get_request("/payments/deadbeef", configure(mock)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid identifier"));
}
