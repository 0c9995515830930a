use actix_web::{http::StatusCode, web, web::ServiceConfig};
use css_common::Secret;
use crypto_store_engine::{db_types::IntentStatus, ConfirmationOutcome, OrderFlowApi, StorefrontError};
use serde_json::json;

use crate::{
    config::ServerOptions,
    endpoint_tests::{
        helpers::{post_request, sample_intent, sample_order},
        mocks::MockStorefront,
    },
    routes::WebhookMockRoute,
};

const WEBHOOK_PATH: &str = "/webhook/mock/crypto";
const TEST_SECRET: &str = "demo-secret";

fn configure(mock: MockStorefront) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = OrderFlowApi::new(mock);
        let options = ServerOptions { webhook_secret: Secret::new(TEST_SECRET.to_string()) };
        cfg.app_data(web::Data::new(api))
            .app_data(web::Data::new(options))
            .service(WebhookMockRoute::<MockStorefront>::new());
    }
}

#[actix_web::test]
async fn confirmation_creates_an_order() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_confirm_intent().withf(|id| *id == 5).returning(|id| {
        let intent = sample_intent(id, IntentStatus::Confirmed);
        let order = sample_order(10, id, intent.amount_usd);
        Ok(ConfirmationOutcome::Confirmed { intent, order })
    });
    let req = json!({"intent_id": "5", "secret": TEST_SECRET});
    let (status, body) = post_request(WEBHOOK_PATH, req, configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"confirmed","order_id":10}"#);
}

#[actix_web::test]
async fn repeat_confirmation_is_acknowledged_without_a_new_order() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_confirm_intent().returning(|_| Ok(ConfirmationOutcome::AlreadyConfirmed));
    let req = json!({"intent_id": "5", "secret": TEST_SECRET});
    let (status, body) = post_request(WEBHOOK_PATH, req, configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"already_confirmed"}"#);
}

#[actix_web::test]
async fn expired_intents_are_not_confirmable() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_confirm_intent().returning(|_| Ok(ConfirmationOutcome::Expired));
    let req = json!({"intent_id": "5", "secret": TEST_SECRET});
    let (status, body) = post_request(WEBHOOK_PATH, req, configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"expired"}"#);
}

#[actix_web::test]
async fn wrong_secret_is_rejected_before_touching_the_store() {
    let _ = env_logger::try_init();
    // No expectations: a call with a bad secret must never reach the backend
    let mock = MockStorefront::new();
    let req = json!({"intent_id": "5", "secret": "let-me-in"});
    let (status, body) = post_request(WEBHOOK_PATH, req, configure(mock)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Unauthorized"));
}

#[actix_web::test]
async fn unknown_intent_is_404() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_confirm_intent().returning(|id| Err(StorefrontError::IntentNotFound(id)));
    let req = json!({"intent_id": "99", "secret": TEST_SECRET});
    let (status, _body) = post_request(WEBHOOK_PATH, req, configure(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn non_numeric_intent_id_is_400() {
    let _ = env_logger::try_init();
    let mock = MockStorefront::new();
    let req = json!({"intent_id": "not-an-id", "secret": TEST_SECRET});
    let (status, _body) = post_request(WEBHOOK_PATH, req, configure(mock)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
