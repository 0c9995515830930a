use actix_web::{http::StatusCode, web, web::ServiceConfig};
use crypto_store_engine::DashboardApi;

use crate::{
    endpoint_tests::{
        helpers::{get_request, sample_order},
        mocks::MockStorefront,
    },
    routes::DashboardSummaryRoute,
};

fn configure(mock: MockStorefront) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = DashboardApi::new(mock);
        cfg.app_data(web::Data::new(api)).service(DashboardSummaryRoute::<MockStorefront>::new());
    }
}

#[actix_web::test]
async fn summary_reports_counts_revenue_and_recent_orders() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_count_products().returning(|| Ok(3));
    mock.expect_count_orders().returning(|| Ok(2));
    mock.expect_total_revenue().returning(|| Ok(124.5004));
    mock.expect_fetch_recent_orders()
        .withf(|limit| *limit == 5)
        .returning(|_| Ok(vec![sample_order(2, 8, 120.0), sample_order(1, 3, 4.5)]));
    let (status, body) = get_request("/dashboard/summary", configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    let summary: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(summary["total_products"], 3);
    assert_eq!(summary["total_orders"], 2);
    // Revenue is rounded to cents
    assert_eq!(summary["total_revenue"], 124.5);
    let orders = summary["recent_orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["intent_id"], 8);
    assert_eq!(orders[1]["intent_id"], 3);
    // Order row ids stay internal
    assert!(orders[0].get("id").is_none());
}

#[actix_web::test]
async fn summary_of_an_empty_store_is_all_zeroes() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_count_products().returning(|| Ok(0));
    mock.expect_count_orders().returning(|| Ok(0));
    mock.expect_total_revenue().returning(|| Ok(0.0));
    mock.expect_fetch_recent_orders().returning(|_| Ok(Vec::new()));
    let (status, body) = get_request("/dashboard/summary", configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    let summary: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(summary["total_orders"], 0);
    assert_eq!(summary["total_revenue"], 0.0);
    assert!(summary["recent_orders"].as_array().unwrap().is_empty());
}
