use actix_web::{http::StatusCode, web, web::ServiceConfig};
use crypto_store_engine::CatalogApi;
use serde_json::json;

use crate::{
    endpoint_tests::{
        helpers::{get_request, post_request, sample_product},
        mocks::MockStorefront,
    },
    routes::{ProductCreateRoute, ProductListRoute},
};

fn configure(mock: MockStorefront) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = CatalogApi::new(mock);
        cfg.app_data(web::Data::new(api))
            .service(ProductListRoute::<MockStorefront>::new())
            .service(ProductCreateRoute::<MockStorefront>::new());
    }
}

#[actix_web::test]
async fn product_list_hides_internal_ids() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_fetch_active_products().returning(|| {
        Ok(vec![sample_product(1, "Hardware wallet", 120.0, true), sample_product(2, "Sticker pack", 4.5, true)])
    });
    let (status, body) = get_request("/products", configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    let products: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(products.as_array().unwrap().len(), 2);
    assert_eq!(products[0]["title"], "Hardware wallet");
    assert_eq!(products[0]["price_usd"], 120.0);
    assert_eq!(products[1]["title"], "Sticker pack");
    // The store row id must never leak to the storefront
    assert!(products[0].get("id").is_none());
    assert!(products[1].get("id").is_none());
}

#[actix_web::test]
async fn product_list_can_be_empty() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_fetch_active_products().returning(|| Ok(Vec::new()));
    let (status, body) = get_request("/products", configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn product_create_returns_the_new_id() {
    let _ = env_logger::try_init();
    let mut mock = MockStorefront::new();
    mock.expect_insert_product().returning(|new| {
        let mut product = sample_product(7, &new.title, new.price_usd, new.active);
        product.description = new.description;
        Ok(product)
    });
    let req = json!({"title": "Node voucher", "price_usd": 25.0});
    let (status, body) = post_request("/products", req, configure(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"id":7}"#);
}
