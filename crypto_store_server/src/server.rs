use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use crypto_store_engine::{CatalogApi, DashboardApi, OrderFlowApi, SqliteDatabase};

use crate::{
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    expiry_worker::start_expiry_worker,
    routes::{
        health,
        CheckoutRoute,
        DashboardSummaryRoute,
        PaymentStatusRoute,
        ProductCreateRoute,
        ProductListRoute,
        StoreDiagnosticsRoute,
        WebhookMockRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    SqliteDatabase::create_database_if_missing(&config.database_url)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let _expiry_handle = start_expiry_worker(db.clone());
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let options = ServerOptions::from_config(&config);
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let order_flow_api = OrderFlowApi::new(db.clone());
        let dashboard_api = DashboardApi::new(db.clone());
        let options = options.clone();
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("css::access_log"))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(order_flow_api))
            .app_data(web::Data::new(dashboard_api))
            .app_data(web::Data::new(options))
            .service(health)
            .service(StoreDiagnosticsRoute::<SqliteDatabase>::new())
            .service(ProductListRoute::<SqliteDatabase>::new())
            .service(ProductCreateRoute::<SqliteDatabase>::new())
            .service(CheckoutRoute::<SqliteDatabase>::new())
            .service(PaymentStatusRoute::<SqliteDatabase>::new())
            .service(WebhookMockRoute::<SqliteDatabase>::new())
            .service(DashboardSummaryRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
