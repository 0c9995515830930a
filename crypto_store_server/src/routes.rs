//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the storage backend so that endpoint tests can run them against mock stores;
//! actix cannot register generic handlers directly, so the `route!` macro emits a concrete
//! `HttpServiceFactory` per handler.
use std::env;

use actix_web::{get, web, HttpResponse, Responder};
use css_common::CryptoCurrency;
use crypto_store_engine::{
    db_types::NewProduct,
    CatalogApi,
    CatalogManagement,
    ConfirmationOutcome,
    DashboardApi,
    OrderFlowApi,
    OrderManagement,
    PaymentStoreDatabase,
};
use log::*;

use crate::{
    config::ServerOptions,
    data_objects::{
        CheckoutRequest,
        CheckoutResponse,
        HealthResponse,
        PaymentStatusResponse,
        ProductCreatedResponse,
        PublicProduct,
        StoreDiagnostics,
        WebhookMockRequest,
        WebhookResponse,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>);}
        paste::paste! { impl<B> [<$name:camel Route>]<B> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> B>)
            }
        }}
        paste::paste! { impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
        where
            B: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<B>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().json(HealthResponse::default())
}

// --------------------------------------------   Diagnostics  -------------------------------------------------
route!(store_diagnostics => Get "/test" impl PaymentStoreDatabase, CatalogManagement);
/// Store connectivity diagnostic. This is the only handler that swallows backend errors: failures are
/// rendered as degraded status strings in the response body instead of error responses.
pub async fn store_diagnostics<B>(api: web::Data<OrderFlowApi<B>>) -> HttpResponse
where B: PaymentStoreDatabase + CatalogManagement {
    trace!("💻️ Received store diagnostics request");
    let mut diagnostics = StoreDiagnostics::default();
    if env::var("DATABASE_URL").is_ok() {
        diagnostics.database_url = "set".to_string();
    }
    diagnostics.database_name = Some(api.db().url().to_string());
    match api.db().table_names().await {
        Ok(tables) => {
            diagnostics.database = "connected & working".to_string();
            diagnostics.connection_status = "connected".to_string();
            diagnostics.collections = tables.into_iter().take(10).collect();
        },
        Err(e) => {
            let mut msg = e.to_string();
            msg.truncate(80);
            diagnostics.database = format!("error: {msg}");
        },
    }
    HttpResponse::Ok().json(diagnostics)
}

// ----------------------------------------------   Catalog  ---------------------------------------------------
route!(product_list => Get "/products" impl CatalogManagement);
pub async fn product_list<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET product list");
    let products = api.active_products().await?.into_iter().map(PublicProduct::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(products))
}

route!(product_create => Post "/products" impl CatalogManagement);
pub async fn product_create<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
    body: web::Json<NewProduct>,
) -> Result<HttpResponse, ServerError> {
    let product = api.create_product(body.into_inner()).await?;
    debug!("💻️ Product {} created", product.id);
    Ok(HttpResponse::Ok().json(ProductCreatedResponse { id: product.id }))
}

// ----------------------------------------------   Checkout  --------------------------------------------------
route!(checkout => Post "/checkout" impl PaymentStoreDatabase, CatalogManagement);
/// Creates a pending payment intent for a product.
///
/// The product is resolved strictly: a `product_id` that does not parse, or parses but matches no stored
/// product, is a 404. An unsupported currency code is a 400. The currency code is normalised to uppercase
/// before matching.
pub async fn checkout<B>(
    api: web::Data<OrderFlowApi<B>>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, ServerError>
where B: PaymentStoreDatabase + CatalogManagement {
    let req = body.into_inner();
    let product_id = req.product_id.parse::<i64>().map_err(|e| {
        debug!("💻️ Checkout with unparseable product id [{}]. {e}", req.product_id);
        ServerError::NoRecordFound(format!("Product {} does not exist", req.product_id))
    })?;
    let currency = req
        .currency
        .parse::<CryptoCurrency>()
        .map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?;
    let intent = api.checkout(product_id, currency, req.buyer_email).await?;
    Ok(HttpResponse::Ok().json(CheckoutResponse::from(intent)))
}

route!(payment_status => Get "/payments/{intent_id}" impl PaymentStoreDatabase, CatalogManagement);
pub async fn payment_status<B>(
    api: web::Data<OrderFlowApi<B>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServerError>
where B: PaymentStoreDatabase + CatalogManagement {
    let id = path.into_inner();
    trace!("💻️ GET payment status for {id}");
    let intent_id = id.parse::<i64>().map_err(|_| ServerError::InvalidId(id))?;
    let intent = api.payment_status(intent_id).await?;
    Ok(HttpResponse::Ok().json(PaymentStatusResponse::from(intent)))
}

// ----------------------------------------------   Webhook  ---------------------------------------------------
route!(webhook_mock => Post "/webhook/mock/crypto" impl PaymentStoreDatabase, CatalogManagement);
/// The mock payment confirmation webhook. A trusted caller presents the shared secret to mark an intent as
/// paid; the order is materialised as part of the same confirmation.
pub async fn webhook_mock<B>(
    api: web::Data<OrderFlowApi<B>>,
    options: web::Data<ServerOptions>,
    body: web::Json<WebhookMockRequest>,
) -> Result<HttpResponse, ServerError>
where B: PaymentStoreDatabase + CatalogManagement {
    let req = body.into_inner();
    if req.secret != *options.webhook_secret.reveal() {
        debug!("💻️ Webhook call with incorrect secret rejected");
        return Err(ServerError::Unauthorized);
    }
    let intent_id = req.intent_id.parse::<i64>().map_err(|_| ServerError::InvalidId(req.intent_id))?;
    let response = match api.confirm_payment(intent_id).await? {
        ConfirmationOutcome::Confirmed { order, .. } => WebhookResponse::confirmed(order.id),
        ConfirmationOutcome::AlreadyConfirmed => WebhookResponse::already_confirmed(),
        ConfirmationOutcome::Expired => WebhookResponse::expired(),
    };
    Ok(HttpResponse::Ok().json(response))
}

// ----------------------------------------------   Dashboard  -------------------------------------------------
route!(dashboard_summary => Get "/dashboard/summary" impl CatalogManagement, OrderManagement);
pub async fn dashboard_summary<B>(
    api: web::Data<DashboardApi<B>>,
) -> Result<HttpResponse, ServerError>
where B: CatalogManagement + OrderManagement {
    trace!("💻️ GET dashboard summary");
    let summary = api.summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}
