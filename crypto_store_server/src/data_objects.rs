use chrono::{DateTime, Utc};
use css_common::CryptoCurrency;
use crypto_store_engine::db_types::{IntentStatus, PaymentIntent, Product};
use serde::{Deserialize, Serialize};

//----------------------------------------   Requests   ---------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// The product id, as an opaque string. Anything that does not resolve to a stored product is a 404.
    pub product_id: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub buyer_email: Option<String>,
}

fn default_currency() -> String {
    "USDC".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookMockRequest {
    pub intent_id: String,
    pub secret: String,
}

//----------------------------------------   Responses   --------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok".to_string(), service: "crypto-store".to_string() }
    }
}

/// The `/test` connectivity diagnostic. Failures are reported in the `database` field rather than as an
/// error response; this is the one endpoint that never propagates store errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDiagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for StoreDiagnostics {
    fn default() -> Self {
        Self {
            backend: "running".to_string(),
            database: "not available".to_string(),
            database_url: "not set".to_string(),
            database_name: None,
            connection_status: "not connected".to_string(),
            collections: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreatedResponse {
    pub id: i64,
}

/// The public representation of a product. The internal store id is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProduct {
    pub title: String,
    pub description: Option<String>,
    pub price_usd: f64,
    pub image_url: Option<String>,
    pub active: bool,
}

impl From<Product> for PublicProduct {
    fn from(p: Product) -> Self {
        Self {
            title: p.title,
            description: p.description,
            price_usd: p.price_usd,
            image_url: p.image_url,
            active: p.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub intent_id: i64,
    pub address: String,
    pub currency: CryptoCurrency,
    pub amount_crypto: f64,
    pub amount_usd: f64,
}

impl From<PaymentIntent> for CheckoutResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            intent_id: intent.id,
            address: intent.address,
            currency: intent.currency,
            amount_crypto: intent.amount_crypto,
            amount_usd: intent.amount_usd,
        }
    }
}

/// The payment status snapshot: the intent's fields, with the internal row id presented as `intent_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub intent_id: i64,
    pub product_id: i64,
    pub product_title: String,
    pub amount_usd: f64,
    pub currency: CryptoCurrency,
    pub address: String,
    pub amount_crypto: f64,
    pub status: IntentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentIntent> for PaymentStatusResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            intent_id: intent.id,
            product_id: intent.product_id,
            product_title: intent.product_title,
            amount_usd: intent.amount_usd,
            currency: intent.currency,
            address: intent.address,
            amount_crypto: intent.amount_crypto,
            status: intent.status,
            buyer_email: intent.buyer_email,
            expires_at: intent.expires_at,
            confirmed_at: intent.confirmed_at,
            created_at: intent.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
}

impl WebhookResponse {
    pub fn confirmed(order_id: i64) -> Self {
        Self { status: "confirmed".to_string(), order_id: Some(order_id) }
    }

    pub fn already_confirmed() -> Self {
        Self { status: "already_confirmed".to_string(), order_id: None }
    }

    pub fn expired() -> Self {
        Self { status: "expired".to_string(), order_id: None }
    }
}
