//! Record types shared between the storage backend and the public API.
//!
//! Every persisted record carries a store-assigned `id` plus `created_at`/`updated_at` timestamps. The
//! fields are typed (rather than schema-less documents) so that the compiler checks them at every use site.
use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use css_common::CryptoCurrency;
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------    IntentStatus     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IntentStatus {
    /// The intent has been created and no payment has been observed.
    #[default]
    Pending,
    /// The webhook has marked the intent as paid and an order exists for it.
    Confirmed,
    /// The intent passed its expiry time before being confirmed.
    Expired,
}

impl Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentStatus::Pending => write!(f, "pending"),
            IntentStatus::Confirmed => write!(f, "confirmed"),
            IntentStatus::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid intent status: {0}")]
pub struct StatusConversionError(String);

impl FromStr for IntentStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "expired" => Ok(Self::Expired),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

impl From<String> for IntentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid intent status: {value}. But this conversion cannot fail. Defaulting to pending");
            IntentStatus::Pending
        })
    }
}

//--------------------------------------       Product       ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price_usd: f64,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewProduct      --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_usd: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewProduct {
    pub fn new<S: Into<String>>(title: S, price_usd: f64) -> Self {
        Self { title: title.into(), description: None, price_usd, image_url: None, active: true }
    }
}

//--------------------------------------    PaymentIntent     ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentIntent {
    pub id: i64,
    /// The id of the product the intent was created for.
    pub product_id: i64,
    /// A snapshot of the product title at creation time. Decouples the intent from later product edits.
    pub product_title: String,
    pub amount_usd: f64,
    pub currency: CryptoCurrency,
    /// The mock deposit address the buyer is asked to pay to.
    pub address: String,
    pub amount_crypto: f64,
    pub status: IntentStatus,
    pub buyer_email: Option<String>,
    /// Confirmation is refused once this time has passed.
    pub expires_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------   NewPaymentIntent   --------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewPaymentIntent {
    pub product_id: i64,
    pub product_title: String,
    pub amount_usd: f64,
    pub currency: CryptoCurrency,
    pub address: String,
    pub amount_crypto: f64,
    pub buyer_email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

//--------------------------------------        Order         ---------------------------------------------------------
/// The durable record created once a payment intent is confirmed. Field values are copied from the intent
/// at confirmation time and never change afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    #[serde(skip_serializing)]
    pub id: i64,
    pub intent_id: i64,
    pub product_id: i64,
    pub product_title: String,
    pub amount_usd: f64,
    pub currency: CryptoCurrency,
    pub amount_crypto: f64,
    pub buyer_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// True when the order is a faithful snapshot of the given intent.
    pub fn matches_intent(&self, intent: &PaymentIntent) -> bool {
        self.intent_id == intent.id &&
            self.product_id == intent.product_id &&
            self.product_title == intent.product_title &&
            self.amount_usd == intent.amount_usd &&
            self.currency == intent.currency &&
            self.amount_crypto == intent.amount_crypto &&
            self.buyer_email == intent.buyer_email
    }
}
