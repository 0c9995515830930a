use thiserror::Error;

use crate::db_types::{NewPaymentIntent, Order, PaymentIntent};

/// The result of a confirmation attempt. The variants map one-to-one onto the webhook's `status` field.
#[derive(Debug, Clone)]
pub enum ConfirmationOutcome {
    /// The intent was pending and has been confirmed. Exactly one order was created for it.
    Confirmed { intent: PaymentIntent, order: Order },
    /// The intent was confirmed by an earlier call. No order was created and `confirmed_at` was not touched.
    AlreadyConfirmed,
    /// The intent passed its expiry before confirmation arrived. No order was created.
    Expired,
}

/// This trait defines the payment-intent behaviour for backends supporting the crypto store.
///
/// This behaviour includes:
/// * Persisting new payment intents created by the checkout flow
/// * Atomically confirming an intent and materialising its order
/// * Sweeping stale pending intents to `expired`
#[allow(async_fn_in_trait)]
pub trait PaymentStoreDatabase {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Stores a new pending payment intent, returning the full record including the store-assigned id.
    async fn insert_intent(&self, intent: NewPaymentIntent) -> Result<PaymentIntent, StorefrontError>;

    /// Fetches an intent by its store id. Returns `None` if no such intent exists.
    async fn fetch_intent_by_id(&self, id: i64) -> Result<Option<PaymentIntent>, StorefrontError>;

    /// Confirms the intent with the given id and creates its order, in a single atomic transaction.
    ///
    /// The status transition is a conditional update: it only matches when the stored status is still
    /// `pending` and the expiry time has not passed, so concurrent confirmations cannot create two orders.
    /// When the update matches no row, the stored record decides the outcome: a confirmed intent yields
    /// [`ConfirmationOutcome::AlreadyConfirmed`], a stale one is flipped to `expired` and yields
    /// [`ConfirmationOutcome::Expired`], and a missing one is an [`StorefrontError::IntentNotFound`] error.
    async fn confirm_intent(&self, id: i64) -> Result<ConfirmationOutcome, StorefrontError>;

    /// Marks all pending intents whose `expires_at` has passed as `expired`, returning the affected records.
    async fn expire_stale_intents(&self) -> Result<Vec<PaymentIntent>, StorefrontError>;

    /// The names of the tables in the store. Used by the connectivity diagnostic endpoint.
    async fn table_names(&self) -> Result<Vec<String>, StorefrontError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), StorefrontError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum StorefrontError {
    #[error("We have an internal database engine error (configuration/uptime etc.): {0}")]
    DatabaseError(String),
    #[error("Product {0} does not exist")]
    ProductNotFound(i64),
    #[error("Payment intent {0} does not exist")]
    IntentNotFound(i64),
    #[error("An order already exists for intent {0}")]
    OrderAlreadyExists(i64),
}

impl From<sqlx::Error> for StorefrontError {
    fn from(e: sqlx::Error) -> Self {
        StorefrontError::DatabaseError(e.to_string())
    }
}
