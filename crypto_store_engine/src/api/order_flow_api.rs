use std::fmt::Debug;

use chrono::{Duration, Utc};
use css_common::{usd_to_crypto, CryptoCurrency};
use log::*;

use crate::{
    db_types::{NewPaymentIntent, PaymentIntent},
    helpers::random_deposit_address,
    traits::{CatalogManagement, ConfirmationOutcome, PaymentStoreDatabase, StorefrontError},
};

/// How long a payment intent stays confirmable after checkout.
pub const INTENT_EXPIRY: Duration = Duration::minutes(30);

/// `OrderFlowApi` is the primary API for the checkout-confirm-order lifecycle: it creates payment intents
/// for products, answers status queries, and handles webhook confirmations.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B>
where B: PaymentStoreDatabase + CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Creates a pending payment intent for the given product.
    ///
    /// The product is resolved strictly by its id; a missing product is a
    /// [`StorefrontError::ProductNotFound`] error. The USD price is snapshotted from the product, converted
    /// into the requested currency at the mock spot rate, and paired with a freshly generated deposit
    /// address tagged with the currency code. When a buyer email is supplied it is written into the new
    /// intent record itself.
    pub async fn checkout(
        &self,
        product_id: i64,
        currency: CryptoCurrency,
        buyer_email: Option<String>,
    ) -> Result<PaymentIntent, StorefrontError> {
        let product = self
            .db
            .fetch_product_by_id(product_id)
            .await?
            .ok_or(StorefrontError::ProductNotFound(product_id))?;
        let amount_usd = product.price_usd;
        let address = random_deposit_address(&currency.to_string());
        let amount_crypto = usd_to_crypto(amount_usd, currency);
        let intent = NewPaymentIntent {
            product_id: product.id,
            product_title: product.title,
            amount_usd,
            currency,
            address,
            amount_crypto,
            buyer_email,
            expires_at: Utc::now() + INTENT_EXPIRY,
        };
        let intent = self.db.insert_intent(intent).await?;
        info!(
            "🛒️ Intent {} created for product [{}]: {} {} to {}",
            intent.id, intent.product_title, intent.amount_crypto, intent.currency, intent.address
        );
        Ok(intent)
    }

    /// Fetches a snapshot of the intent with the given id.
    pub async fn payment_status(&self, intent_id: i64) -> Result<PaymentIntent, StorefrontError> {
        self.db.fetch_intent_by_id(intent_id).await?.ok_or(StorefrontError::IntentNotFound(intent_id))
    }

    /// Marks the intent as confirmed and materialises its order. See
    /// [`PaymentStoreDatabase::confirm_intent`] for the atomicity guarantees.
    pub async fn confirm_payment(&self, intent_id: i64) -> Result<ConfirmationOutcome, StorefrontError> {
        trace!("🛒️ Intent {intent_id} is being marked as confirmed");
        let outcome = self.db.confirm_intent(intent_id).await?;
        match &outcome {
            ConfirmationOutcome::Confirmed { order, .. } => {
                info!("🛒️ Intent {intent_id} confirmed. Order {} created.", order.id);
            },
            ConfirmationOutcome::AlreadyConfirmed => {
                debug!("🛒️ Intent {intent_id} was already confirmed. Nothing to do.");
            },
            ConfirmationOutcome::Expired => {
                info!("🛒️ Intent {intent_id} has expired and cannot be confirmed.");
            },
        }
        Ok(outcome)
    }

    /// Sweeps all stale pending intents to `expired`, returning the affected records.
    pub async fn expire_old_intents(&self) -> Result<Vec<PaymentIntent>, StorefrontError> {
        self.db.expire_stale_intents().await
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
