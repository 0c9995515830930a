use crate::{db_types::Order, traits::StorefrontError};

/// Backend behaviour for reading the order ledger. Orders are only ever created by the confirmation flow
/// (see [`PaymentStoreDatabase::confirm_intent`](crate::traits::PaymentStoreDatabase::confirm_intent)).
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// The total number of orders placed.
    async fn count_orders(&self) -> Result<i64, StorefrontError>;

    /// The sum of `amount_usd` over all orders.
    async fn total_revenue(&self) -> Result<f64, StorefrontError>;

    /// The most recent orders by creation time, newest first.
    async fn fetch_recent_orders(&self, limit: i64) -> Result<Vec<Order>, StorefrontError>;
}
