use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Order, PaymentIntent},
    traits::StorefrontError,
};

/// Materialises the order for a freshly confirmed intent. The UNIQUE constraint on `intent_id` backs the
/// at-most-once invariant; a violation surfaces as [`StorefrontError::OrderAlreadyExists`].
pub async fn insert_order_for_intent(
    intent: &PaymentIntent,
    conn: &mut SqliteConnection,
) -> Result<Order, StorefrontError> {
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                intent_id,
                product_id,
                product_title,
                amount_usd,
                currency,
                amount_crypto,
                buyer_email
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(intent.id)
    .bind(intent.product_id)
    .bind(&intent.product_title)
    .bind(intent.amount_usd)
    .bind(intent.currency)
    .bind(intent.amount_crypto)
    .bind(&intent.buyer_email)
    .fetch_one(conn)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorefrontError::OrderAlreadyExists(intent.id),
        _ => StorefrontError::from(e),
    })?;
    debug!("🗃️ Order {} created for intent {}", order.id, order.intent_id);
    Ok(order)
}

pub async fn count_orders(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders").fetch_one(conn).await?;
    Ok(count)
}

pub async fn total_revenue(conn: &mut SqliteConnection) -> Result<f64, sqlx::Error> {
    let (total,): (f64,) = sqlx::query_as("SELECT COALESCE(SUM(amount_usd), 0.0) FROM orders").fetch_one(conn).await?;
    Ok(total)
}

/// Returns the most recent orders, newest first. Ties on `created_at` break on the row id so the ordering
/// is stable within a single clock second.
pub async fn fetch_recent_orders(limit: i64, conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC LIMIT $1")
        .bind(limit)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}
