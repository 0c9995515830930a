use chrono::Utc;
use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPaymentIntent, PaymentIntent},
    traits::StorefrontError,
};

pub async fn insert_intent(
    intent: NewPaymentIntent,
    conn: &mut SqliteConnection,
) -> Result<PaymentIntent, StorefrontError> {
    let intent: PaymentIntent = sqlx::query_as(
        r#"
            INSERT INTO payment_intents (
                product_id,
                product_title,
                amount_usd,
                currency,
                address,
                amount_crypto,
                buyer_email,
                expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *;
        "#,
    )
    .bind(intent.product_id)
    .bind(intent.product_title)
    .bind(intent.amount_usd)
    .bind(intent.currency)
    .bind(intent.address)
    .bind(intent.amount_crypto)
    .bind(intent.buyer_email)
    .bind(intent.expires_at)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Payment intent for product [{}] inserted with id {}", intent.product_title, intent.id);
    Ok(intent)
}

pub async fn fetch_intent_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<PaymentIntent>, sqlx::Error> {
    let intent = sqlx::query_as("SELECT * FROM payment_intents WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(intent)
}

/// Atomically transitions the intent to `confirmed`, but only if it is still `pending` and has not expired.
/// Returns `None` when the conditional update matched no row; the caller inspects the stored record to
/// decide why.
pub async fn try_confirm_intent(id: i64, conn: &mut SqliteConnection) -> Result<Option<PaymentIntent>, sqlx::Error> {
    let intent = sqlx::query_as(
        r#"
            UPDATE payment_intents
            SET status = 'confirmed', confirmed_at = $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2 AND status = 'pending' AND unixepoch(expires_at) > unixepoch(CURRENT_TIMESTAMP)
            RETURNING *;
        "#,
    )
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(conn)
    .await?;
    trace!("🗃️ Conditional confirm of intent {id} matched: {}", intent.is_some());
    Ok(intent)
}

/// Flips all pending intents whose expiry has passed to `expired`, returning the affected records.
pub async fn expire_stale_intents(conn: &mut SqliteConnection) -> Result<Vec<PaymentIntent>, sqlx::Error> {
    let rows = sqlx::query_as(
        r#"
            UPDATE payment_intents
            SET status = 'expired', updated_at = CURRENT_TIMESTAMP
            WHERE status = 'pending' AND unixepoch(expires_at) <= unixepoch(CURRENT_TIMESTAMP)
            RETURNING *;
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(rows)
}
