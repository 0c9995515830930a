//! `SqliteDatabase` is a concrete implementation of a crypto store backend.
//!
//! Unsurprisingly, it uses SQLite and implements all the traits defined in the [`traits`](crate::traits)
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

use super::db::{db_url, intents, new_pool, orders, products};
use crate::{
    db_types::{IntentStatus, NewPaymentIntent, NewProduct, Order, PaymentIntent, Product},
    traits::{CatalogManagement, ConfirmationOutcome, OrderManagement, PaymentStoreDatabase, StorefrontError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool against the URL in the `DATABASE_URL` environment variable (or the
    /// default file path when unset).
    pub async fn new(max_connections: u32) -> Result<Self, StorefrontError> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, StorefrontError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    /// Creates the database file if it does not exist yet. A no-op otherwise.
    pub async fn create_database_if_missing(url: &str) -> Result<(), StorefrontError> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
            info!("🗃️ Created Sqlite database {url}");
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Safe to call on every startup; applied migrations are skipped.
    pub async fn migrate(&self) -> Result<(), StorefrontError> {
        sqlx::migrate!("./src/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorefrontError::DatabaseError(e.to_string()))?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        products::insert_product(product, &mut conn).await
    }

    async fn fetch_product_by_id(&self, id: i64) -> Result<Option<Product>, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_product_by_id(id, &mut conn).await?)
    }

    async fn fetch_active_products(&self) -> Result<Vec<Product>, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_active_products(&mut conn).await?)
    }

    async fn count_products(&self) -> Result<i64, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::count_products(&mut conn).await?)
    }
}

impl PaymentStoreDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_intent(&self, intent: NewPaymentIntent) -> Result<PaymentIntent, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        intents::insert_intent(intent, &mut conn).await
    }

    async fn fetch_intent_by_id(&self, id: i64) -> Result<Option<PaymentIntent>, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        Ok(intents::fetch_intent_by_id(id, &mut conn).await?)
    }

    /// Confirms the intent and creates its order in a single atomic transaction.
    ///
    /// The status transition is a conditional UPDATE (`status = 'pending'` and not expired), so two
    /// concurrent webhook calls cannot both create an order; the loser sees `AlreadyConfirmed`.
    async fn confirm_intent(&self, id: i64) -> Result<ConfirmationOutcome, StorefrontError> {
        let mut tx = self.pool.begin().await?;
        let outcome = match intents::try_confirm_intent(id, &mut tx).await? {
            Some(intent) => {
                let order = orders::insert_order_for_intent(&intent, &mut tx).await?;
                debug!("🗃️ Intent {id} confirmed; order {} created", order.id);
                ConfirmationOutcome::Confirmed { intent, order }
            },
            None => match intents::fetch_intent_by_id(id, &mut tx).await? {
                None => return Err(StorefrontError::IntentNotFound(id)),
                Some(intent) if intent.status == IntentStatus::Confirmed => {
                    debug!("🗃️ Intent {id} was already confirmed");
                    ConfirmationOutcome::AlreadyConfirmed
                },
                Some(_) => {
                    // Pending but past expiry, or swept previously. The sweep below is a no-op for the
                    // latter case.
                    let expired = intents::expire_stale_intents(&mut tx).await?;
                    debug!("🗃️ Intent {id} has expired ({} intents swept)", expired.len());
                    ConfirmationOutcome::Expired
                },
            },
        };
        tx.commit().await?;
        Ok(outcome)
    }

    async fn expire_stale_intents(&self) -> Result<Vec<PaymentIntent>, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        Ok(intents::expire_stale_intents(&mut conn).await?)
    }

    async fn table_names(&self) -> Result<Vec<String>, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&mut *conn)
                .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn close(&mut self) -> Result<(), StorefrontError> {
        self.pool.close().await;
        Ok(())
    }
}

impl OrderManagement for SqliteDatabase {
    async fn count_orders(&self) -> Result<i64, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::count_orders(&mut conn).await?)
    }

    async fn total_revenue(&self) -> Result<f64, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::total_revenue(&mut conn).await?)
    }

    async fn fetch_recent_orders(&self, limit: i64) -> Result<Vec<Order>, StorefrontError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_recent_orders(limit, &mut conn).await?)
    }
}
