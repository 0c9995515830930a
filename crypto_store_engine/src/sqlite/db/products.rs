use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewProduct, Product},
    traits::StorefrontError,
};

pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, StorefrontError> {
    let product: Product = sqlx::query_as(
        r#"
            INSERT INTO products (title, description, price_usd, image_url, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(product.title)
    .bind(product.description)
    .bind(product.price_usd)
    .bind(product.image_url)
    .bind(product.active)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Product [{}] inserted with id {}", product.title, product.id);
    Ok(product)
}

pub async fn fetch_product_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    let product = sqlx::query_as("SELECT * FROM products WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(product)
}

/// Returns the active products, oldest first.
pub async fn fetch_active_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, sqlx::Error> {
    let products =
        sqlx::query_as("SELECT * FROM products WHERE active = true ORDER BY created_at ASC").fetch_all(conn).await?;
    Ok(products)
}

pub async fn count_products(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products").fetch_one(conn).await?;
    Ok(count)
}
