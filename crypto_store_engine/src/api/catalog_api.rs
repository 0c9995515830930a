use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewProduct, Product},
    traits::{CatalogManagement, StorefrontError},
};

/// `CatalogApi` manages the product catalog. Products are immutable once created and are never deleted;
/// the only mutation the store supports is creation.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, StorefrontError> {
        let product = self.db.insert_product(product).await?;
        info!("📦️ New product [{}] created with id {}", product.title, product.id);
        Ok(product)
    }

    pub async fn active_products(&self) -> Result<Vec<Product>, StorefrontError> {
        self.db.fetch_active_products().await
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
