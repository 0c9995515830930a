use crate::{
    db_types::{NewProduct, Product},
    traits::StorefrontError,
};

/// Backend behaviour for the product catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Stores a new product and returns the full record, including the store-assigned id.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StorefrontError>;

    /// Fetches a product by its store id. Returns `None` if no such product exists.
    async fn fetch_product_by_id(&self, id: i64) -> Result<Option<Product>, StorefrontError>;

    /// Fetches all products with `active = true`, oldest first.
    async fn fetch_active_products(&self) -> Result<Vec<Product>, StorefrontError>;

    /// The total number of products in the store, active or not.
    async fn count_products(&self) -> Result<i64, StorefrontError>;
}
