//! Behaviour definitions for storage backends.
//!
//! The traits in this module are the seams between the store's business logic and the persistence layer.
//! [`SqliteDatabase`](crate::SqliteDatabase) implements all of them; the server's endpoint tests substitute
//! mock implementations.
mod catalog_management;
mod order_management;
mod payment_store_database;

pub use catalog_management::CatalogManagement;
pub use order_management::OrderManagement;
pub use payment_store_database::{ConfirmationOutcome, PaymentStoreDatabase, StorefrontError};
