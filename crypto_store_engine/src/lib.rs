//! Crypto Store Engine
//!
//! The engine contains the storage backend and order flow logic for the demo crypto storefront. It is
//! server-agnostic: the HTTP layer talks to it exclusively through the API objects exported here.
//!
//! The crate is divided into three main sections:
//! 1. Database management ([`mod@sqlite`]). SQLite is the supported backend. You should never need to access
//!    the database directly; use the public APIs instead. The exception is the record types, which are defined
//!    in [`mod@db_types`] and are public.
//! 2. The backend traits ([`mod@traits`]). A storage backend implements these to drive the store. They exist
//!    as seams so that the server's endpoint tests can substitute doubles for the real database.
//! 3. The public API objects ([`CatalogApi`], [`OrderFlowApi`], [`DashboardApi`]), which hold the business
//!    rules: strict product resolution, mock pricing and addressing, atomic payment confirmation, and the
//!    dashboard aggregates.
mod api;

pub mod db_types;
pub mod helpers;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use api::{CatalogApi, DashboardApi, DashboardSummary, OrderFlowApi, INTENT_EXPIRY};
pub use traits::{CatalogManagement, ConfirmationOutcome, OrderManagement, PaymentStoreDatabase, StorefrontError};
