//! Helpers for standing up throwaway SQLite databases in tests.
use log::*;
use sqlx::{migrate, migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

/// Drops, recreates and migrates the database at `url`, and initialises logging. Call this at the top of
/// every integration test, with a [`random_db_path`] URL so tests do not trample each other.
pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    if let Err(e) = Sqlite::drop_database(url).await {
        trace!("Could not drop database {url}: {e}");
    }
    Sqlite::create_database(url).await.expect("Error creating test database");
    run_migrations(url).await;
    debug!("🚀️ Test database ready at {url}");
}

pub fn random_db_path() -> String {
    format!("sqlite://../data/test_store_{}", rand::random::<u64>())
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error connecting to test database");
    migrate!("./src/sqlite/migrations").run(db.pool()).await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
}
