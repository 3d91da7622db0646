//! Test Module
//!
//! Crate-level test suite for the Heartline backend.
//!
//! ## Test Categories
//! - `brain_tests`: classifiers, response selection, end-to-end Thai scenarios
//! - `database_tests`: chat message storage
//! - `companion_tests`: LLM-first, brain-fallback orchestration
//! - `server_tests`: HTTP routes, auth, validation, rate limiting

pub mod brain_tests;

use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

/// A migrated SQLite database in a temporary directory.
///
/// Keep the `TempDir` alive for as long as the pool is used.
pub(crate) async fn create_test_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.sqlite");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = crate::database::init_db(&db_url)
        .await
        .expect("Failed to create test pool");

    (pool, dir)
}
