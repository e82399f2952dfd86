//! Shared fixtures for repository tests.

use std::sync::Arc;

use tempfile::{tempdir, TempDir};

use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};

/// A migrated database in a fresh temp directory, plus a writer bound to it.
///
/// Must be called inside a Tokio runtime. Keep the `TempDir` alive for the
/// duration of the test.
pub(crate) fn create_test_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let pool = create_pool(&db_path_str).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");

    // spawn_writer takes the pool by value
    let writer = spawn_writer((*pool).clone());
    (pool, writer, temp_dir)
}
