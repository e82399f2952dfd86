//! Utility functions for SQLite storage operations.

/// Maximum number of parameters bound into one `IN (...)` clause.
///
/// SQLite builds may cap bound parameters at 999 (SQLITE_MAX_VARIABLE_NUMBER).
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits a slice into chunks that fit in one `IN (...)` clause.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}
