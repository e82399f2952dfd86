//! SQLite storage implementation for Usus.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `usus-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations carrying every uniqueness, foreign key and cascade rule
//! - Repository implementations for users, habits and daily logs
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `usus-core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool. Writes are serialized through a single
//! writer actor that runs each job in an immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod daily_logs;
pub mod habits;
pub mod users;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use daily_logs::DailyLogRepository;
pub use habits::HabitRepository;
pub use users::UserRepository;

// Re-export from usus-core for convenience
pub use usus_core::errors::{DatabaseError, Error, Result};
