//! Core error types for the Usus habit tracker.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.
//!
//! `NotFound`, `Conflict`, `ParentMissing`, `Unauthorized` and `Validation` are
//! expected business outcomes that callers branch on. `Database` and
//! `Credential` are the exceptional ones: they are logged and surfaced as a
//! generic server error.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The entity an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Habit,
    DailyLog,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::User => write!(f, "User"),
            Entity::Habit => write!(f, "Habit"),
            Entity::DailyLog => write!(f, "Log"),
        }
    }
}

/// Root error type for the habit tracker.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: Entity, id: i32 },

    #[error("{0}")]
    Conflict(String),

    #[error("{entity} with ID {id} not found")]
    ParentMissing { entity: Entity, id: i32 },

    #[error("{0}")]
    Unauthorized(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Credential error: {0}")]
    Credential(String),
}

impl Error {
    pub fn not_found(entity: Entity, id: i32) -> Self {
        Error::NotFound { entity, id }
    }

    pub fn parent_missing(entity: Entity, id: i32) -> Self {
        Error::ParentMissing { entity, id }
    }

    /// The conflict raised for a second log on the same habit and day.
    ///
    /// Both the pre-check and the unique-index backstop produce this value.
    pub fn duplicate_log(habit_id: i32, date: NaiveDate) -> Self {
        Error::Conflict(format!(
            "A log for habit {} on {} already exists",
            habit_id,
            date.format("%Y-%m-%d")
        ))
    }

    pub fn duplicate_email(email: &str) -> Self {
        Error::Conflict(format!("A user with email {} already exists", email))
    }

    /// Returns true for outcomes a caller is expected to branch on.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Error::Database(_) | Error::Credential(_))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A unique constraint was violated and no repository claimed it.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated and no repository claimed it.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Field '{field}' is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Database(DatabaseError::Internal(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
