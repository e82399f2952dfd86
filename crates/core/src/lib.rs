//! Usus Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for the Usus habit tracker.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod credentials;
pub mod daily_logs;
pub mod errors;
pub mod habits;
pub mod users;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
