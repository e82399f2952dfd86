//! Credentials module - the "never store or compare plaintext" contract.

mod argon2_hasher;
mod credentials_model;
mod credentials_traits;

pub use argon2_hasher::Argon2Hasher;
pub use credentials_model::PasswordHash;
pub use credentials_traits::CredentialHasher;
