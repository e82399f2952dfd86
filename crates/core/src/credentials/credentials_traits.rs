use super::credentials_model::PasswordHash;
use crate::errors::Result;

/// Trait for turning secrets into stored credentials and checking them.
pub trait CredentialHasher: Send + Sync {
    /// Hashes a plaintext secret with a fresh salt.
    fn hash(&self, secret: &str) -> Result<PasswordHash>;

    /// Returns `Ok(false)` on a mismatch; `Err` only when the stored hash or
    /// the hashing backend is broken.
    fn verify(&self, secret: &str, hash: &PasswordHash) -> Result<bool>;
}
