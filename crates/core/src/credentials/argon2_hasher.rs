use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash as PhcHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use rand::rngs::OsRng;

use super::credentials_model::PasswordHash;
use super::credentials_traits::CredentialHasher;
use crate::errors::{Error, Result};

/// Argon2id hasher with the crate's default parameters.
#[derive(Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<PasswordHash> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| Error::Credential(format!("Failed to hash password: {e}")))?;
        Ok(PasswordHash::from_stored(phc.to_string()))
    }

    fn verify(&self, secret: &str, hash: &PasswordHash) -> Result<bool> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|e| Error::Credential(format!("Stored password hash is invalid: {e}")))?;
        match self.argon2.verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(other) => Err(Error::Credential(format!(
                "Password verification failed: {other}"
            ))),
        }
    }
}
