//! Credential domain models.

use std::fmt;

/// An opaque, already-hashed password credential (PHC string format).
///
/// There is no constructor from a plaintext secret: the only ways to obtain a
/// value are a [`CredentialHasher`](super::CredentialHasher) or reading a
/// stored hash back from the database.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps a hash that was previously produced by a hasher and persisted.
    pub fn from_stored(phc: String) -> Self {
        Self(phc)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
