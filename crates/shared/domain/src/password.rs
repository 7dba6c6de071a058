//! Password hashing - one-way salted hash with verification.
//!
//! The stored hash is opaque to the rest of the system: callers only ever
//! hand it back to [`PasswordHasher::verify`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Failure of the hashing primitive itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Password hash failed: {0}")]
pub struct PasswordError(String);

impl PasswordError {
    pub fn new(msg: impl Into<String>) -> Self {
        PasswordError(msg.into())
    }
}

/// Password hashing trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password with a fresh salt
    fn hash(&self, plain_text: &str) -> Result<Vec<u8>, PasswordError>;

    /// Check a plain text password against a stored hash
    fn verify(&self, hash: &[u8], plain_text: &str) -> bool;
}

/// Argon2id implementation storing PHC strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> Result<Vec<u8>, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| PasswordError::new(e.to_string()))?;
        Ok(hash.to_string().into_bytes())
    }

    fn verify(&self, hash: &[u8], plain_text: &str) -> bool {
        // Anything that is not a readable PHC string simply fails verification
        let Ok(encoded) = std::str::from_utf8(hash) else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(encoded) else {
            return false;
        };
        Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}
