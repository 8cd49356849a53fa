//! Password credential type.
//!
//! Wraps an Argon2id hash in PHC string format. The raw password never
//! leaves the call site that hashes or verifies it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur when hashing a password.
#[derive(thiserror::Error, Debug, Clone)]
pub enum PasswordError {
    /// The password does not meet the minimum length.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum required length.
        min: usize,
    },
    /// The hashing operation itself failed.
    #[error("password hashing failed")]
    Hash,
}

/// An Argon2id password hash (PHC string).
///
/// Serializes transparently so storage backends can persist it as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hash a raw password.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::TooShort` if the password is below the
    /// minimum length, or `PasswordError::Hash` if hashing fails.
    pub fn hash(password: &str) -> Result<Self, PasswordError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|_| PasswordError::Hash)
    }

    /// Verify a raw password against this hash.
    ///
    /// Returns `false` for a wrong password and for an unparsable stored
    /// hash - a corrupt credential must never authenticate.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Wrap an already-hashed PHC string (e.g. read back from storage).
    ///
    /// No validation happens here; a malformed string simply never
    /// verifies.
    #[must_use]
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// The PHC string form of the hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
