//! One-way password hashing.
//!
//! Argon2id with a random salt per hash, serialised in PHC string format.
//! Verification parses the stored string, so parameter upgrades remain
//! backwards compatible with existing hashes.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Failure to produce a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Hash a cleartext password into a PHC-format string.
pub fn hash(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hashed| hashed.to_string())
        .map_err(|err| PasswordHashError {
            message: err.to_string(),
        })
}

/// Verify a cleartext password against a stored PHC-format hash.
///
/// A malformed stored hash verifies as `false` rather than erroring; the
/// caller cannot do anything more useful with a corrupt credential row than
/// reject the login.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
