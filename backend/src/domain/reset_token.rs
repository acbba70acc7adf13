//! Single-use password-reset tokens and their registry.
//!
//! The registry is the only in-process shared mutable state in the system.
//! It is owned explicitly and handed to the authentication service at
//! construction, never reached through a global.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::user::EmailAddress;

/// Opaque single-use token granting permission to set a new password.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResetToken(String);

impl ResetToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a caller-supplied token string for lookup.
    pub fn from_raw(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl AsRef<str> for ResetToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Concurrency-safe mapping from reset tokens to the email they authorise.
///
/// ## Invariants
/// - [`consume`](Self::consume) is an atomic remove-and-return, so a token
///   is honoured at most once even under concurrent reset requests.
/// - Issuing a new token does not invalidate earlier unconsumed tokens for
///   the same address; several may be live at once.
#[derive(Debug, Default)]
pub struct ResetTokenRegistry {
    tokens: Mutex<HashMap<ResetToken, EmailAddress>>,
}

impl ResetTokenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a token for the given email address.
    pub fn insert(&self, token: ResetToken, email: EmailAddress) {
        let mut tokens = self
            .tokens
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        tokens.insert(token, email);
    }

    /// Remove the token and return the email it authorised, if known.
    pub fn consume(&self, token: &ResetToken) -> Option<EmailAddress> {
        let mut tokens = self
            .tokens
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        tokens.remove(token)
    }

    /// Number of outstanding tokens.
    pub fn outstanding(&self) -> usize {
        let tokens = self
            .tokens
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        tokens.len()
    }
}
