//! Port for signed, time-bound bearer tokens.

use crate::domain::auth::AuthToken;
use crate::domain::user::{Role, Username};

/// Errors surfaced by token adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signing the token failed.
    #[error("token signing failed: {message}")]
    Signing {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The presented token is malformed, mis-signed, or expired.
    #[error("token rejected: {message}")]
    Invalid {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl TokenError {
    /// Signing-class failure.
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Verification-class failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Verified identity carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    /// Subject the token was issued for.
    pub username: Username,
    /// Capability tag encoded at issue time.
    pub role: Role,
}

/// Driven port issuing and verifying bearer tokens.
///
/// Issue and verify are pure computation over the signing secret, so the
/// trait is synchronous; adapters must still be shareable across workers.
#[cfg_attr(test, mockall::automock)]
pub trait TokenAuthority: Send + Sync {
    /// Issue a signed, time-bound token for the given identity.
    fn issue(&self, username: &Username, role: Role) -> Result<AuthToken, TokenError>;

    /// Verify a presented token and return the identity it encodes.
    fn verify(&self, token: &str) -> Result<TokenIdentity, TokenError>;
}
