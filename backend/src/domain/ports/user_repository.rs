//! Port abstraction for user persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, Role, User, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A unique constraint rejected the write.
    #[error("user repository uniqueness violation: {message}")]
    Duplicate {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl UserRepositoryError {
    /// Connection-class failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query-class failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Unique-constraint violation.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }
}

/// Field values for a user account that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: Username,
    /// Unique email address.
    pub email: EmailAddress,
    /// Argon2 PHC-format hash of the password.
    pub password_hash: String,
    /// Capability tag assigned at registration.
    pub role: Role,
}

/// Driven port over the credential store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by login name.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Persist a new user and return it with its generated identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Overwrite the stored password hash for the given email's account.
    ///
    /// Returns `false` when no account with `email` exists.
    async fn update_password_hash(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<bool, UserRepositoryError>;
}
