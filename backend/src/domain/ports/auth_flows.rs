//! Driving port for registration, login, and the password-reset flow.

use async_trait::async_trait;

use crate::domain::auth::{AuthToken, LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::outcome::MutationOutcome;
use crate::domain::user::EmailAddress;

/// Confirmation message returned by mutating auth operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation(pub &'static str);

impl Confirmation {
    /// Message text for the response body.
    pub const fn message(&self) -> &'static str {
        self.0
    }
}

/// Domain use-case port for authentication flows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthFlows: Send + Sync {
    /// Register a new account and trigger the welcome email.
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<MutationOutcome<Confirmation>, Error>;

    /// Validate credentials and issue a bearer token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;

    /// Issue a single-use reset token and email it to the account holder.
    async fn forgot_password(
        &self,
        email: &EmailAddress,
    ) -> Result<MutationOutcome<Confirmation>, Error>;

    /// Consume a reset token and overwrite the stored password hash.
    async fn reset_password(&self, token: &str, new_password: &str)
    -> Result<Confirmation, Error>;
}
