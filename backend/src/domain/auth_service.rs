//! Registration, login, and password-reset orchestration.
//!
//! Credential writes are authoritative; notification email is a best-effort
//! side effect surfaced as a warning. The reset-token registry is injected
//! at construction so its lifetime is owned by the composition root.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::auth::{AuthToken, LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::outcome::{MutationOutcome, SideEffectWarning};
use crate::domain::password;
use crate::domain::ports::{
    AuthFlows, Confirmation, Mailer, MailerError, NewUser, TokenAuthority, UserRepository,
    UserRepositoryError,
};
use crate::domain::reset_token::{ResetToken, ResetTokenRegistry};
use crate::domain::user::{EmailAddress, Role};

/// Confirmation text for a completed registration.
pub const REGISTERED_MESSAGE: &str = "User registered successfully!";
/// Confirmation text for an issued password-reset email.
pub const RESET_SENT_MESSAGE: &str = "Password reset link sent to your email!";
/// Confirmation text for a completed password reset.
pub const PASSWORD_UPDATED_MESSAGE: &str = "Password updated successfully!";

/// Authentication service implementing the [`AuthFlows`] driving port.
#[derive(Clone)]
pub struct AuthService<R, M> {
    users: Arc<R>,
    mailer: Arc<M>,
    registry: Arc<ResetTokenRegistry>,
    tokens: Arc<dyn TokenAuthority>,
}

impl<R, M> AuthService<R, M> {
    /// Create a new service over the given adapters and registry.
    pub fn new(
        users: Arc<R>,
        mailer: Arc<M>,
        registry: Arc<ResetTokenRegistry>,
        tokens: Arc<dyn TokenAuthority>,
    ) -> Self {
        Self {
            users,
            mailer,
            registry,
            tokens,
        }
    }
}

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("credential store unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("credential store error: {message}"))
        }
        // Unique-constraint backstop for writes that raced past the lookups.
        UserRepositoryError::Duplicate { .. } => {
            Error::conflict("Username or email already registered!")
        }
    }
}

fn note_mail_failure<T>(outcome: &mut MutationOutcome<T>, error: &MailerError) {
    warn!(error = %error, "notification email failed");
    outcome.push_warning(SideEffectWarning::Email {
        message: error.to_string(),
    });
}

#[async_trait]
impl<R, M> AuthFlows for AuthService<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<MutationOutcome<Confirmation>, Error> {
        if self
            .users
            .find_by_username(registration.username())
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            return Err(Error::conflict("Username already exists!"));
        }
        if self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            return Err(Error::conflict("Email already registered!"));
        }

        let password_hash = password::hash(registration.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = self
            .users
            .insert(&NewUser {
                username: registration.username().clone(),
                email: registration.email().clone(),
                password_hash,
                role: Role::User,
            })
            .await
            .map_err(map_repository_error)?;
        info!(username = %user.username, "user registered");

        let mut outcome = MutationOutcome::clean(Confirmation(REGISTERED_MESSAGE));
        if let Err(err) = self.mailer.send_welcome(&user.email).await {
            note_mail_failure(&mut outcome, &err);
        }
        Ok(outcome)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?;

        // Same message for unknown user and bad password; don't leak which.
        let user = user.ok_or_else(|| Error::unauthorized("Invalid username or password"))?;
        if !password::verify(credentials.password(), &user.password_hash) {
            return Err(Error::unauthorized("Invalid username or password"));
        }

        info!(username = %user.username, "login succeeded");
        self.tokens
            .issue(&user.username, user.role)
            .map_err(|err| Error::internal(format!("token issuance failed: {err}")))
    }

    async fn forgot_password(
        &self,
        email: &EmailAddress,
    ) -> Result<MutationOutcome<Confirmation>, Error> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Email not registered!"))?;

        // Earlier unconsumed tokens stay valid; several may be live at once.
        let token = ResetToken::generate();
        self.registry.insert(token.clone(), user.email.clone());
        info!(email = %user.email, "password reset token issued");

        let mut outcome = MutationOutcome::clean(Confirmation(RESET_SENT_MESSAGE));
        if let Err(err) = self.mailer.send_password_reset(&user.email, &token).await {
            note_mail_failure(&mut outcome, &err);
        }
        Ok(outcome)
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<Confirmation, Error> {
        // Atomic remove-and-return: the token is spent even if a later step
        // fails, so it can never be replayed.
        let email = self
            .registry
            .consume(&ResetToken::from_raw(token))
            .ok_or_else(|| Error::unauthorized("Invalid or expired reset token!"))?;

        let password_hash =
            password::hash(new_password).map_err(|err| Error::internal(err.to_string()))?;
        let updated = self
            .users
            .update_password_hash(&email, &password_hash)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found("User not found!"));
        }

        info!(email = %email, "password reset completed");
        Ok(Confirmation(PASSWORD_UPDATED_MESSAGE))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
