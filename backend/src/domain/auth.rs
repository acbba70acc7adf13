//! Authentication payload primitives.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service. Password
//! material is wrapped in [`Zeroizing`] so it is wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{EmailAddress, UserValidationError, Username};

/// Domain error returned when an authentication payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthPayloadError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Email was missing or implausible.
    #[error("email must contain a local part and a domain")]
    InvalidEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl From<UserValidationError> for AuthPayloadError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::InvalidEmail => Self::InvalidEmail,
            UserValidationError::BlankUsername | UserValidationError::UnknownRole(_) => {
                Self::EmptyUsername
            }
        }
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty after trimming.
/// - `password` is non-empty but retains caller whitespace so credential
///   comparison is never surprising.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AuthPayloadError> {
        if password.is_empty() {
            return Err(AuthPayloadError::EmptyPassword);
        }
        Ok(Self {
            username: Username::new(username).map_err(|_| AuthPayloadError::EmptyUsername)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for credential lookup.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthPayloadError> {
        if password.is_empty() {
            return Err(AuthPayloadError::EmptyPassword);
        }
        Ok(Self {
            username: Username::new(username).map_err(|_| AuthPayloadError::EmptyUsername)?,
            email: EmailAddress::new(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Cleartext password pending hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed bearer token handed back by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap an already signed token string.
    pub fn new(token: String) -> Self {
        Self(token)
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", AuthPayloadError::EmptyUsername)]
    #[case("   ", "pw", AuthPayloadError::EmptyUsername)]
    #[case("user", "", AuthPayloadError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: AuthPayloadError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  jagrati  ", "secret")]
    #[case("alice", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("jagrati", "not-an-email", "pw", AuthPayloadError::InvalidEmail)]
    #[case("jagrati", "jagrati@example.com", "", AuthPayloadError::EmptyPassword)]
    #[case("", "jagrati@example.com", "pw", AuthPayloadError::EmptyUsername)]
    fn invalid_registrations(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: AuthPayloadError,
    ) {
        let err = Registration::try_from_parts(username, email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }
}
