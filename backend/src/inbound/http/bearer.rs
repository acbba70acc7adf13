//! Bearer-token request guard.
//!
//! The role claim travels inside the token, so authorisation decisions here
//! never touch the user store.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use crate::domain::Error;
use crate::domain::user::{Role, Username};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

const SCHEME: &str = "Bearer ";

/// Identity extracted from a verified `Authorization: Bearer` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject the token was issued for.
    pub username: Username,
    /// Capability tag encoded at issue time.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Reject callers without the given role.
    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::forbidden("insufficient privileges").into())
        }
    }
}

fn extract(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("application state missing"))?;
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let token = header
        .strip_prefix(SCHEME)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;

    let identity = state
        .tokens
        .verify(token)
        .map_err(|_| Error::unauthorized("invalid or expired token"))?;
    Ok(AuthenticatedUser {
        username: identity.username,
        role: identity.role,
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

#[cfg(test)]
#[path = "bearer_tests.rs"]
mod tests;
