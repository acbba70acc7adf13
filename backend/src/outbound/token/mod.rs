//! HS256 bearer-token adapter.

use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthToken;
use crate::domain::ports::{TokenAuthority, TokenError, TokenIdentity};
use crate::domain::user::{Role, Username};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    exp: u64,
    iat: u64,
}

/// Symmetric-key implementation of the `TokenAuthority` port.
///
/// The role travels inside the token, so verification never touches the
/// user store.
pub struct JwtTokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenAuthority {
    /// Build an authority from the shared signing secret and a token TTL.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn now() -> Result<u64, TokenError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .map_err(|err| TokenError::signing(err.to_string()))
    }
}

impl TokenAuthority for JwtTokenAuthority {
    fn issue(&self, username: &Username, role: Role) -> Result<AuthToken, TokenError> {
        let iat = Self::now()?;
        let claims = Claims {
            sub: username.as_ref().to_owned(),
            role: role.as_tag().to_owned(),
            exp: iat + self.ttl.as_secs(),
            iat,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;
        Ok(AuthToken::new(token))
    }

    fn verify(&self, token: &str) -> Result<TokenIdentity, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        let username = Username::new(&data.claims.sub)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        let role = Role::from_str(&data.claims.role)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        Ok(TokenIdentity { username, role })
    }
}
