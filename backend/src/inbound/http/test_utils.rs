//! Shared helpers for handler tests.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, web};

use crate::domain::ports::{AuthFlows, ContactDirectory, TokenAuthority};
use crate::domain::user::{Role, Username};
use crate::inbound::http::state::HttpState;
use crate::outbound::token::JwtTokenAuthority;

/// Signing secret shared by every handler test.
const TEST_SECRET: &[u8] = b"test-secret";

/// Real token authority over the shared test secret.
pub fn test_token_authority() -> Arc<JwtTokenAuthority> {
    Arc::new(JwtTokenAuthority::new(TEST_SECRET, Duration::from_secs(3600)))
}

/// `Authorization` header value for a freshly issued user token.
pub fn bearer_header(role: Role) -> (actix_web::http::header::HeaderName, String) {
    let username = Username::new("jagrati").expect("valid test username");
    let token = test_token_authority()
        .issue(&username, role)
        .expect("token issues");
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {}", token.as_ref()),
    )
}

/// Application state over the supplied port doubles.
pub fn test_state(
    contacts: Arc<dyn ContactDirectory>,
    auth: Arc<dyn AuthFlows>,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(contacts, auth, test_token_authority()))
}

/// Test application exposing the full route table under `/api/v1`.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(crate::server::routes)
}
