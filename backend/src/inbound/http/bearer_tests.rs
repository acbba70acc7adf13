//! Regression coverage for the bearer-token guard.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::header, test as actix_test, web};
use rstest::rstest;

use super::{AuthenticatedUser, extract};
use crate::domain::ErrorCode;
use crate::domain::ports::{MockAuthFlows, MockContactDirectory, TokenAuthority};
use crate::domain::user::{Role, Username};
use crate::inbound::http::state::HttpState;
use crate::outbound::token::JwtTokenAuthority;

fn authority() -> Arc<JwtTokenAuthority> {
    Arc::new(JwtTokenAuthority::new(
        b"test-secret",
        Duration::from_secs(3600),
    ))
}

fn state(tokens: Arc<dyn TokenAuthority>) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(MockContactDirectory::new()),
        Arc::new(MockAuthFlows::new()),
        tokens,
    ))
}

fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid test username")
}

#[rstest]
fn valid_bearer_token_yields_the_identity() {
    let authority = authority();
    let token = authority
        .issue(&username("jagrati"), Role::Admin)
        .expect("token issues");
    let request = actix_test::TestRequest::default()
        .app_data(state(authority))
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token.as_ref()),
        ))
        .to_http_request();

    let identity = extract(&request).expect("guard accepts");

    assert_eq!(identity.username, username("jagrati"));
    assert_eq!(identity.role, Role::Admin);
}

#[rstest]
#[case::missing_header(None)]
#[case::wrong_scheme(Some("Basic dXNlcjpwYXNz"))]
#[case::garbage_token(Some("Bearer not-a-token"))]
fn bad_credentials_are_unauthorized(#[case] header_value: Option<&str>) {
    let mut request = actix_test::TestRequest::default().app_data(state(authority()));
    if let Some(value) = header_value {
        request = request.insert_header((header::AUTHORIZATION, value));
    }

    let err = extract(&request.to_http_request()).expect_err("guard rejects");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
fn role_check_rejects_plain_users() {
    let identity = AuthenticatedUser {
        username: username("jagrati"),
        role: Role::User,
    };

    assert!(identity.require_role(Role::User).is_ok());
    let err = identity
        .require_role(Role::Admin)
        .expect_err("plain user lacks admin");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}
