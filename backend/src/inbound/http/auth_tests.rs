//! Regression coverage for the authentication handlers.

use std::sync::Arc;

use actix_web::{http::StatusCode, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::Error;
use crate::domain::auth::AuthToken;
use crate::domain::outcome::{MutationOutcome, SideEffectWarning};
use crate::domain::ports::{Confirmation, MockAuthFlows, MockContactDirectory};
use crate::inbound::http::test_utils::{test_app, test_state};

async fn app_with(
    auth: MockAuthFlows,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let state = test_state(Arc::new(MockContactDirectory::new()), Arc::new(auth));
    actix_test::init_service(test_app(state)).await
}

#[actix_web::test]
async fn register_returns_the_confirmation_message() {
    let mut auth = MockAuthFlows::new();
    auth.expect_register().return_once(|registration| {
        assert_eq!(registration.username().as_ref(), "jagrati");
        Ok(MutationOutcome::clean(Confirmation(
            "User registered successfully!",
        )))
    });
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "jagrati",
            "email": "jagrati@x.com",
            "password": "secret"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("User registered successfully!")
    );
}

#[actix_web::test]
async fn register_succeeds_even_when_the_welcome_email_degraded() {
    let mut auth = MockAuthFlows::new();
    auth.expect_register().return_once(|_| {
        let mut outcome = MutationOutcome::clean(Confirmation("User registered successfully!"));
        outcome.push_warning(SideEffectWarning::Email {
            message: "relay refused".to_owned(),
        });
        Ok(outcome)
    });
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "jagrati",
            "email": "jagrati@x.com",
            "password": "secret"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn register_maps_duplicates_to_conflict() {
    let mut auth = MockAuthFlows::new();
    auth.expect_register()
        .return_once(|_| Err(Error::conflict("Username already exists!")));
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "jagrati",
            "email": "jagrati@x.com",
            "password": "secret"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Username already exists!")
    );
}

#[rstest]
#[case(json!({"username": "  ", "email": "a@b.c", "password": "pw"}), "username")]
#[case(json!({"username": "jagrati", "email": "not-an-email", "password": "pw"}), "email")]
#[case(json!({"username": "jagrati", "email": "a@b.c", "password": ""}), "password")]
#[actix_web::test]
async fn register_rejects_invalid_payloads(#[case] body: Value, #[case] field: &str) {
    // The service must not be reached when validation fails.
    let app = app_with(MockAuthFlows::new()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value
            .get("details")
            .and_then(|details| details.get("field"))
            .and_then(Value::as_str),
        Some(field)
    );
}

#[actix_web::test]
async fn login_returns_the_issued_token() {
    let mut auth = MockAuthFlows::new();
    auth.expect_login().return_once(|credentials| {
        assert_eq!(credentials.username().as_ref(), "jagrati");
        Ok(AuthToken::new("signed.jwt.token".to_owned()))
    });
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": "jagrati", "password": "secret"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("token").and_then(Value::as_str),
        Some("signed.jwt.token")
    );
}

#[actix_web::test]
async fn login_maps_bad_credentials_to_unauthorized() {
    let mut auth = MockAuthFlows::new();
    auth.expect_login()
        .return_once(|_| Err(Error::unauthorized("Invalid username or password")));
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": "jagrati", "password": "wrong"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Invalid username or password")
    );
}

#[actix_web::test]
async fn forgot_password_returns_the_confirmation_message() {
    let mut auth = MockAuthFlows::new();
    auth.expect_forgot_password().return_once(|email| {
        assert_eq!(email.as_ref(), "jagrati@x.com");
        Ok(MutationOutcome::clean(Confirmation(
            "Password reset link sent to your email!",
        )))
    });
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(json!({"email": "jagrati@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Password reset link sent to your email!")
    );
}

#[actix_web::test]
async fn forgot_password_maps_unknown_email_to_not_found() {
    let mut auth = MockAuthFlows::new();
    auth.expect_forgot_password()
        .return_once(|_| Err(Error::not_found("Email not registered!")));
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/forgot-password")
        .set_json(json!({"email": "nobody@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn reset_password_returns_the_confirmation_message() {
    let mut auth = MockAuthFlows::new();
    auth.expect_reset_password().return_once(|token, password| {
        assert_eq!(token, "a-reset-token");
        assert_eq!(password, "secret2");
        Ok(Confirmation("Password updated successfully!"))
    });
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(json!({"token": "a-reset-token", "newPassword": "secret2"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Password updated successfully!")
    );
}

#[actix_web::test]
async fn reset_password_maps_unknown_token_to_unauthorized() {
    let mut auth = MockAuthFlows::new();
    auth.expect_reset_password()
        .return_once(|_, _| Err(Error::unauthorized("Invalid or expired reset token!")));
    let app = app_with(auth).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(json!({"token": "stale", "newPassword": "secret2"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(json!({"token": "  ", "newPassword": "secret2"}))]
#[case(json!({"token": "a-reset-token", "newPassword": ""}))]
#[actix_web::test]
async fn reset_password_rejects_blank_fields(#[case] body: Value) {
    let app = app_with(MockAuthFlows::new()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
