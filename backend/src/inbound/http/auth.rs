//! Authentication API handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"username":"jagrati","email":"jagrati@x.com","password":"secret"}
//! POST /api/v1/auth/login {"username":"jagrati","password":"secret"}
//! POST /api/v1/auth/forgot-password {"email":"jagrati@x.com"}
//! POST /api/v1/auth/reset-password {"token":"…","newPassword":"secret2"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::Error;
use crate::domain::auth::{AuthPayloadError, LoginCredentials, Registration};
use crate::domain::user::EmailAddress;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::log_side_effect_warnings;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "jagrati")]
    pub username: String,
    #[schema(example = "jagrati@x.com")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "jagrati")]
    pub username: String,
    #[schema(example = "secret")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = AuthPayloadError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Request body for `POST /api/v1/auth/forgot-password`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    #[schema(example = "jagrati@x.com")]
    pub email: String,
}

/// Request body for `POST /api/v1/auth/reset-password`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    #[schema(example = "secret2")]
    pub new_password: String,
}

/// Confirmation body returned by mutating auth endpoints.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    #[schema(example = "User registered successfully!")]
    pub message: String,
}

/// Token body returned by a successful login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
}

fn map_payload_error(err: AuthPayloadError) -> Error {
    let field = match err {
        AuthPayloadError::EmptyUsername => "username",
        AuthPayloadError::InvalidEmail => "email",
        AuthPayloadError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ApiError),
        (status = 409, description = "Username or email taken", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let payload = payload.into_inner();
    info!(username = %payload.username, "registration attempt");
    let registration =
        Registration::try_from_parts(&payload.username, &payload.email, &payload.password)
            .map_err(map_payload_error)?;
    let outcome = state.auth.register(registration).await?;
    log_side_effect_warnings("register", &outcome.warnings);
    Ok(web::Json(MessageResponse {
        message: outcome.value.message().to_owned(),
    }))
}

/// Authenticate and obtain a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let payload = payload.into_inner();
    info!(username = %payload.username, "login attempt");
    let credentials = LoginCredentials::try_from(payload).map_err(map_payload_error)?;
    let token = state.auth.login(&credentials).await?;
    Ok(web::Json(TokenResponse {
        token: token.into(),
    }))
}

/// Request a password-reset token by email.
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email sent", body = MessageResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Email not registered", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["auth"],
    operation_id = "forgotPassword",
    security([])
)]
#[post("/auth/forgot-password")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let email = EmailAddress::new(&payload.email)
        .map_err(|_| map_payload_error(AuthPayloadError::InvalidEmail))?;
    info!(email = %email, "password reset requested");
    let outcome = state.auth.forgot_password(&email).await?;
    log_side_effect_warnings("forgot password", &outcome.warnings);
    Ok(web::Json(MessageResponse {
        message: outcome.value.message().to_owned(),
    }))
}

/// Redeem a reset token and set a new password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Invalid or expired token", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["auth"],
    operation_id = "resetPassword",
    security([])
)]
#[post("/auth/reset-password")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let payload = payload.into_inner();
    if payload.token.trim().is_empty() {
        return Err(Error::invalid_request("token must not be empty")
            .with_details(json!({ "field": "token" }))
            .into());
    }
    if payload.new_password.is_empty() {
        return Err(map_payload_error(AuthPayloadError::EmptyPassword).into());
    }
    let confirmation = state
        .auth
        .reset_password(&payload.token, &payload.new_password)
        .await?;
    Ok(web::Json(MessageResponse {
        message: confirmation.message().to_owned(),
    }))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
