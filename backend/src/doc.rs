//! OpenAPI document assembled from handler annotations.

use actix_web::{get, web};
use utoipa::OpenApi;

use crate::domain::contact::Contact;
use crate::inbound::http::auth::{
    ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest,
    TokenResponse,
};
use crate::inbound::http::contacts::{NewContactRequest, UpdateContactRequest};
use crate::inbound::http::error::ApiError;

/// Aggregated API description for the service.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::forgot_password,
        crate::inbound::http::auth::reset_password,
    ),
    components(schemas(
        Contact,
        NewContactRequest,
        UpdateContactRequest,
        RegisterRequest,
        LoginRequest,
        ForgotPasswordRequest,
        ResetPasswordRequest,
        MessageResponse,
        TokenResponse,
        ApiError,
    )),
    tags(
        (name = "contacts", description = "Contact management"),
        (name = "auth", description = "Registration, login, and password reset")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
#[get("/openapi.json")]
pub async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}
