//! Contact API handlers.
//!
//! Every route requires a bearer token carrying the `ROLE_USER` capability;
//! other roles are rejected with 403.
//!
//! ```text
//! GET    /api/v1/contacts
//! POST   /api/v1/contacts {"name":"John Doe","phone":"1234567890","email":"john@x.com"}
//! GET    /api/v1/contacts/{id}
//! PUT    /api/v1/contacts/{id} {"name":"John Smith","phone":"0987654321"}
//! DELETE /api/v1/contacts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::contact::{Contact, ContactChanges, ContactDraft, ContactId, ContactValidationError};
use crate::domain::user::Role;
use crate::domain::Error;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::log_side_effect_warnings;
use crate::inbound::http::state::HttpState;

/// Create request body for `POST /api/v1/contacts`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewContactRequest {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "1234567890")]
    pub phone: String,
    #[schema(example = "john@x.com")]
    pub email: String,
}

impl TryFrom<NewContactRequest> for ContactDraft {
    type Error = ContactValidationError;

    fn try_from(value: NewContactRequest) -> Result<Self, Self::Error> {
        Self::try_new(&value.name, &value.phone, &value.email)
    }
}

/// Update request body for `PUT /api/v1/contacts/{id}`.
///
/// Email is not accepted here; updates change name and phone only.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[schema(example = "John Smith")]
    pub name: String,
    #[schema(example = "0987654321")]
    pub phone: String,
}

impl TryFrom<UpdateContactRequest> for ContactChanges {
    type Error = ContactValidationError;

    fn try_from(value: UpdateContactRequest) -> Result<Self, Self::Error> {
        Self::try_new(&value.name, &value.phone)
    }
}

fn map_validation_error(err: ContactValidationError) -> Error {
    let field = match err {
        ContactValidationError::BlankName => "name",
        ContactValidationError::BlankPhone => "phone",
        ContactValidationError::BlankEmail => "email",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": "blank_field" }))
}

/// List all contacts.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    responses(
        (status = 200, description = "Contacts", body = [Contact]),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Wrong capability", body = crate::inbound::http::error::ApiError),
        (status = 503, description = "Contact store unavailable", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Contact>>> {
    user.require_role(Role::User)?;
    let contacts = state.contacts.list().await?;
    Ok(web::Json(contacts))
}

/// Fetch one contact by id.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    params(("id" = i64, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact", body = Contact),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Wrong capability", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Not found", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Contact>> {
    user.require_role(Role::User)?;
    let contact = state.contacts.get(ContactId::new(path.into_inner())).await?;
    Ok(web::Json(contact))
}

/// Create a contact.
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = NewContactRequest,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Wrong capability", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<NewContactRequest>,
) -> ApiResult<HttpResponse> {
    user.require_role(Role::User)?;
    let draft = ContactDraft::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let outcome = state.contacts.add(draft).await?;
    log_side_effect_warnings("create contact", &outcome.warnings);
    Ok(HttpResponse::Created().json(outcome.value))
}

/// Update a contact's name and phone.
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{id}",
    params(("id" = i64, Path, description = "Contact identifier")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = Contact),
        (status = 400, description = "Invalid request", body = crate::inbound::http::error::ApiError),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Wrong capability", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Not found", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateContactRequest>,
) -> ApiResult<web::Json<Contact>> {
    user.require_role(Role::User)?;
    let changes = ContactChanges::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let outcome = state
        .contacts
        .update(ContactId::new(path.into_inner()), changes)
        .await?;
    log_side_effect_warnings("update contact", &outcome.warnings);
    Ok(web::Json(outcome.value))
}

/// Delete a contact.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    params(("id" = i64, Path, description = "Contact identifier")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::error::ApiError),
        (status = 403, description = "Wrong capability", body = crate::inbound::http::error::ApiError),
        (status = 404, description = "Not found", body = crate::inbound::http::error::ApiError)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    user.require_role(Role::User)?;
    let outcome = state
        .contacts
        .delete(ContactId::new(path.into_inner()))
        .await?;
    log_side_effect_warnings("delete contact", &outcome.warnings);
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
