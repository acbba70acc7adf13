//! Contact data model.
//!
//! A contact is the primary domain entity: a stored name/phone/email record
//! with a database-generated identity. Constructors validate the non-blank
//! invariants so services and adapters only ever see well-formed values.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable contact identifier assigned by the contact store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ContactId(i64);

impl ContactId {
    /// Wrap a store-assigned identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value for persistence and cache keys.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors raised when constructing contact values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    /// Name was missing or blank once trimmed.
    #[error("name must not be blank")]
    BlankName,
    /// Phone was missing or blank once trimmed.
    #[error("phone must not be blank")]
    BlankPhone,
    /// Email was missing or blank once trimmed.
    #[error("email must not be blank")]
    BlankEmail,
}

/// A persisted contact record.
///
/// ## Invariants
/// - `id` is immutable once assigned by the store.
/// - `name`, `email`, and `phone` are non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: ContactId,
    /// Display name.
    #[schema(example = "John Doe")]
    pub name: String,
    /// Email address on record.
    #[schema(example = "john@x.com")]
    pub email: String,
    /// Phone number on record.
    #[schema(example = "1234567890")]
    pub phone: String,
}

fn require_non_blank(
    value: &str,
    error: ContactValidationError,
) -> Result<String, ContactValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

/// Field values for a contact that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    email: String,
    phone: String,
}

impl ContactDraft {
    /// Validate raw field values into a draft ready for insertion.
    pub fn try_new(
        name: &str,
        phone: &str,
        email: &str,
    ) -> Result<Self, ContactValidationError> {
        Ok(Self {
            name: require_non_blank(name, ContactValidationError::BlankName)?,
            phone: require_non_blank(phone, ContactValidationError::BlankPhone)?,
            email: require_non_blank(email, ContactValidationError::BlankEmail)?,
        })
    }

    /// Validated display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Validated email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Validated phone number.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }
}

/// Mutable fields accepted by the update operation.
///
/// Email is deliberately absent: updates touch name and phone only, matching
/// the documented contract of `PUT /contacts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactChanges {
    name: String,
    phone: String,
}

impl ContactChanges {
    /// Validate raw field values into an update payload.
    pub fn try_new(name: &str, phone: &str) -> Result<Self, ContactValidationError> {
        Ok(Self {
            name: require_non_blank(name, ContactValidationError::BlankName)?,
            phone: require_non_blank(phone, ContactValidationError::BlankPhone)?,
        })
    }

    /// Replacement display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Replacement phone number.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "123", "a@b.c", ContactValidationError::BlankName)]
    #[case("  ", "123", "a@b.c", ContactValidationError::BlankName)]
    #[case("John", "", "a@b.c", ContactValidationError::BlankPhone)]
    #[case("John", "123", "   ", ContactValidationError::BlankEmail)]
    fn draft_rejects_blank_fields(
        #[case] name: &str,
        #[case] phone: &str,
        #[case] email: &str,
        #[case] expected: ContactValidationError,
    ) {
        let err = ContactDraft::try_new(name, phone, email).expect_err("blank field must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn draft_trims_fields() {
        let draft = ContactDraft::try_new(" John Doe ", " 1234567890 ", " john@x.com ")
            .expect("valid draft");
        assert_eq!(draft.name(), "John Doe");
        assert_eq!(draft.phone(), "1234567890");
        assert_eq!(draft.email(), "john@x.com");
    }

    #[rstest]
    fn changes_trim_fields() {
        let changes = ContactChanges::try_new(" John Smith ", " 0987654321 ").expect("valid changes");

        assert_eq!(changes.name(), "John Smith");
        assert_eq!(changes.phone(), "0987654321");
    }
}
