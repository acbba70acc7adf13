//! Row types mapping between Diesel and the domain.

use diesel::prelude::*;
use tracing::warn;

use crate::domain::{Contact, ContactId, Role, User, UserId, Username};
use crate::domain::user::EmailAddress;

use super::schema::{contacts, users};

/// Persisted contact row.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = contacts, check_for_backend(diesel::pg::Pg))]
pub struct ContactRow {
    /// Generated primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address on record.
    pub email: String,
    /// Phone number on record.
    pub phone: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: ContactId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
        }
    }
}

/// Insertable contact row (identity assigned by the database).
#[derive(Debug, Insertable)]
#[diesel(table_name = contacts)]
pub struct NewContactRow<'a> {
    /// Display name.
    pub name: &'a str,
    /// Email address on record.
    pub email: &'a str,
    /// Phone number on record.
    pub phone: &'a str,
}

/// Persisted user row.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users, check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Generated primary key.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    /// Role tag.
    pub role: String,
}

/// Convert a user row into a domain user.
///
/// Rows were validated on the way in, so failures here indicate data edited
/// outside the application; those rows are reported as errors rather than
/// silently repaired, except the role tag which degrades to [`Role::User`].
pub fn row_to_user(row: UserRow) -> Result<User, String> {
    let username = Username::new(&row.username)
        .map_err(|err| format!("user {} has invalid username: {err}", row.id))?;
    let email = EmailAddress::new(&row.email)
        .map_err(|err| format!("user {} has invalid email: {err}", row.id))?;
    let role = row.role.parse::<Role>().unwrap_or_else(|_| {
        warn!(user_id = row.id, tag = %row.role, "unrecognised role tag, treating as ROLE_USER");
        Role::User
    });
    Ok(User {
        id: UserId::new(row.id),
        username,
        email,
        password_hash: row.password_hash,
        role,
    })
}

/// Insertable user row (identity assigned by the database).
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    /// Unique login name.
    pub username: &'a str,
    /// Unique email address.
    pub email: &'a str,
    /// Argon2 PHC-format password hash.
    pub password_hash: &'a str,
    /// Role tag.
    pub role: &'a str,
}
