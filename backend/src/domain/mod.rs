//! Domain entities, services, and port seams.
//!
//! Types here are transport and storage agnostic; adapters in `inbound/`
//! and `outbound/` translate to HTTP and concrete backends. Constructors
//! validate invariants so every value past the boundary is well-formed.

pub mod auth;
pub mod auth_service;
pub mod contact;
pub mod contact_service;
pub mod error;
pub mod outcome;
pub mod password;
pub mod ports;
pub mod reset_token;
pub mod user;

pub use self::auth::{AuthPayloadError, AuthToken, LoginCredentials, Registration};
pub use self::auth_service::AuthService;
pub use self::contact::{
    Contact, ContactChanges, ContactDraft, ContactId, ContactValidationError,
};
pub use self::contact_service::ContactService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::outcome::{MutationOutcome, SideEffectWarning};
pub use self::reset_token::{ResetToken, ResetTokenRegistry};
pub use self::user::{EmailAddress, Role, User, UserId, UserValidationError, Username};
