//! Port traits separating the domain from its collaborators.
//!
//! Driving ports ([`ContactDirectory`], [`AuthFlows`]) are called by inbound
//! adapters; driven ports (repositories, cache, publisher, mailer, token
//! authority) are implemented by outbound adapters.

pub mod auth_flows;
pub mod contact_cache;
pub mod contact_directory;
pub mod contact_repository;
pub mod event_publisher;
pub mod mailer;
pub mod token_authority;
pub mod user_repository;

pub use self::auth_flows::{AuthFlows, Confirmation};
pub use self::contact_cache::{ContactCache, ContactCacheError};
pub use self::contact_directory::ContactDirectory;
pub use self::contact_repository::{ContactRepository, ContactRepositoryError};
pub use self::event_publisher::{ContactEvent, EventPublishError, EventPublisher};
pub use self::mailer::{Mailer, MailerError};
pub use self::token_authority::{TokenAuthority, TokenError, TokenIdentity};
pub use self::user_repository::{NewUser, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use self::auth_flows::MockAuthFlows;
#[cfg(test)]
pub use self::contact_cache::MockContactCache;
#[cfg(test)]
pub use self::contact_directory::MockContactDirectory;
#[cfg(test)]
pub use self::contact_repository::MockContactRepository;
#[cfg(test)]
pub use self::event_publisher::MockEventPublisher;
#[cfg(test)]
pub use self::mailer::MockMailer;
#[cfg(test)]
pub use self::token_authority::MockTokenAuthority;
#[cfg(test)]
pub use self::user_repository::MockUserRepository;
