//! Shared application state for HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::{AuthFlows, ContactDirectory, TokenAuthority};

/// Handler-facing view of the wired application.
///
/// Handlers depend on the driving ports only; swapping adapters (or mocks in
/// tests) never touches this layer.
#[derive(Clone)]
pub struct HttpState {
    /// Contact management entry point.
    pub contacts: Arc<dyn ContactDirectory>,
    /// Registration, login, and password-reset entry point.
    pub auth: Arc<dyn AuthFlows>,
    /// Bearer-token verifier used by the request guard.
    pub tokens: Arc<dyn TokenAuthority>,
}

impl HttpState {
    /// Assemble state from the wired port implementations.
    pub fn new(
        contacts: Arc<dyn ContactDirectory>,
        auth: Arc<dyn AuthFlows>,
        tokens: Arc<dyn TokenAuthority>,
    ) -> Self {
        Self {
            contacts,
            auth,
            tokens,
        }
    }
}
