//! Contact-management backend.
//!
//! A hexagonal actix-web service: the `domain` module owns entities,
//! services, and port traits; `inbound` adapts HTTP onto the driving ports;
//! `outbound` implements the driven ports against Postgres, Redis, SMTP,
//! and JWT; `server` wires it all together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
