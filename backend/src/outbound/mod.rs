//! Driven adapters: concrete implementations of the domain's outbound ports.

pub mod cache;
pub mod email;
pub mod events;
pub mod persistence;
pub mod redis;
pub mod token;
