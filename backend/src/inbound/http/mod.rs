//! HTTP inbound adapter.
//!
//! Handlers translate JSON payloads into domain values, call the driving
//! ports, and map domain errors onto status codes via [`error::ApiError`].

pub mod auth;
pub mod bearer;
pub mod contacts;
pub mod error;
pub mod state;

#[cfg(test)]
pub mod test_utils;

pub use self::error::{ApiError, ApiResult};

use tracing::warn;

use crate::domain::outcome::SideEffectWarning;

/// Record degraded side effects of an otherwise successful mutation.
///
/// The mutation already committed; warnings are operator signal, never a
/// client-facing failure.
pub(crate) fn log_side_effect_warnings(operation: &str, warnings: &[SideEffectWarning]) {
    for warning in warnings {
        warn!(operation, warning = %warning, "side effect degraded");
    }
}
