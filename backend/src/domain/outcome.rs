//! Mutation outcomes and side-effect warnings.
//!
//! Persistence is authoritative; cache maintenance, event publication, and
//! notification email are best-effort side effects. When one of them fails
//! after the persisted step committed, the operation still succeeds — the
//! failure is carried alongside the result as a warning so it is never
//! silent and never conflated with a persistence error.

use std::fmt;

/// A best-effort side effect that failed after persistence committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffectWarning {
    /// A cache read, population, or invalidation failed.
    Cache {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Publishing a mutation event to the exchange failed.
    EventPublish {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A notification email could not be sent.
    Email {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl fmt::Display for SideEffectWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cache { message } => write!(f, "cache maintenance failed: {message}"),
            Self::EventPublish { message } => write!(f, "event publication failed: {message}"),
            Self::Email { message } => write!(f, "notification email failed: {message}"),
        }
    }
}

/// Successful result of a mutating operation, plus any side-effect warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome<T> {
    /// The committed result.
    pub value: T,
    /// Side effects that failed after the commit, in occurrence order.
    pub warnings: Vec<SideEffectWarning>,
}

impl<T> MutationOutcome<T> {
    /// Outcome with no warnings.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Record a failed side effect.
    pub fn push_warning(&mut self, warning: SideEffectWarning) {
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn warnings_accumulate_in_order() {
        let mut outcome = MutationOutcome::clean(42_u32);
        outcome.push_warning(SideEffectWarning::Cache {
            message: "redis down".to_owned(),
        });
        outcome.push_warning(SideEffectWarning::EventPublish {
            message: "channel closed".to_owned(),
        });

        assert_eq!(outcome.value, 42);
        assert_eq!(outcome.warnings.len(), 2);
        assert!(
            outcome.warnings[0]
                .to_string()
                .starts_with("cache maintenance failed")
        );
    }
}
