//! Error classification shared by every game-core error type.
//!
//! Carry rules themselves never fail: a full basket, an empty hand, or an
//! interact with nothing nearby are ordinary outcomes reported as values.
//! What remains is a caller addressing an entity that does not exist, a
//! host that forgot to supply an oracle, or an ownership invariant found
//! broken after a transition.

/// How the runtime should treat a failed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The request itself was wrong (unknown carrier, session full).
    /// Reject it and carry on.
    Validation,

    /// The world ended up inconsistent, e.g. an item with two holders.
    Internal,

    /// The engine was wired without a collaborator it needs.
    Fatal,
}

impl ErrorSeverity {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Internal and fatal errors point at a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        !matches!(self, Self::Validation)
    }
}

/// Implemented by every error enum in this crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and metrics, e.g. `STATE_UNKNOWN_ITEM`.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
