//! Action execution errors.
//!
//! Rule outcomes such as "basket full" or "debounced" are ordinary results.
//! Only misuse of the engine ends up here: unknown ids, missing oracles, and
//! broken ownership after a transition.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CarrierId, StateError};

/// Errors that can occur during action execution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("unknown {0}")]
    UnknownCarrier(CarrierId),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    State(#[from] StateError),

    /// Post-condition check found an ownership violation.
    #[error("ownership invariant violated: {0}")]
    InvariantViolated(StateError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::UnknownCarrier(_) => ErrorSeverity::Validation,
            ActionError::Oracle(error) => error.severity(),
            ActionError::State(error) => error.severity(),
            ActionError::InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::UnknownCarrier(_) => "ACTION_UNKNOWN_CARRIER",
            ActionError::Oracle(error) => error.error_code(),
            ActionError::State(error) => error.error_code(),
            ActionError::InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}
