//! Failures reported by [`GameEngine::execute`](super::GameEngine::execute).

use crate::action::ActionError;
use crate::error::{ErrorSeverity, GameError};

/// Stage of the transition pipeline an error came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// An action error tagged with the phase that raised it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{phase} failed: {error}")]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }

    /// Adapter for `map_err`.
    pub(crate) fn at(phase: TransitionPhase) -> impl FnOnce(E) -> Self {
        move |error| Self::new(phase, error)
    }
}

/// Why an action could not run. The state is rolled back before this is
/// returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("interact: {0}")]
    Interact(TransitionPhaseError<ActionError>),

    #[error("transfer: {0}")]
    Transfer(TransitionPhaseError<ActionError>),

    #[error("move: {0}")]
    Move(TransitionPhaseError<ActionError>),
}

impl ExecuteError {
    fn inner(&self) -> &TransitionPhaseError<ActionError> {
        match self {
            ExecuteError::Interact(e) | ExecuteError::Transfer(e) | ExecuteError::Move(e) => e,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.inner().phase
    }

    /// The underlying carry-rule error.
    pub fn action_error(&self) -> &ActionError {
        &self.inner().error
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.action_error().severity()
    }

    fn error_code(&self) -> &'static str {
        self.action_error().error_code()
    }
}
