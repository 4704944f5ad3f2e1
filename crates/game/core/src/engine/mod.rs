//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! runs the transition phases, advances the nonce, and reports which
//! entities changed so the presentation layer can refresh them.
//!
//! Every call snapshots the whole state up front; the copy serves both as
//! the rollback point and as the baseline for the delta. Co-op sessions hold
//! a few carriers and at most a few hundred items, so the clone stays cheap.

mod errors;
mod reducer;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use reducer::{PickUp, StateReducer};

use crate::action::{Action, ActionResult};
use crate::env::GameEnv;
use crate::state::{GameState, StateDelta};

/// Complete outcome of action execution.
///
/// Contains both state change metadata (delta) and the action-specific result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Which entities changed, and which of their fields.
    pub delta: StateDelta,

    pub action_result: ActionResult,
}

/// Game engine that executes actions against a borrowed state.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an action and returns its outcome plus the state delta.
    ///
    /// Soft outcomes (full basket, nothing nearby, debounced trigger) are
    /// successes. A debounced trigger leaves the nonce untouched. On error the
    /// state is restored to what it was before the call and the nonce is not
    /// advanced.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let before = self.state.clone();

        let action_result = match transition::execute_transition(action, self.state, &env) {
            Ok(result) => result,
            Err(error) => {
                *self.state = before;
                return Err(error);
            }
        };

        if !action_result.is_noop() {
            self.state.nonce += 1;
        }

        let delta = StateDelta::from_states(action.clone(), &before, self.state);
        Ok(ExecutionOutcome {
            delta,
            action_result,
        })
    }
}
