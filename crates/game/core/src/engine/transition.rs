//! Runs one action through the pre_validate / apply / post_validate phases.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Drives `transition` through all three phases, stopping at the first error.
///
/// `apply` may leave the state half-mutated when it fails; the engine
/// restores its snapshot in that case.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    use TransitionPhase::*;

    transition
        .pre_validate(state, env)
        .map_err(TransitionPhaseError::at(PreValidate))?;
    let result = transition
        .apply(state, env)
        .map_err(TransitionPhaseError::at(Apply))?;
    transition
        .post_validate(state, env)
        .map_err(TransitionPhaseError::at(PostValidate))?;

    Ok(result)
}

pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    let result = match action {
        Action::Interact(interact) => ActionResult::Interact(
            drive_transition(interact, state, env).map_err(ExecuteError::Interact)?,
        ),
        Action::Transfer(transfer) => ActionResult::Transfer(
            drive_transition(transfer, state, env).map_err(ExecuteError::Transfer)?,
        ),
        Action::Move(movement) => ActionResult::Move(
            drive_transition(movement, state, env).map_err(ExecuteError::Move)?,
        ),
    };
    Ok(result)
}
