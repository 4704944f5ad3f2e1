//! Carrier actions.
//!
//! Every input a carrier can produce is an [`Action`]: the interact button,
//! the explicit transfer button, and movement. Each variant implements
//! [`ActionTransition`] and runs through the engine's three-phase pipeline.
//!
//! # Module Structure
//!
//! - `error`: [`ActionError`], the failure type shared by all actions
//! - `interact`: the interaction resolver (pick up, equip, deposit, drop, reclaim)
//! - `transfer`: moving batches between hands and the equipped basket
//! - `movement`: penalized movement and facing updates

pub mod error;
pub mod interact;
pub mod movement;
pub mod transfer;

pub use error::ActionError;
pub use interact::{InteractAction, InteractOutcome, Nearby, PickupTarget, resolve_interact};
pub use movement::{MoveAction, MoveOutcome};
pub use transfer::{TransferAction, TransferDirection, TransferOutcome, transfer};

use crate::env::GameEnv;
use crate::state::{Carrier, CarrierId, GameState};

/// Defines how a concrete action variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. Hooks receive
/// read-only access to the configuration and oracles via `Env`.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the carrier performing this action.
    fn actor(&self) -> CarrierId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Top-level action enum.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Interact(InteractAction),
    Transfer(TransferAction),
    Move(MoveAction),
}

impl Action {
    /// Returns the carrier performing this action.
    pub fn actor(&self) -> CarrierId {
        match self {
            Action::Interact(action) => action.actor(),
            Action::Transfer(action) => action.actor(),
            Action::Move(action) => action.actor(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Interact(_) => "interact",
            Action::Transfer(_) => "transfer",
            Action::Move(_) => "move",
        }
    }
}

impl From<InteractAction> for Action {
    fn from(action: InteractAction) -> Self {
        Action::Interact(action)
    }
}

impl From<TransferAction> for Action {
    fn from(action: TransferAction) -> Self {
        Action::Transfer(action)
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Action::Move(action)
    }
}

/// Action-specific execution result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Interact(InteractOutcome),
    Transfer(TransferOutcome),
    Move(MoveOutcome),
}

impl ActionResult {
    /// Debounced triggers are ignored outright: no state change, no event.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            ActionResult::Interact(InteractOutcome::Debounced)
                | ActionResult::Transfer(TransferOutcome::Debounced)
        )
    }
}

pub(crate) fn require_carrier(state: &GameState, id: CarrierId) -> Result<&Carrier, ActionError> {
    state.carrier(id).ok_or(ActionError::UnknownCarrier(id))
}

/// Shared post-condition: every item still has exactly one holder.
pub(crate) fn check_ownership(state: &GameState) -> Result<(), ActionError> {
    state
        .validate_ownership()
        .map_err(ActionError::InvariantViolated)
}
