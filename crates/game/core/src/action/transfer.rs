//! Explicit hands/basket rebalancing.
//!
//! The transfer button moves one batch per trigger in whichever direction
//! fixes the imbalance: hands into the basket while anything is held,
//! otherwise back out of the basket up to the slowdown threshold.

use crate::config::GameConfig;
use crate::engine::StateReducer;
use crate::env::GameEnv;
use crate::state::{CarrierId, GameState, GameTime};

use super::{ActionError, ActionTransition, check_ownership, require_carrier};

/// Transfer trigger. `amount` defaults to the configured batch size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferAction {
    pub carrier: CarrierId,
    pub at: GameTime,
    pub amount: Option<u32>,
}

impl TransferAction {
    pub fn new(carrier: CarrierId, at: GameTime) -> Self {
        Self {
            carrier,
            at,
            amount: None,
        }
    }

    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = Some(amount);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferDirection {
    HandToContainer,
    ContainerToHand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferOutcome {
    Debounced,
    /// No basket equipped; there is nothing to rebalance against.
    NoContainer,
    Moved {
        direction: TransferDirection,
        count: usize,
    },
}

/// Moves up to `amount` items between the carrier's hands and its equipped
/// basket.
///
/// Hand to basket is capped by free slots; basket to hand stops once the
/// hands reach `slowdown_threshold`. Either may move zero items.
pub fn transfer(
    state: &mut GameState,
    carrier: CarrierId,
    amount: usize,
    config: &GameConfig,
) -> Result<TransferOutcome, ActionError> {
    let current = require_carrier(state, carrier)?;
    let Some(container) = current.equipped_container else {
        return Ok(TransferOutcome::NoContainer);
    };
    let hand_count = current.hand_count();

    let mut reducer = StateReducer::new(state);
    if hand_count > 0 {
        let count = reducer.move_hand_to_container(carrier, container, amount)?;
        return Ok(TransferOutcome::Moved {
            direction: TransferDirection::HandToContainer,
            count,
        });
    }

    let room = (config.slowdown_threshold as usize).saturating_sub(hand_count);
    let count = reducer.move_container_to_hand(carrier, container, amount.min(room))?;
    Ok(TransferOutcome::Moved {
        direction: TransferDirection::ContainerToHand,
        count,
    })
}

impl ActionTransition for TransferAction {
    type Error = ActionError;
    type Result = TransferOutcome;

    fn actor(&self) -> CarrierId {
        self.carrier
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        require_carrier(state, self.carrier)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let config = env.config();
        let carrier = require_carrier(state, self.carrier)?;
        if !carrier.accepts_trigger(self.at, config.interact_cooldown) {
            return Ok(TransferOutcome::Debounced);
        }
        StateReducer::new(state).mark_trigger(self.carrier, self.at)?;

        let amount = self.amount.unwrap_or(config.transfer_batch_size) as usize;
        transfer(state, self.carrier, amount, config)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        check_ownership(state)
    }
}
