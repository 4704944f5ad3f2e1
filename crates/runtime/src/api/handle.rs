//! Async front door to the simulation worker.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for each
//! carrier input, plus event streams for specific topics.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{
    Action, ActionResult, CarrierId, ExecutionOutcome, GameConfig, GameState, GameTime,
    InteractAction, InteractOutcome, MoveAction, MoveOutcome, TransferAction, TransferOutcome,
    effective_speed,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::session::{ControlScheme, JoinedCarrier};
use crate::workers::Command;

/// Cheap to clone; every clone talks to the same worker.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    config: Arc<GameConfig>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            config,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Joins a player with the given input device.
    pub async fn join(&self, scheme: ControlScheme) -> Result<JoinedCarrier> {
        self.request(|reply| Command::Join { scheme, reply }).await?
    }

    /// Executes any action and returns the full outcome including the delta.
    pub async fn execute(&self, action: impl Into<Action>) -> Result<ExecutionOutcome> {
        let action = action.into();
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    /// Presses the interact button for `carrier` at host time `at`.
    pub async fn interact(&self, carrier: CarrierId, at: GameTime) -> Result<InteractOutcome> {
        let outcome = self.execute(InteractAction::new(carrier, at)).await?;
        match outcome.action_result {
            ActionResult::Interact(result) => Ok(result),
            _ => Err(RuntimeError::UnexpectedResult { action: "interact" }),
        }
    }

    /// Interact triggers that arrived in the same tick.
    ///
    /// Resolved one after another in carrier join order, so when two
    /// carriers reach for the same item the earlier joiner gets it and the
    /// other sees the updated world.
    pub async fn interact_batch(
        &self,
        carriers: &[CarrierId],
        at: GameTime,
    ) -> Result<Vec<(CarrierId, InteractOutcome)>> {
        let actions = carriers
            .iter()
            .map(|&carrier| Action::from(InteractAction::new(carrier, at)))
            .collect();
        let results = self
            .request(|reply| Command::ExecuteBatch { actions, reply })
            .await?;

        results
            .into_iter()
            .map(|(carrier, result)| match result?.action_result {
                ActionResult::Interact(outcome) => Ok((carrier, outcome)),
                _ => Err(RuntimeError::UnexpectedResult { action: "interact" }),
            })
            .collect()
    }

    /// Presses the transfer button. `amount` defaults to the configured batch size.
    pub async fn transfer(
        &self,
        carrier: CarrierId,
        at: GameTime,
        amount: Option<u32>,
    ) -> Result<TransferOutcome> {
        let action = TransferAction {
            carrier,
            at,
            amount,
        };
        match self.execute(action).await?.action_result {
            ActionResult::Transfer(result) => Ok(result),
            _ => Err(RuntimeError::UnexpectedResult { action: "transfer" }),
        }
    }

    /// Integrates one frame of movement input.
    pub async fn move_carrier(
        &self,
        carrier: CarrierId,
        x: f32,
        y: f32,
        dt: f32,
    ) -> Result<MoveOutcome> {
        match self.execute(MoveAction::new(carrier, x, y, dt)).await?.action_result {
            ActionResult::Move(result) => Ok(result),
            _ => Err(RuntimeError::UnexpectedResult { action: "move" }),
        }
    }

    /// Replaces the label shown above a carrier.
    pub async fn set_label(&self, carrier: CarrierId, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        self.request(|reply| Command::SetLabel {
            carrier,
            label,
            reply,
        })
        .await?
    }

    /// Snapshot of the whole world after all earlier commands.
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Current movement speed of `carrier` under its load.
    pub async fn speed(&self, carrier: CarrierId) -> Result<f32> {
        let state = self.query_state().await?;
        let current = state
            .carrier(carrier)
            .ok_or(RuntimeError::UnknownCarrier(carrier))?;
        Ok(effective_speed(
            &self.config,
            current.hand_count(),
            current.has_container(),
        ))
    }

    /// Configuration the session runs with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Events on one topic from now on.
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Executed actions, failures, per-entity changes
    /// - `Topic::Session` - Joins and label changes
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
