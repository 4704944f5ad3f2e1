//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! actions via [`game_core::GameEngine`], and publishes events to the
//! EventBus. Commands are handled strictly one at a time, so a carrier's
//! triggers never overlap and two carriers never race for the same item.

use tokio::sync::{mpsc, oneshot};

use game_core::{
    Action, ActionResult, CarrierFields, CarrierId, EntityRef, ExecuteError, ExecutionOutcome,
    GameEngine, GameState, InteractOutcome, Pose, TransitionPhase,
};
use game_content::LevelLayout;
use tracing::{debug, error, info};

use crate::api::{Result, RuntimeError};
use crate::events::{EventBus, GameStateEvent, SessionEvent, extract_events};
use crate::oracle::OracleBundle;
use crate::session::{ControlScheme, JoinRoster, JoinedCarrier, Tint};

/// Requests the handle sends to the worker.
pub enum Command {
    /// Join a new player and spawn its carrier.
    Join {
        scheme: ControlScheme,
        reply: oneshot::Sender<Result<JoinedCarrier>>,
    },
    /// Execute a single action.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Execute same-tick actions in carrier order.
    ExecuteBatch {
        actions: Vec<Action>,
        reply: oneshot::Sender<Vec<(CarrierId, Result<ExecutionOutcome>)>>,
    },
    /// Replace a carrier's display label.
    SetLabel {
        carrier: CarrierId,
        label: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Clone of the current world.
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Single owner of the world; applies commands in arrival order.
pub struct SimulationWorker {
    state: GameState,
    oracles: OracleBundle,
    level: LevelLayout,
    roster: JoinRoster,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: GameState,
        oracles: OracleBundle,
        level: LevelLayout,
        roster: JoinRoster,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            level = %level.name,
            items = state.items().len(),
            baskets = state.containers().len(),
            "SimulationWorker initialized"
        );

        Self {
            state,
            oracles,
            level,
            roster,
            command_rx,
            event_bus,
        }
    }

    /// Runs until every command sender is gone.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Join { scheme, reply } => {
                let result = self.handle_join(scheme);
                if reply.send(result).is_err() {
                    debug!("Join reply channel closed (caller dropped)");
                }
            }
            Command::Execute { action, reply } => {
                let result = self.handle_action(action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::ExecuteBatch { mut actions, reply } => {
                // Stable: a carrier's own triggers keep their order.
                actions.sort_by_key(Action::actor);
                let results = actions
                    .into_iter()
                    .map(|action| (action.actor(), self.handle_action(action)))
                    .collect();
                if reply.send(results).is_err() {
                    debug!("ExecuteBatch reply channel closed (caller dropped)");
                }
            }
            Command::SetLabel {
                carrier,
                label,
                reply,
            } => {
                let result = self.handle_label(carrier, label);
                if reply.send(result).is_err() {
                    debug!("SetLabel reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("state query abandoned by caller");
                }
            }
        }
    }

    fn handle_join(&mut self, scheme: ControlScheme) -> Result<JoinedCarrier> {
        let slot = self.roster.reserve(scheme)?;
        let spawn = self.level.spawn_point(slot.spawn_index);
        let carrier = self.state.add_carrier(Pose::at(spawn))?;
        self.roster.commit(scheme);

        let tint = Tint::roll(self.oracles.rng(), self.state.game_seed, carrier);
        info!(
            target: "runtime::session",
            %carrier,
            %scheme,
            label = %slot.label,
            x = spawn.x,
            y = spawn.y,
            "carrier joined"
        );

        self.event_bus.publish(SessionEvent::CarrierJoined {
            carrier,
            scheme,
            spawn,
            tint,
        });
        self.event_bus.publish(SessionEvent::LabelChanged {
            carrier,
            label: slot.label.clone(),
        });
        self.event_bus.publish(GameStateEvent::CarrierChanged {
            entity: EntityRef::Carrier(carrier),
            fields: CarrierFields::all(),
        });

        Ok(JoinedCarrier {
            carrier,
            scheme,
            label: slot.label,
            spawn,
            tint,
        })
    }

    fn handle_label(&mut self, carrier: CarrierId, label: String) -> Result<()> {
        if self.state.carrier(carrier).is_none() {
            return Err(RuntimeError::UnknownCarrier(carrier));
        }
        debug!(target: "runtime::session", %carrier, %label, "label changed");
        self.event_bus
            .publish(SessionEvent::LabelChanged { carrier, label });
        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> Result<ExecutionOutcome> {
        let env = self.oracles.as_game_env();
        let mut engine = GameEngine::new(&mut self.state);

        match engine.execute(env, &action) {
            Ok(outcome) => {
                log_outcome(&action, &outcome.action_result);
                if outcome.action_result.is_noop() {
                    return Ok(outcome);
                }

                for event in extract_events(&outcome.delta) {
                    self.event_bus.publish(event);
                }
                self.event_bus.publish(GameStateEvent::ActionExecuted {
                    action,
                    delta: Box::new(outcome.delta.clone()),
                    result: outcome.action_result.clone(),
                });
                Ok(outcome)
            }
            Err(error) => {
                self.handle_execute_error(&action, &error);
                Err(error.into())
            }
        }
    }

    fn handle_execute_error(&self, action: &Action, error: &ExecuteError) {
        let phase = error.phase();
        let message = error.to_string();

        if phase == TransitionPhase::PreValidate {
            debug!(
                target: "runtime::worker",
                action = ?action,
                phase = phase.as_str(),
                error = %message,
                "action rejected"
            );
        } else {
            error!(
                target: "runtime::worker",
                action = ?action,
                phase = phase.as_str(),
                error = %message,
                "action failed after validation"
            );
        }

        self.event_bus.publish(GameStateEvent::ActionFailed {
            action: action.clone(),
            phase,
            error: message,
        });
    }
}

fn log_outcome(action: &Action, result: &ActionResult) {
    let carrier = action.actor();
    match result {
        ActionResult::Interact(InteractOutcome::Debounced) => {
            debug!(target: "runtime::worker", %carrier, "interact debounced");
        }
        ActionResult::Interact(outcome) => {
            debug!(target: "runtime::worker", %carrier, ?outcome, "interact resolved");
        }
        ActionResult::Transfer(outcome) => {
            debug!(target: "runtime::worker", %carrier, ?outcome, "transfer resolved");
        }
        // Movement runs every frame; keep it out of debug output.
        ActionResult::Move(outcome) => {
            tracing::trace!(target: "runtime::worker", %carrier, ?outcome, "moved");
        }
    }
}
