//! Session assembly: one simulation worker, its command channel, and the
//! event bus, started from a level layout.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_content::LevelLayout;
use game_core::{GameConfig, GameState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{EventBus, Topic};
use crate::oracle::OracleBundle;
use crate::session::JoinRoster;
use crate::workers::{Command, SimulationWorker};

/// Carry rules plus channel sizing for one session.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub max_gamepads: usize,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            max_gamepads: JoinRoster::DEFAULT_MAX_GAMEPADS,
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

/// A running co-op session.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Starts with default rules and an empty level.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// A new handle; the worker lives as long as any handle does.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from one topic.
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<crate::Event> {
        self.handle.subscribe(topic)
    }

    /// Waits for the worker to drain its queue and exit.
    ///
    /// Every cloned [`RuntimeHandle`] must be dropped first, otherwise this
    /// never returns.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Configures and starts a [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    level: Option<LevelLayout>,
    state: Option<GameState>,
    oracles: Option<OracleBundle>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            level: None,
            state: None,
            oracles: None,
        }
    }

    /// Replaces the carry rules and channel sizes.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Level to build the world and spawn points from.
    pub fn level(mut self, level: LevelLayout) -> Self {
        self.level = Some(level);
        self
    }

    /// Start from an explicit state instead of the level's initial layout.
    ///
    /// The level still supplies spawn points.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Replace the default spatial query and RNG.
    ///
    /// The bundle's configuration takes precedence over `RuntimeConfig::game_config`.
    pub fn oracles(mut self, oracles: OracleBundle) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Validates the rules, seeds the world from the level, and spawns the
    /// worker task.
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self
            .oracles
            .unwrap_or_else(|| OracleBundle::new(self.config.game_config.clone()));
        oracles.config().validate()?;

        let level = self.level.unwrap_or_else(|| LevelLayout::empty("empty"));
        let initial_state = match self.state {
            Some(state) => state,
            None => level.build_state(oracles.config()),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(
            command_tx,
            event_bus.clone(),
            Arc::clone(&oracles.config),
        );

        let sim_worker = SimulationWorker::new(
            initial_state,
            oracles,
            level,
            JoinRoster::new(self.config.max_gamepads),
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
