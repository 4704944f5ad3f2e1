//! Deterministic carry rules for the laundry co-op.
//!
//! `game-core` defines the canonical state (items, baskets, carriers), the
//! actions a carrier can take, and the engine that applies them. It has no
//! I/O: spatial queries and randomness come in through the oracles in
//! [`env`], and every mutation flows through [`engine::GameEngine`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionError, ActionResult, ActionTransition, InteractAction, InteractOutcome,
    MoveAction, MoveOutcome, Nearby, PickupTarget, TransferAction, TransferDirection,
    TransferOutcome, resolve_interact, transfer,
};
pub use config::{ConfigError, GameConfig, PickupShape};
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, StateReducer, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{
    Candidate, Env, GameEnv, OracleError, PcgRng, Placement, RadiusQuery, RngOracle,
    SpatialOracle, compute_seed, scatter,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Carrier, CarrierFields, CarrierId, Container, ContainerFields, ContainerId, DroppedStack,
    EntityRef, Facing, GameState, GameTime, Holder, Item, ItemFields, ItemId, ItemState, Pose,
    Position, StateDelta, StateError,
};
pub use stats::{SpeedPenalty, effective_speed, movement_multiplier};
