//! Session runtime for the laundry co-op.
//!
//! This crate wires together the carry engine, the join flow, and a single
//! simulation worker into an async API. Consumers embed [`Runtime`] to join
//! players, feed their inputs, and subscribe to state-change events through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`session`] decides who may join and where they spawn
//! - [`oracle`] bundles the engine's read-only collaborators
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, GameStateEvent, SessionEvent, Topic, extract_events};
pub use oracle::OracleBundle;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::{ControlScheme, JoinRoster, JoinSlot, JoinedCarrier, SessionError, Tint};
