//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the game state and executes every command
//! to completion before taking the next one.

mod simulation;

pub use simulation::{Command, SimulationWorker};
