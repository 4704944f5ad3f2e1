//! Derived movement stats.
//!
//! Everything here is a pure function of configuration and carry load so the
//! movement integrator and tests can evaluate it without touching state.

pub mod speed;

pub use speed::{SpeedPenalty, effective_speed, movement_multiplier};
