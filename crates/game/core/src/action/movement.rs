//! Per-frame movement.
//!
//! Integrates one frame of stick or key input at the carrier's penalized
//! speed. Collision and gravity belong to the host; this only moves the
//! logical pose and keeps an equipped basket in front of the carrier.

use crate::engine::StateReducer;
use crate::env::GameEnv;
use crate::state::{CarrierId, Facing, GameState, Pose, Position};
use crate::stats::SpeedPenalty;

use super::{ActionError, ActionTransition, check_ownership, require_carrier};

/// Movement input for one frame. `x`/`y` are clamped to unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub carrier: CarrierId,
    pub x: f32,
    pub y: f32,
    /// Frame duration in seconds.
    pub dt: f32,
}

impl MoveAction {
    pub fn new(carrier: CarrierId, x: f32, y: f32, dt: f32) -> Self {
        Self { carrier, x, y, dt }
    }

    /// Input vector with magnitude at most one; non-finite input is ignored.
    fn clamped_input(&self) -> (f32, f32) {
        if !self.x.is_finite() || !self.y.is_finite() {
            return (0.0, 0.0);
        }
        let length = (self.x * self.x + self.y * self.y).sqrt();
        if length > 1.0 {
            (self.x / length, self.y / length)
        } else {
            (self.x, self.y)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub position: Position,
    /// Speed the frame was integrated with, in world units per second.
    pub speed: f32,
}

impl ActionTransition for MoveAction {
    type Error = ActionError;
    type Result = MoveOutcome;

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

        let speed = SpeedPenalty::from_config(config)
            .effective_speed(carrier.hand_count(), carrier.has_container());
        let dt = if self.dt.is_finite() { self.dt.max(0.0) } else { 0.0 };
        let (x, y) = self.clamped_input();

        let step = speed * dt;
        let position = carrier.position().offset(x * step, y * step);
        let facing = Facing::from_vector(x, y).unwrap_or(carrier.pose.facing);

        StateReducer::new(state).set_pose(
            self.carrier,
            Pose::new(position, facing),
            config.container_place_distance,
        )?;
        Ok(MoveOutcome { position, speed })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        check_ownership(state)
    }
}
