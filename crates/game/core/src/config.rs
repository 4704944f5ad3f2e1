//! Tunable carry rules shared by every carrier and basket in a session.

use crate::state::{Pose, Position};

/// Area probed in front of a carrier when it interacts.
///
/// The query circle has radius `radius * scale` and sits `forward_offset`
/// ahead of the carrier along its facing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickupShape {
    pub radius: f32,
    pub forward_offset: f32,
    pub scale: f32,
}

impl PickupShape {
    pub const DEFAULT: Self = Self {
        radius: 1.0,
        forward_offset: 1.0,
        scale: 1.0,
    };

    pub fn scaled_radius(&self) -> f32 {
        self.radius * self.scale
    }

    /// Centre of the query circle for a carrier standing at `pose`.
    pub fn center(&self, pose: &Pose) -> Position {
        pose.ahead(self.forward_offset)
    }

    pub fn contains(&self, pose: &Pose, point: Position) -> bool {
        self.center(pose).distance(point) <= self.scaled_radius()
    }
}

impl Default for PickupShape {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Slots in a newly spawned basket.
    pub container_capacity: u32,
    /// Hand load at which the movement penalty starts.
    pub slowdown_threshold: u32,
    /// Fraction of speed lost per item above the threshold (compounding).
    pub penalty_per_extra: f32,
    /// Speed floor, in world units per second.
    pub min_movement_speed: f32,
    /// Unloaded speed, in world units per second.
    pub base_speed: f32,
    /// Items moved by one explicit transfer.
    pub transfer_batch_size: u32,
    /// Seconds after an accepted interact during which new triggers are ignored.
    pub interact_cooldown: f64,
    pub pickup_shape: PickupShape,
    /// Cosmetic jitter radius for items in a dropped stack.
    pub drop_scatter_radius: f32,
    /// Distance in front of the carrier where an unequipped basket is placed.
    pub container_place_distance: f32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Two keyboard schemes plus four gamepads.
    pub const MAX_CARRIERS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CONTAINER_CAPACITY: u32 = 20;
    pub const DEFAULT_SLOWDOWN_THRESHOLD: u32 = 5;
    pub const DEFAULT_PENALTY_PER_EXTRA: f32 = 0.2;
    pub const DEFAULT_MIN_MOVEMENT_SPEED: f32 = 1.0;
    pub const DEFAULT_BASE_SPEED: f32 = 5.0;
    pub const DEFAULT_TRANSFER_BATCH_SIZE: u32 = 5;
    pub const DEFAULT_INTERACT_COOLDOWN: f64 = 0.25;
    pub const DEFAULT_DROP_SCATTER_RADIUS: f32 = 0.5;
    pub const DEFAULT_CONTAINER_PLACE_DISTANCE: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            container_capacity: Self::DEFAULT_CONTAINER_CAPACITY,
            slowdown_threshold: Self::DEFAULT_SLOWDOWN_THRESHOLD,
            penalty_per_extra: Self::DEFAULT_PENALTY_PER_EXTRA,
            min_movement_speed: Self::DEFAULT_MIN_MOVEMENT_SPEED,
            base_speed: Self::DEFAULT_BASE_SPEED,
            transfer_batch_size: Self::DEFAULT_TRANSFER_BATCH_SIZE,
            interact_cooldown: Self::DEFAULT_INTERACT_COOLDOWN,
            pickup_shape: PickupShape::DEFAULT,
            drop_scatter_radius: Self::DEFAULT_DROP_SCATTER_RADIUS,
            container_place_distance: Self::DEFAULT_CONTAINER_PLACE_DISTANCE,
        }
    }

    /// Rejects parameter combinations the carry rules cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.penalty_per_extra) {
            return Err(ConfigError::PenaltyOutOfRange(self.penalty_per_extra));
        }
        if self.base_speed.is_nan() || self.base_speed <= 0.0 {
            return Err(ConfigError::NonPositiveBaseSpeed(self.base_speed));
        }
        if self.min_movement_speed < 0.0 || self.min_movement_speed > self.base_speed {
            return Err(ConfigError::MinSpeedOutOfRange {
                min: self.min_movement_speed,
                base: self.base_speed,
            });
        }
        if self.interact_cooldown < 0.0 {
            return Err(ConfigError::NegativeCooldown(self.interact_cooldown));
        }
        let shape = &self.pickup_shape;
        if shape.radius < 0.0 || shape.scale < 0.0 {
            return Err(ConfigError::NegativePickupShape);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid combination of configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("penalty_per_extra must be within [0, 1] (got {0})")]
    PenaltyOutOfRange(f32),

    #[error("base_speed must be positive (got {0})")]
    NonPositiveBaseSpeed(f32),

    #[error("min_movement_speed {min} must be within [0, base_speed = {base}]")]
    MinSpeedOutOfRange { min: f32, base: f32 },

    #[error("interact_cooldown must not be negative (got {0})")]
    NegativeCooldown(f64),

    #[error("pickup shape radius and scale must not be negative")]
    NegativePickupShape,
}
