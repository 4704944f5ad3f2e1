//! Laundry items.
//!
//! An item is a pure state holder: where it lives is recorded by whichever
//! collection references it (a carrier's hands or a basket), and the tag here
//! mirrors that so presentation can re-parent it without a reverse lookup.

use super::{ItemId, Position};

/// Where an item currently lives.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemState {
    #[default]
    OnGround,
    InHand,
    InContainer,
}

/// A single carryable laundry item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    state: ItemState,
    /// Last ground placement. Cosmetic while the item is held.
    pub position: Position,
    /// Yaw in degrees. Cosmetic only.
    pub rotation: f32,
}

impl Item {
    /// Spawns an item lying on the ground.
    pub fn new(id: ItemId, position: Position) -> Self {
        Self {
            id,
            state: ItemState::OnGround,
            position,
            rotation: 0.0,
        }
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    /// Unconditionally replaces the state tag.
    pub fn set_state(&mut self, state: ItemState) {
        self.state = state;
    }

    #[inline]
    pub fn is_on_ground(&self) -> bool {
        self.state == ItemState::OnGround
    }
}
