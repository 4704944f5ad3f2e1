//! Spatial query seam.
//!
//! Overlap tests belong to the host engine. The core only needs "which items
//! and baskets are inside this area right now"; [`RadiusQuery`] answers that
//! from arena positions for hosts without a physics scene (and for tests).

use crate::config::PickupShape;
use crate::state::{ContainerId, GameState, ItemId, Pose};

/// An interactable object reported by a spatial query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Candidate {
    Item(ItemId),
    Container(ContainerId),
}

/// Returns the interactables inside `shape` as seen from `pose`.
///
/// The result is treated as an unordered set and is re-filtered by the
/// resolver, so implementations may over-report.
pub trait SpatialOracle: Send + Sync {
    fn query_nearby(&self, state: &GameState, pose: &Pose, shape: &PickupShape) -> Vec<Candidate>;
}

/// Circle overlap against positions stored in the arena.
#[derive(Clone, Copy, Debug, Default)]
pub struct RadiusQuery;

impl SpatialOracle for RadiusQuery {
    fn query_nearby(&self, state: &GameState, pose: &Pose, shape: &PickupShape) -> Vec<Candidate> {
        let items = state
            .ground_items()
            .filter(|item| shape.contains(pose, item.position))
            .map(|item| Candidate::Item(item.id));
        let containers = state
            .containers()
            .iter()
            .filter(|container| !container.is_equipped())
            .filter(|container| shape.contains(pose, container.position))
            .map(|container| Candidate::Container(container.id));
        items.chain(containers).collect()
    }
}
