//! Carriers: the agents that move laundry around.

use super::{CarrierId, ContainerId, GameTime, Item, ItemId, ItemState, Pose, Position};

/// Items a carrier dropped in one go, remembered so they can be picked back
/// up as a unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroppedStack {
    pub origin: Position,
    pub items: Vec<ItemId>,
}

impl DroppedStack {
    pub fn new(origin: Position, items: Vec<ItemId>) -> Self {
        Self { origin, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }
}

/// A player-controlled agent.
///
/// # Invariants
///
/// - Every id in `hand_items` refers to an item tagged [`ItemState::InHand`]
///   and held by no one else.
/// - `equipped_container` is mirrored by that basket's `equipped_by`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Carrier {
    pub id: CarrierId,
    pub pose: Pose,
    hand_items: Vec<ItemId>,
    pub equipped_container: Option<ContainerId>,
    pub last_dropped_stack: Option<DroppedStack>,
    /// Clock of the last interact trigger that was not debounced.
    pub last_interact_at: Option<GameTime>,
}

impl Carrier {
    pub fn new(id: CarrierId, pose: Pose) -> Self {
        Self {
            id,
            pose,
            hand_items: Vec::new(),
            equipped_container: None,
            last_dropped_stack: None,
            last_interact_at: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pose.position
    }

    pub fn hand_items(&self) -> &[ItemId] {
        &self.hand_items
    }

    pub fn hand_count(&self) -> usize {
        self.hand_items.len()
    }

    pub fn has_container(&self) -> bool {
        self.equipped_container.is_some()
    }

    /// Puts `item` on top of the hand pile. Hands have no hard limit.
    pub fn hold(&mut self, item: &mut Item) {
        self.hand_items.push(item.id);
        item.set_state(ItemState::InHand);
    }

    /// Takes the top of the hand pile; the item's tag is left for the caller.
    pub fn release_last(&mut self) -> Option<ItemId> {
        self.hand_items.pop()
    }

    /// Empties the hands, returning items bottom to top.
    pub fn release_all(&mut self) -> Vec<ItemId> {
        core::mem::take(&mut self.hand_items)
    }

    /// Whether an interact trigger at `now` falls outside the cooldown window
    /// of the previously accepted one.
    pub fn accepts_trigger(&self, now: GameTime, cooldown: f64) -> bool {
        match self.last_interact_at {
            Some(last) => now.since(last) >= cooldown,
            None => true,
        }
    }

    /// The remembered stack, if its origin lies within `reach` of the carrier.
    pub fn stack_within(&self, reach: f32) -> Option<&DroppedStack> {
        self.last_dropped_stack
            .as_ref()
            .filter(|stack| stack.origin.distance(self.position()) <= reach)
    }
}
