//! Baskets: bounded LIFO collections of items.

use super::{CarrierId, ContainerId, Item, ItemId, ItemState, Position};

/// A basket with a fixed number of slots.
///
/// # Invariants
///
/// - `items.len() <= capacity` at all times; [`Container::try_add`] refuses
///   instead of overflowing.
/// - Items stay owned by the basket regardless of who carries it;
///   equipping only sets `equipped_by`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    pub id: ContainerId,
    capacity: u32,
    items: Vec<ItemId>,
    pub equipped_by: Option<CarrierId>,
    pub position: Position,
}

impl Container {
    pub fn new(id: ContainerId, capacity: u32, position: Position) -> Self {
        Self {
            id,
            capacity,
            items: Vec::new(),
            equipped_by: None,
            position,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Items in insertion order; the last one is the top of the pile.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn free_slots(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.items.len())
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped_by.is_some()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    /// Puts `item` on top of the pile.
    ///
    /// Returns `false` and leaves both sides untouched when the basket is
    /// full. A full basket is a normal boundary, not an error.
    pub fn try_add(&mut self, item: &mut Item) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item.id);
        item.set_state(ItemState::InContainer);
        true
    }

    /// Takes the most recently added item.
    ///
    /// The item's state tag is left for the caller to set.
    pub fn remove_last(&mut self) -> Option<ItemId> {
        self.items.pop()
    }
}
