mod bitmask;

use crate::action::Action;
use crate::state::{
    Carrier, CarrierId, Container, ContainerId, EntityRef, GameState, Item, ItemId,
};

pub use bitmask::{CarrierFields, ContainerFields, ItemFields};

/// Minimal description of an executed action's impact on the carry state.
///
/// Only ids and field bitmasks are stored; consumers read current values
/// from the state itself. Each entry is one "state changed" notification for
/// the presentation layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// The action that caused this state transition.
    pub action: Action,

    /// Nonce after the action executed.
    pub nonce: u64,

    pub items: Vec<(ItemId, ItemFields)>,
    pub containers: Vec<(ContainerId, ContainerFields)>,
    pub carriers: Vec<(CarrierId, CarrierFields)>,
}

impl StateDelta {
    /// Creates a delta by comparing two game states.
    ///
    /// Arenas are append-only, so entries are compared pairwise by index;
    /// entities spawned between the two snapshots are reported with every bit set.
    pub fn from_states(action: Action, before: &GameState, after: &GameState) -> Self {
        Self {
            action,
            nonce: after.nonce,
            items: diff(&before.items, &after.items, |item| item.id, item_fields),
            containers: diff(
                &before.containers,
                &after.containers,
                |container| container.id,
                container_fields,
            ),
            carriers: diff(
                &before.carriers,
                &after.carriers,
                |carrier| carrier.id,
                carrier_fields,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.containers.is_empty() && self.carriers.is_empty()
    }

    /// Every entity touched by the action, carriers first.
    pub fn changed_entities(&self) -> impl Iterator<Item = EntityRef> + '_ {
        let carriers = self.carriers.iter().map(|(id, _)| EntityRef::Carrier(*id));
        let containers = self
            .containers
            .iter()
            .map(|(id, _)| EntityRef::Container(*id));
        let items = self.items.iter().map(|(id, _)| EntityRef::Item(*id));
        carriers.chain(containers).chain(items)
    }

    pub fn item_fields(&self, id: ItemId) -> ItemFields {
        lookup(&self.items, id)
    }

    pub fn container_fields(&self, id: ContainerId) -> ContainerFields {
        lookup(&self.containers, id)
    }

    pub fn carrier_fields(&self, id: CarrierId) -> CarrierFields {
        lookup(&self.carriers, id)
    }
}

fn lookup<K: PartialEq + Copy, F: Default + Copy>(entries: &[(K, F)], id: K) -> F {
    entries
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, fields)| *fields)
        .unwrap_or_default()
}

fn diff<T, K, F>(
    before: &[T],
    after: &[T],
    key: impl Fn(&T) -> K,
    fields: impl Fn(&T, &T) -> F,
) -> Vec<(K, F)>
where
    F: bitflags::Flags + Copy,
{
    let mut changes = Vec::new();
    for (index, current) in after.iter().enumerate() {
        let mask = match before.get(index) {
            Some(previous) => fields(previous, current),
            None => F::all(),
        };
        if !mask.is_empty() {
            changes.push((key(current), mask));
        }
    }
    changes
}

fn item_fields(before: &Item, after: &Item) -> ItemFields {
    let mut mask = ItemFields::empty();
    if before.state() != after.state() {
        mask |= ItemFields::STATE;
    }
    if before.position != after.position || before.rotation != after.rotation {
        mask |= ItemFields::PLACEMENT;
    }
    mask
}

fn container_fields(before: &Container, after: &Container) -> ContainerFields {
    let mut mask = ContainerFields::empty();
    if before.items() != after.items() {
        mask |= ContainerFields::CONTENTS;
    }
    if before.equipped_by != after.equipped_by {
        mask |= ContainerFields::EQUIPPED_BY;
    }
    if before.position != after.position {
        mask |= ContainerFields::POSITION;
    }
    mask
}

fn carrier_fields(before: &Carrier, after: &Carrier) -> CarrierFields {
    let mut mask = CarrierFields::empty();
    if before.pose != after.pose {
        mask |= CarrierFields::POSE;
    }
    if before.hand_items() != after.hand_items() {
        mask |= CarrierFields::HAND;
    }
    if before.equipped_container != after.equipped_container {
        mask |= CarrierFields::CONTAINER;
    }
    if before.last_dropped_stack != after.last_dropped_stack {
        mask |= CarrierFields::DROPPED_STACK;
    }
    mask
}
