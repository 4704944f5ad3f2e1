//! Authoritative carry state.
//!
//! Items, baskets, and carriers live in arenas keyed by stable ids; "in hand"
//! and "in basket" are id lists, never pointers. Runtime layers clone or
//! query this state but mutate it exclusively through the engine.
pub mod delta;
pub mod error;
pub mod types;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
pub use delta::{CarrierFields, ContainerFields, ItemFields, StateDelta};
pub use error::{Holder, StateError};
pub use types::{
    Carrier, CarrierId, Container, ContainerId, DroppedStack, EntityRef, Facing, GameTime, Item,
    ItemId, ItemState, Pose, Position,
};

/// Canonical snapshot of the carry state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed for cosmetic randomness (drop scatter).
    ///
    /// Combined with `nonce` so every drop gets its own jitter.
    pub game_seed: u64,

    /// Number of actions executed so far.
    pub nonce: u64,

    pub(crate) items: Vec<Item>,
    pub(crate) containers: Vec<Container>,
    pub(crate) carriers: ArrayVec<Carrier, { GameConfig::MAX_CARRIERS }>,
}

impl GameState {
    /// Creates an empty world with a specific seed.
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            nonce: 0,
            items: Vec::new(),
            containers: Vec::new(),
            carriers: ArrayVec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::with_seed(0)
    }

    /// Spawns a loose item on the ground.
    pub fn spawn_item(&mut self, position: Position) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(Item::new(id, position));
        id
    }

    /// Spawns a free-standing, empty basket.
    pub fn spawn_container(&mut self, position: Position, capacity: u32) -> ContainerId {
        let id = ContainerId(self.containers.len() as u32);
        self.containers.push(Container::new(id, capacity, position));
        id
    }

    /// Registers a new carrier at `pose`.
    ///
    /// # Errors
    ///
    /// Returns `StateError::CarrierListFull` once `GameConfig::MAX_CARRIERS`
    /// carriers have joined.
    pub fn add_carrier(&mut self, pose: Pose) -> Result<CarrierId, StateError> {
        let id = CarrierId(self.carriers.len() as u32);
        self.carriers
            .try_push(Carrier::new(id, pose))
            .map_err(|_| StateError::CarrierListFull {
                max: GameConfig::MAX_CARRIERS,
            })?;
        Ok(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0 as usize)
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.0 as usize)
    }

    pub fn carrier(&self, id: CarrierId) -> Option<&Carrier> {
        self.carriers.get(id.0 as usize)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn carriers(&self) -> &[Carrier] {
        &self.carriers
    }

    /// Items lying loose on the ground.
    pub fn ground_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_on_ground())
    }

    /// The basket a carrier has equipped, if any.
    pub fn equipped_container(&self, carrier: CarrierId) -> Option<&Container> {
        self.carrier(carrier)?
            .equipped_container
            .and_then(|id| self.container(id))
    }

    /// Verifies that every item has exactly one holder matching its tag and
    /// that carrier/basket attachments agree.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate_ownership(&self) -> Result<(), StateError> {
        let mut holders: Vec<Option<Holder>> = vec![None; self.items.len()];

        for carrier in &self.carriers {
            for &item in carrier.hand_items() {
                claim(&mut holders, item, Holder::Hand(carrier.id))?;
            }
            if let Some(container_id) = carrier.equipped_container {
                let container = self
                    .container(container_id)
                    .ok_or(StateError::UnknownContainer(container_id))?;
                if container.equipped_by != Some(carrier.id) {
                    return Err(StateError::EquipMismatch {
                        carrier: carrier.id,
                        container: container_id,
                    });
                }
            }
        }

        for container in &self.containers {
            if container.count() > container.capacity() as usize {
                return Err(StateError::ContainerOverfull {
                    container: container.id,
                    count: container.count(),
                    capacity: container.capacity(),
                });
            }
            if let Some(owner) = container.equipped_by {
                let equipped = self.carrier(owner).and_then(|c| c.equipped_container);
                if equipped != Some(container.id) {
                    return Err(StateError::EquipMismatch {
                        carrier: owner,
                        container: container.id,
                    });
                }
            }
            for &item in container.items() {
                claim(&mut holders, item, Holder::Container(container.id))?;
            }
        }

        for (item, holder) in self.items.iter().zip(&holders) {
            let expected = match holder {
                None => ItemState::OnGround,
                Some(Holder::Hand(_)) => ItemState::InHand,
                Some(Holder::Container(_)) => ItemState::InContainer,
            };
            if item.state() != expected {
                return Err(StateError::StateMismatch {
                    item: item.id,
                    tagged: item.state(),
                    expected,
                });
            }
        }

        Ok(())
    }
}

fn claim(holders: &mut [Option<Holder>], item: ItemId, holder: Holder) -> Result<(), StateError> {
    let slot = holders
        .get_mut(item.0 as usize)
        .ok_or(StateError::UnknownItem(item))?;
    if let Some(existing) = slot {
        return Err(StateError::DoubleOwnership {
            item,
            first: *existing,
            second: holder,
        });
    }
    *slot = Some(holder);
    Ok(())
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_spawn_order() {
        let mut state = GameState::empty();
        assert_eq!(state.spawn_item(Position::ORIGIN), ItemId(0));
        assert_eq!(state.spawn_item(Position::ORIGIN), ItemId(1));
        assert_eq!(state.spawn_container(Position::ORIGIN, 3), ContainerId(0));
        assert_eq!(state.add_carrier(Pose::default()), Ok(CarrierId(0)));
    }

    #[test]
    fn carrier_list_is_bounded() {
        let mut state = GameState::empty();
        for _ in 0..GameConfig::MAX_CARRIERS {
            state.add_carrier(Pose::default()).unwrap();
        }
        assert_eq!(
            state.add_carrier(Pose::default()),
            Err(StateError::CarrierListFull {
                max: GameConfig::MAX_CARRIERS
            })
        );
    }

    #[test]
    fn fresh_world_is_consistent() {
        let mut state = GameState::empty();
        state.spawn_item(Position::ORIGIN);
        state.spawn_container(Position::new(1.0, 0.0), 2);
        state.add_carrier(Pose::default()).unwrap();

        assert_eq!(state.validate_ownership(), Ok(()));
    }

    #[test]
    fn detects_item_held_twice() {
        let mut state = GameState::empty();
        let item = state.spawn_item(Position::ORIGIN);
        let basket = state.spawn_container(Position::ORIGIN, 2);
        let carrier = state.add_carrier(Pose::default()).unwrap();

        state.carriers[carrier.0 as usize].hold(&mut state.items[item.0 as usize]);
        state.containers[basket.0 as usize].try_add(&mut state.items[item.0 as usize]);

        assert!(matches!(
            state.validate_ownership(),
            Err(StateError::DoubleOwnership { .. })
        ));
    }

    #[test]
    fn detects_stale_state_tag() {
        let mut state = GameState::empty();
        let item = state.spawn_item(Position::ORIGIN);
        state.items[item.0 as usize].set_state(ItemState::InHand);

        assert_eq!(
            state.validate_ownership(),
            Err(StateError::StateMismatch {
                item,
                tagged: ItemState::InHand,
                expected: ItemState::OnGround,
            })
        );
    }
}
