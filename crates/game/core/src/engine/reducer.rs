//! Carry primitives.
//!
//! Every move of an item between ground, hands, and a basket goes through
//! [`StateReducer`] so the item tag and the holding collection always change
//! together. Capacity limits surface as counts, never as errors; the only
//! errors are ids that do not exist in the arena.

use crate::env::Placement;
use crate::state::{
    Carrier, CarrierId, ContainerId, DroppedStack, GameState, GameTime, ItemId, ItemState, Pose,
    StateError,
};

/// Result of picking up a batch of ground items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickUp {
    pub picked: usize,
    /// Items that stayed on the ground because the basket was full.
    pub left_on_ground: usize,
}

/// Wraps mutable access to [`GameState`] with ownership-preserving operations.
pub struct StateReducer<'a> {
    state: &'a mut GameState,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    fn carrier_mut(&mut self, carrier: CarrierId) -> Result<&mut Carrier, StateError> {
        self.state
            .carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))
    }

    /// Records `at` as the carrier's last accepted interact trigger.
    pub fn mark_trigger(&mut self, carrier: CarrierId, at: GameTime) -> Result<(), StateError> {
        self.carrier_mut(carrier)?.last_interact_at = Some(at);
        Ok(())
    }

    /// Moves the carrier; an equipped basket is carried along.
    pub fn set_pose(
        &mut self,
        carrier: CarrierId,
        pose: Pose,
        place_distance: f32,
    ) -> Result<(), StateError> {
        let GameState {
            carriers,
            containers,
            ..
        } = &mut *self.state;
        let carrier = carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))?;
        carrier.pose = pose;
        if let Some(container_id) = carrier.equipped_container {
            let container = containers
                .get_mut(container_id.0 as usize)
                .ok_or(StateError::UnknownContainer(container_id))?;
            container.position = pose.ahead(place_distance);
        }
        Ok(())
    }

    /// Picks up every listed item that is still on the ground.
    ///
    /// With a basket equipped each item is offered to the basket and stays on
    /// the ground if it does not fit; otherwise it goes to the hands, which
    /// never refuse.
    pub fn pick_up(&mut self, carrier: CarrierId, targets: &[ItemId]) -> Result<PickUp, StateError> {
        let GameState {
            items,
            containers,
            carriers,
            ..
        } = &mut *self.state;
        let holder = carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))?;

        let mut result = PickUp::default();
        let mut taken = Vec::with_capacity(targets.len());
        match holder.equipped_container {
            Some(container_id) => {
                let container = containers
                    .get_mut(container_id.0 as usize)
                    .ok_or(StateError::UnknownContainer(container_id))?;
                for &id in targets {
                    let item = items
                        .get_mut(id.0 as usize)
                        .ok_or(StateError::UnknownItem(id))?;
                    if !item.is_on_ground() {
                        continue;
                    }
                    if container.try_add(item) {
                        result.picked += 1;
                        taken.push(id);
                    } else {
                        result.left_on_ground += 1;
                    }
                }
            }
            None => {
                for &id in targets {
                    let item = items
                        .get_mut(id.0 as usize)
                        .ok_or(StateError::UnknownItem(id))?;
                    if !item.is_on_ground() {
                        continue;
                    }
                    holder.hold(item);
                    result.picked += 1;
                    taken.push(id);
                }
            }
        }

        forget_dropped(carriers, &taken);
        Ok(result)
    }

    /// Attaches a free-standing basket to the carrier.
    pub fn equip(
        &mut self,
        carrier: CarrierId,
        container: ContainerId,
        place_distance: f32,
    ) -> Result<(), StateError> {
        let GameState {
            containers,
            carriers,
            ..
        } = &mut *self.state;
        let holder = carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))?;
        let basket = containers
            .get_mut(container.0 as usize)
            .ok_or(StateError::UnknownContainer(container))?;

        holder.equipped_container = Some(container);
        basket.equipped_by = Some(carrier);
        basket.position = holder.pose.ahead(place_distance);
        Ok(())
    }

    /// Detaches the equipped basket and sets it down in front of the carrier.
    ///
    /// Returns the basket that was put down, or `None` if nothing was equipped.
    pub fn unequip(
        &mut self,
        carrier: CarrierId,
        place_distance: f32,
    ) -> Result<Option<ContainerId>, StateError> {
        let GameState {
            containers,
            carriers,
            ..
        } = &mut *self.state;
        let holder = carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))?;
        let Some(container) = holder.equipped_container.take() else {
            return Ok(None);
        };
        let basket = containers
            .get_mut(container.0 as usize)
            .ok_or(StateError::UnknownContainer(container))?;

        basket.equipped_by = None;
        basket.position = holder.pose.ahead(place_distance);
        Ok(Some(container))
    }

    /// Moves up to `max` items from the top of the hands into `container`,
    /// stopping silently once it is full.
    pub fn move_hand_to_container(
        &mut self,
        carrier: CarrierId,
        container: ContainerId,
        max: usize,
    ) -> Result<usize, StateError> {
        let GameState {
            items,
            containers,
            carriers,
            ..
        } = &mut *self.state;
        let holder = carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))?;
        let basket = containers
            .get_mut(container.0 as usize)
            .ok_or(StateError::UnknownContainer(container))?;

        let mut moved = 0;
        while moved < max && !basket.is_full() {
            let Some(id) = holder.release_last() else {
                break;
            };
            let item = items
                .get_mut(id.0 as usize)
                .ok_or(StateError::UnknownItem(id))?;
            basket.try_add(item);
            moved += 1;
        }
        Ok(moved)
    }

    /// Moves up to `max` items from the top of `container` into the hands.
    pub fn move_container_to_hand(
        &mut self,
        carrier: CarrierId,
        container: ContainerId,
        max: usize,
    ) -> Result<usize, StateError> {
        let GameState {
            items,
            containers,
            carriers,
            ..
        } = &mut *self.state;
        let holder = carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))?;
        let basket = containers
            .get_mut(container.0 as usize)
            .ok_or(StateError::UnknownContainer(container))?;

        let mut moved = 0;
        while moved < max {
            let Some(id) = basket.remove_last() else {
                break;
            };
            let item = items
                .get_mut(id.0 as usize)
                .ok_or(StateError::UnknownItem(id))?;
            holder.hold(item);
            moved += 1;
        }
        Ok(moved)
    }

    /// Puts every hand item on the ground as one stack at the carrier's feet
    /// and remembers it as the carrier's last dropped stack.
    ///
    /// `place` receives each item's index within the stack and returns its
    /// cosmetic placement.
    pub fn drop_all<F>(&mut self, carrier: CarrierId, mut place: F) -> Result<usize, StateError>
    where
        F: FnMut(usize) -> Placement,
    {
        let GameState {
            items, carriers, ..
        } = &mut *self.state;
        let holder = carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))?;

        let dropped = holder.release_all();
        for (index, &id) in dropped.iter().enumerate() {
            let item = items
                .get_mut(id.0 as usize)
                .ok_or(StateError::UnknownItem(id))?;
            let placement = place(index);
            item.set_state(ItemState::OnGround);
            item.position = placement.position;
            item.rotation = placement.rotation;
        }

        let count = dropped.len();
        holder.last_dropped_stack = Some(DroppedStack::new(holder.position(), dropped));
        Ok(count)
    }

    /// Picks the carrier's last dropped stack back up into the hands.
    ///
    /// Items someone else took in the meantime are skipped. The stack
    /// reference is cleared either way.
    pub fn reclaim_stack(&mut self, carrier: CarrierId) -> Result<usize, StateError> {
        let GameState {
            items, carriers, ..
        } = &mut *self.state;
        let holder = carriers
            .get_mut(carrier.0 as usize)
            .ok_or(StateError::UnknownCarrier(carrier))?;
        let Some(stack) = holder.last_dropped_stack.take() else {
            return Ok(0);
        };

        let mut count = 0;
        for id in stack.items {
            let item = items
                .get_mut(id.0 as usize)
                .ok_or(StateError::UnknownItem(id))?;
            if item.is_on_ground() {
                holder.hold(item);
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Drops picked-up items from every remembered stack so a later reclaim
/// cannot pull them out of someone else's hands or basket.
fn forget_dropped(carriers: &mut [Carrier], taken: &[ItemId]) {
    if taken.is_empty() {
        return;
    }
    for carrier in carriers {
        let emptied = match carrier.last_dropped_stack.as_mut() {
            Some(stack) => {
                stack.items.retain(|id| !taken.contains(id));
                stack.is_empty()
            }
            None => false,
        };
        if emptied {
            carrier.last_dropped_stack = None;
        }
    }
}
