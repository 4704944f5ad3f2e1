//! The interact button.
//!
//! One accepted trigger does exactly one thing, chosen by priority:
//!
//! 1. nearby ground items: pick them all up (into the basket if equipped);
//! 2. a nearby free basket and none equipped: equip it with empty hands,
//!    otherwise deposit the hands into it;
//! 3. nothing nearby: put the equipped basket down, or reclaim the last
//!    dropped stack when standing next to it, or drop everything in hand.

use crate::config::{GameConfig, PickupShape};
use crate::engine::StateReducer;
use crate::env::{Candidate, GameEnv, RngOracle, SpatialOracle, compute_seed, scatter};
use crate::state::{Carrier, CarrierId, ContainerId, GameState, GameTime, ItemId, Position};

use super::{ActionError, ActionTransition, check_ownership, require_carrier};

/// Interact trigger from a carrier at host time `at`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractAction {
    pub carrier: CarrierId,
    pub at: GameTime,
}

impl InteractAction {
    pub fn new(carrier: CarrierId, at: GameTime) -> Self {
        Self { carrier, at }
    }
}

/// Where picked-up items went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupTarget {
    Hands,
    Container(ContainerId),
}

/// What an interact trigger did. Every variant is a normal result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractOutcome {
    /// Inside the cooldown window of the previous accepted trigger.
    Debounced,
    PickedUp {
        picked: usize,
        /// Items the equipped basket had no room for.
        left_on_ground: usize,
        into: PickupTarget,
    },
    Equipped {
        container: ContainerId,
    },
    Deposited {
        container: ContainerId,
        moved: usize,
        left_in_hand: usize,
    },
    Unequipped {
        container: ContainerId,
    },
    Reclaimed {
        count: usize,
    },
    Dropped {
        count: usize,
    },
    Nothing,
}

impl InteractOutcome {
    /// Whether the trigger changed anything besides the debounce clock.
    pub fn changed_state(&self) -> bool {
        match self {
            InteractOutcome::Debounced | InteractOutcome::Nothing => false,
            InteractOutcome::PickedUp { picked, .. } => *picked > 0,
            InteractOutcome::Deposited { moved, .. } => *moved > 0,
            InteractOutcome::Reclaimed { count } | InteractOutcome::Dropped { count } => {
                *count > 0
            }
            InteractOutcome::Equipped { .. } | InteractOutcome::Unequipped { .. } => true,
        }
    }
}

/// Interactables near a carrier, filtered and ordered nearest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Nearby {
    pub items: Vec<ItemId>,
    pub containers: Vec<ContainerId>,
}

impl Nearby {
    /// Filters raw spatial candidates for `carrier`.
    ///
    /// Keeps ground items and baskets nobody has equipped. Items of the
    /// carrier's own stack are left out only when that stack will be
    /// reclaimed as a unit on this trigger (no basket, origin within reach);
    /// otherwise they count as loose laundry.
    pub fn from_candidates<I>(
        state: &GameState,
        carrier: &Carrier,
        shape: &PickupShape,
        candidates: I,
    ) -> Self
    where
        I: IntoIterator<Item = Candidate>,
    {
        let own_stack = if carrier.has_container() {
            None
        } else {
            carrier.stack_within(shape.scaled_radius())
        };

        let mut items = Vec::new();
        let mut containers = Vec::new();
        for candidate in candidates {
            match candidate {
                Candidate::Item(id) => {
                    let Some(item) = state.item(id) else {
                        continue;
                    };
                    if !item.is_on_ground() || own_stack.is_some_and(|stack| stack.contains(id)) {
                        continue;
                    }
                    items.push((item.position, id));
                }
                Candidate::Container(id) => {
                    let Some(container) = state.container(id) else {
                        continue;
                    };
                    if container.is_equipped() {
                        continue;
                    }
                    containers.push((container.position, id));
                }
            }
        }

        let origin = carrier.position();
        Self {
            items: nearest_first(items, origin),
            containers: nearest_first(containers, origin),
        }
    }

    /// Runs the spatial query for `carrier` and filters the result.
    pub fn query<S>(
        state: &GameState,
        spatial: &S,
        carrier: &Carrier,
        shape: &PickupShape,
    ) -> Self
    where
        S: SpatialOracle + ?Sized,
    {
        let candidates = spatial.query_nearby(state, &carrier.pose, shape);
        Self::from_candidates(state, carrier, shape, candidates)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.containers.is_empty()
    }
}

fn nearest_first<K: Ord + Copy>(mut entries: Vec<(Position, K)>, origin: Position) -> Vec<K> {
    entries.sort_by(|(a, a_id), (b, b_id)| {
        origin
            .distance(*a)
            .total_cmp(&origin.distance(*b))
            .then(a_id.cmp(b_id))
    });
    let mut ids: Vec<K> = entries.into_iter().map(|(_, id)| id).collect();
    ids.dedup();
    ids
}

/// Resolves one accepted interact trigger against pre-filtered `nearby`.
///
/// The debounce gate is not checked here; [`InteractAction`] does that before
/// querying. `rng` only jitters where dropped items land. A stack within reach
/// is reclaimed before anything in hand is dropped.
pub fn resolve_interact<R>(
    state: &mut GameState,
    carrier: CarrierId,
    nearby: &Nearby,
    config: &GameConfig,
    rng: &R,
) -> Result<InteractOutcome, ActionError>
where
    R: RngOracle + ?Sized,
{
    let current = require_carrier(state, carrier)?;
    let equipped = current.equipped_container;
    let hand_count = current.hand_count();
    let position = current.position();
    let stack_in_reach = current
        .stack_within(config.pickup_shape.scaled_radius())
        .is_some();
    let (game_seed, nonce) = (state.game_seed, state.nonce);

    let mut reducer = StateReducer::new(state);

    if !nearby.items.is_empty() {
        let result = reducer.pick_up(carrier, &nearby.items)?;
        let into = match equipped {
            Some(container) => PickupTarget::Container(container),
            None => PickupTarget::Hands,
        };
        return Ok(InteractOutcome::PickedUp {
            picked: result.picked,
            left_on_ground: result.left_on_ground,
            into,
        });
    }

    if equipped.is_none()
        && let Some(&container) = nearby.containers.first()
    {
        if hand_count == 0 {
            reducer.equip(carrier, container, config.container_place_distance)?;
            return Ok(InteractOutcome::Equipped { container });
        }
        let moved = reducer.move_hand_to_container(carrier, container, usize::MAX)?;
        return Ok(InteractOutcome::Deposited {
            container,
            moved,
            left_in_hand: hand_count - moved,
        });
    }

    if equipped.is_some() {
        return Ok(match reducer.unequip(carrier, config.container_place_distance)? {
            Some(container) => InteractOutcome::Unequipped { container },
            None => InteractOutcome::Nothing,
        });
    }

    if stack_in_reach {
        let count = reducer.reclaim_stack(carrier)?;
        return Ok(InteractOutcome::Reclaimed { count });
    }

    if hand_count > 0 {
        let radius = config.drop_scatter_radius;
        let count = reducer.drop_all(carrier, |index| {
            let seed = compute_seed(game_seed, nonce, carrier.0, index as u32);
            scatter(rng, seed, position, radius)
        })?;
        return Ok(InteractOutcome::Dropped { count });
    }

    Ok(InteractOutcome::Nothing)
}

impl ActionTransition for InteractAction {
    type Error = ActionError;
    type Result = InteractOutcome;

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
        if !carrier.accepts_trigger(self.at, config.interact_cooldown) {
            return Ok(InteractOutcome::Debounced);
        }

        let spatial = env.spatial()?;
        let rng = env.rng()?;
        let nearby = Nearby::query(state, spatial, carrier, &config.pickup_shape);

        StateReducer::new(state).mark_trigger(self.carrier, self.at)?;
        resolve_interact(state, self.carrier, &nearby, config, rng)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        check_ownership(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Env, PcgRng, RadiusQuery};
    use crate::state::{Facing, ItemState, Pose};

    struct World {
        state: GameState,
        config: GameConfig,
        carrier: CarrierId,
        clock: f64,
    }

    impl World {
        fn new() -> Self {
            let mut state = GameState::with_seed(7);
            let carrier = state
                .add_carrier(Pose::new(Position::ORIGIN, Facing::NORTH))
                .unwrap();
            Self {
                state,
                config: GameConfig::default(),
                carrier,
                clock: 0.0,
            }
        }

        /// Interacts one second after the previous trigger.
        fn interact(&mut self) -> InteractOutcome {
            self.clock += 1.0;
            self.interact_at(self.clock)
        }

        fn interact_at(&mut self, at: f64) -> InteractOutcome {
            let env = Env::with_all(&self.config, &RadiusQuery, &PcgRng);
            let action = InteractAction::new(self.carrier, GameTime(at));
            let env = env.as_game_env();
            action.pre_validate(&self.state, &env).unwrap();
            let outcome = action.apply(&mut self.state, &env).unwrap();
            action.post_validate(&self.state, &env).unwrap();
            outcome
        }

        fn carrier(&self) -> &Carrier {
            self.state.carrier(self.carrier).unwrap()
        }

        fn walk_to(&mut self, position: Position) {
            let facing = self.carrier().pose.facing;
            StateReducer::new(&mut self.state)
                .set_pose(self.carrier, Pose::new(position, facing), 1.0)
                .unwrap();
        }

        /// Items one unit ahead of the origin, inside the default pickup shape.
        fn spawn_in_reach(&mut self, count: usize) -> Vec<ItemId> {
            (0..count)
                .map(|i| self.state.spawn_item(Position::new(0.05 * i as f32, 1.0)))
                .collect()
        }
    }

    #[test]
    fn picks_up_every_nearby_item_into_hands() {
        let mut world = World::new();
        let ids = world.spawn_in_reach(3);
        world.state.spawn_item(Position::new(0.0, 10.0));

        let outcome = world.interact();

        assert_eq!(
            outcome,
            InteractOutcome::PickedUp {
                picked: 3,
                left_on_ground: 0,
                into: PickupTarget::Hands
            }
        );
        assert_eq!(world.carrier().hand_count(), 3);
        for id in ids {
            assert_eq!(world.state.item(id).unwrap().state(), ItemState::InHand);
        }
    }

    #[test]
    fn items_take_priority_over_baskets() {
        let mut world = World::new();
        world.spawn_in_reach(1);
        world.state.spawn_container(Position::new(0.2, 1.0), 20);

        let outcome = world.interact();

        assert!(matches!(outcome, InteractOutcome::PickedUp { picked: 1, .. }));
        assert!(!world.carrier().has_container());
    }

    #[test]
    fn full_basket_leaves_the_rest_on_the_ground() {
        let mut world = World::new();
        let basket = world.state.spawn_container(Position::new(0.0, 1.0), 2);
        assert_eq!(world.interact(), InteractOutcome::Equipped { container: basket });

        world.spawn_in_reach(3);
        let outcome = world.interact();

        assert_eq!(
            outcome,
            InteractOutcome::PickedUp {
                picked: 2,
                left_on_ground: 1,
                into: PickupTarget::Container(basket)
            }
        );
        assert_eq!(world.state.container(basket).unwrap().count(), 2);
        assert_eq!(world.state.ground_items().count(), 1);
        assert_eq!(world.carrier().hand_count(), 0);
    }

    #[test]
    fn empty_hands_equip_the_nearest_basket() {
        let mut world = World::new();
        let far = world.state.spawn_container(Position::new(0.6, 1.5), 20);
        let near = world.state.spawn_container(Position::new(0.0, 0.9), 20);

        let outcome = world.interact();

        assert_eq!(outcome, InteractOutcome::Equipped { container: near });
        assert_eq!(world.carrier().equipped_container, Some(near));
        assert_eq!(world.state.container(near).unwrap().equipped_by, Some(world.carrier));
        assert_eq!(world.state.container(far).unwrap().equipped_by, None);
    }

    #[test]
    fn one_free_slot_deposits_one_and_keeps_four() {
        let mut world = World::new();
        let basket = world.state.spawn_container(Position::new(0.0, 1.0), 3);

        // Preload two items through the basket.
        world.interact();
        world.spawn_in_reach(2);
        world.interact();
        world.interact();
        world.walk_to(Position::new(10.0, 0.0));
        let held: Vec<ItemId> = (0..5)
            .map(|_| world.state.spawn_item(Position::new(10.0, 1.0)))
            .collect();
        world.interact();
        assert_eq!(world.carrier().hand_count(), held.len());
        world.walk_to(Position::ORIGIN);

        let outcome = world.interact();

        assert_eq!(
            outcome,
            InteractOutcome::Deposited {
                container: basket,
                moved: 1,
                left_in_hand: 4
            }
        );
        assert_eq!(world.state.container(basket).unwrap().count(), 3);
        assert_eq!(world.carrier().hand_count(), 4);
        assert!(!world.carrier().has_container());
    }

    #[test]
    fn nothing_nearby_unequips_in_front() {
        let mut world = World::new();
        let basket = world.state.spawn_container(Position::new(0.0, 1.0), 20);
        world.interact();
        world.walk_to(Position::new(4.0, 0.0));

        let outcome = world.interact();

        assert_eq!(outcome, InteractOutcome::Unequipped { container: basket });
        let container = world.state.container(basket).unwrap();
        assert_eq!(container.equipped_by, None);
        assert_eq!(container.position, Position::new(4.0, 1.0));
    }

    #[test]
    fn equipped_carrier_ignores_other_baskets() {
        let mut world = World::new();
        let first = world.state.spawn_container(Position::new(0.0, 1.0), 20);
        world.interact();
        world.walk_to(Position::new(5.0, 0.0));
        world.state.spawn_container(Position::new(5.0, 1.0), 20);

        // Only the free basket is in reach; it is ignored and the own one is put down.
        assert_eq!(world.interact(), InteractOutcome::Unequipped { container: first });
    }

    #[test]
    fn drop_then_reclaim_round_trip() {
        let mut world = World::new();
        let ids = world.spawn_in_reach(4);
        world.interact();
        world.walk_to(Position::new(6.0, 0.0));

        assert_eq!(world.interact(), InteractOutcome::Dropped { count: 4 });
        let stack = world.carrier().last_dropped_stack.clone().unwrap();
        assert_eq!(stack.items, ids);
        assert_eq!(stack.origin, Position::new(6.0, 0.0));
        for id in &ids {
            let item = world.state.item(*id).unwrap();
            assert_eq!(item.state(), ItemState::OnGround);
            assert!(item.position.distance(stack.origin) <= world.config.drop_scatter_radius + 1e-5);
        }

        assert_eq!(world.interact(), InteractOutcome::Reclaimed { count: 4 });
        assert_eq!(world.carrier().hand_items(), ids.as_slice());
        assert_eq!(world.carrier().last_dropped_stack, None);
    }

    #[test]
    fn stack_out_of_reach_is_not_reclaimed() {
        let mut world = World::new();
        world.spawn_in_reach(2);
        world.interact();
        world.walk_to(Position::new(6.0, 0.0));
        world.interact();
        world.walk_to(Position::new(20.0, 0.0));

        assert_eq!(world.interact(), InteractOutcome::Nothing);
        assert!(world.carrier().last_dropped_stack.is_some());
    }

    #[test]
    fn own_stack_ahead_but_out_of_reach_is_picked_up_as_loose() {
        let mut world = World::new();
        let ids = world.spawn_in_reach(3);
        world.interact();
        world.walk_to(Position::ORIGIN);
        assert_eq!(world.interact(), InteractOutcome::Dropped { count: 3 });

        // Origin 1.4 behind, pile inside the forward pickup circle.
        world.walk_to(Position::new(0.0, -1.4));
        let outcome = world.interact();

        assert_eq!(
            outcome,
            InteractOutcome::PickedUp {
                picked: 3,
                left_on_ground: 0,
                into: PickupTarget::Hands
            }
        );
        let mut held = world.carrier().hand_items().to_vec();
        held.sort();
        assert_eq!(held, ids);
        assert_eq!(world.carrier().last_dropped_stack, None);
    }

    #[test]
    fn own_stack_within_reach_is_hidden_from_pickup() {
        let mut world = World::new();
        world.spawn_in_reach(2);
        world.interact();
        world.walk_to(Position::ORIGIN);
        world.interact();

        let carrier = world.carrier();
        let nearby = Nearby::query(&world.state, &RadiusQuery, carrier, &world.config.pickup_shape);
        assert!(nearby.items.is_empty());

        world.walk_to(Position::new(0.0, -1.4));
        let carrier = world.carrier();
        let nearby = Nearby::query(&world.state, &RadiusQuery, carrier, &world.config.pickup_shape);
        assert_eq!(nearby.items.len(), 2);
    }

    #[test]
    fn basket_wearer_scoops_its_own_stack_into_the_basket() {
        let mut world = World::new();
        let ids = world.spawn_in_reach(3);
        world.interact();
        world.walk_to(Position::new(6.0, 0.0));
        world.interact();
        let basket = world.state.spawn_container(Position::new(6.0, 1.0), 20);

        assert_eq!(world.interact(), InteractOutcome::Equipped { container: basket });
        // Stack origin still within reach, pile centred in the pickup circle.
        world.walk_to(Position::new(6.0, -1.0));
        let outcome = world.interact();

        assert_eq!(
            outcome,
            InteractOutcome::PickedUp {
                picked: 3,
                left_on_ground: 0,
                into: PickupTarget::Container(basket)
            }
        );
        let mut stored = world.state.container(basket).unwrap().items().to_vec();
        stored.sort();
        assert_eq!(stored, ids);
        assert_eq!(world.carrier().last_dropped_stack, None);
    }

    #[test]
    fn a_new_drop_supersedes_the_old_stack() {
        let mut world = World::new();
        let first = world.spawn_in_reach(1);
        world.interact();
        world.walk_to(Position::new(6.0, 0.0));
        world.interact();

        world.walk_to(Position::new(0.0, -6.0));
        let second: Vec<ItemId> = (0..2)
            .map(|_| world.state.spawn_item(Position::new(0.0, -5.0)))
            .collect();
        world.interact();
        assert_eq!(world.interact(), InteractOutcome::Dropped { count: 2 });

        let stack = world.carrier().last_dropped_stack.clone().unwrap();
        assert_eq!(stack.items, second);
        assert!(!stack.contains(first[0]));
    }

    #[test]
    fn debounce_ignores_triggers_inside_the_window() {
        let mut world = World::new();
        world.spawn_in_reach(1);

        assert!(matches!(world.interact_at(1.0), InteractOutcome::PickedUp { .. }));
        world.walk_to(Position::new(6.0, 0.0));
        assert_eq!(world.interact_at(1.1), InteractOutcome::Debounced);
        assert_eq!(world.carrier().hand_count(), 1);
        assert_eq!(world.carrier().last_interact_at, Some(GameTime(1.0)));

        assert_eq!(world.interact_at(1.5), InteractOutcome::Dropped { count: 1 });
    }

    #[test]
    fn empty_handed_with_nothing_nearby_does_nothing() {
        let mut world = World::new();
        assert_eq!(world.interact(), InteractOutcome::Nothing);
        assert!(world.carrier().last_interact_at.is_some());
    }

    #[test]
    fn other_carriers_stack_is_loose_laundry() {
        let mut world = World::new();
        let other = world
            .state
            .add_carrier(Pose::new(Position::new(0.0, 1.0), Facing::NORTH))
            .unwrap();
        let ids: Vec<ItemId> = (0..2)
            .map(|_| world.state.spawn_item(Position::new(0.0, 2.0)))
            .collect();

        let env = Env::with_all(&world.config, &RadiusQuery, &PcgRng);
        let env = env.as_game_env();
        InteractAction::new(other, GameTime(0.0))
            .apply(&mut world.state, &env)
            .unwrap();
        StateReducer::new(&mut world.state)
            .set_pose(other, Pose::new(Position::new(0.0, 1.0), Facing::SOUTH), 1.0)
            .unwrap();
        // Dropped at (0, 1): one unit ahead of the first carrier.
        InteractAction::new(other, GameTime(1.0))
            .apply(&mut world.state, &env)
            .unwrap();

        let outcome = world.interact();

        assert!(matches!(outcome, InteractOutcome::PickedUp { picked: 2, .. }));
        assert_eq!(world.carrier().hand_items().len(), ids.len());
        assert_eq!(world.state.carrier(other).unwrap().last_dropped_stack, None);
    }

    #[test]
    fn nearby_orders_by_distance_then_id() {
        let mut state = GameState::empty();
        let carrier = state.add_carrier(Pose::default()).unwrap();
        let b = state.spawn_item(Position::new(0.0, 2.0));
        let a = state.spawn_item(Position::new(0.0, 1.0));
        let tie = state.spawn_item(Position::new(1.0, 0.0));

        let nearby = Nearby::from_candidates(
            &state,
            state.carrier(carrier).unwrap(),
            &PickupShape::default(),
            [
                Candidate::Item(b),
                Candidate::Item(tie),
                Candidate::Item(a),
                Candidate::Item(a),
            ],
        );

        assert_eq!(nearby.items, vec![a, tie, b]);
    }
}
