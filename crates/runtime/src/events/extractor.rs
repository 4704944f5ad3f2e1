//! Event extraction from state deltas.

use game_core::{EntityRef, StateDelta};

use super::types::GameStateEvent;

/// One change notification per entity touched by the delta: carriers
/// first, then baskets, then items.
pub fn extract_events(delta: &StateDelta) -> Vec<GameStateEvent> {
    let carriers = delta
        .carriers
        .iter()
        .map(|&(id, fields)| GameStateEvent::CarrierChanged {
            entity: EntityRef::Carrier(id),
            fields,
        });
    let containers = delta
        .containers
        .iter()
        .map(|&(id, fields)| GameStateEvent::ContainerChanged {
            entity: EntityRef::Container(id),
            fields,
        });
    let items = delta
        .items
        .iter()
        .map(|&(id, fields)| GameStateEvent::ItemChanged {
            entity: EntityRef::Item(id),
            fields,
        });

    carriers.chain(containers).chain(items).collect()
}

#[cfg(test)]
mod tests {
    use game_core::{CarrierId, GameState, GameTime, InteractAction, ItemFields, ItemId, Pose};

    use super::*;

    #[test]
    fn one_event_per_changed_entity() {
        let before = {
            let mut state = GameState::empty();
            state.add_carrier(Pose::default()).unwrap();
            state
        };
        let mut after = before.clone();
        after.spawn_item(game_core::Position::ORIGIN);

        let action = InteractAction::new(CarrierId(0), GameTime::ZERO).into();
        let delta = StateDelta::from_states(action, &before, &after);
        let events = extract_events(&delta);

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GameStateEvent::ItemChanged {
                entity: EntityRef::Item(ItemId(0)),
                fields
            } if fields == ItemFields::all()
        ));
        assert_eq!(events[0].entity(), Some(EntityRef::Item(ItemId(0))));
    }
}
