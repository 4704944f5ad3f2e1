//! End-to-end checks of the join flow and carry rules through the runtime.

use game_content::{BasketSpec, LevelLayout};
use game_core::{
    CarrierId, GameConfig, GameTime, InteractOutcome, ItemState, PickupTarget, Position,
    TransferDirection, TransferOutcome,
};
use runtime::{
    ControlScheme, Event, GameStateEvent, Runtime, RuntimeConfig, RuntimeError, SessionError,
    SessionEvent, Topic,
};

fn level(items: Vec<Position>, baskets: Vec<BasketSpec>) -> LevelLayout {
    LevelLayout {
        name: "test".to_owned(),
        seed: 7,
        spawn_points: vec![
            Position::new(0.0, 0.0),
            Position::new(0.5, 0.0),
            Position::new(10.0, 0.0),
        ],
        items,
        baskets,
    }
}

fn pile(count: usize, at: Position) -> Vec<Position> {
    vec![at; count]
}

async fn start(layout: LevelLayout) -> Runtime {
    Runtime::builder()
        .level(layout)
        .build()
        .await
        .expect("runtime should start")
}

#[tokio::test]
async fn players_join_once_per_device() {
    let runtime = start(level(Vec::new(), Vec::new())).await;
    let handle = runtime.handle();

    let wasd = handle.join(ControlScheme::Wasd).await.unwrap();
    assert_eq!(wasd.carrier, CarrierId(0));
    assert_eq!(wasd.label, "WASD Keyboard");
    assert_eq!(wasd.spawn, Position::new(0.0, 0.0));

    let pad = handle.join(ControlScheme::Gamepad(7)).await.unwrap();
    assert_eq!(pad.carrier, CarrierId(1));
    assert_eq!(pad.label, "Gamepad 1");
    assert_eq!(pad.spawn, Position::new(10.0, 0.0));

    let again = handle.join(ControlScheme::Wasd).await.unwrap_err();
    assert!(matches!(
        again,
        RuntimeError::Session(SessionError::AlreadyJoined(ControlScheme::Wasd))
    ));

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.carriers().len(), 2);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn pickup_drop_and_reclaim() {
    let runtime = start(level(pile(3, Position::new(0.0, 1.0)), Vec::new())).await;
    let handle = runtime.handle();
    let carrier = handle.join(ControlScheme::Wasd).await.unwrap().carrier;

    let picked = handle.interact(carrier, GameTime(0.0)).await.unwrap();
    assert_eq!(
        picked,
        InteractOutcome::PickedUp {
            picked: 3,
            left_on_ground: 0,
            into: PickupTarget::Hands,
        }
    );

    let bounced = handle.interact(carrier, GameTime(0.1)).await.unwrap();
    assert_eq!(bounced, InteractOutcome::Debounced);

    let dropped = handle.interact(carrier, GameTime(1.0)).await.unwrap();
    assert_eq!(dropped, InteractOutcome::Dropped { count: 3 });

    let state = handle.query_state().await.unwrap();
    let current = state.carrier(carrier).unwrap();
    assert_eq!(current.hand_count(), 0);
    assert_eq!(current.last_dropped_stack.as_ref().map(|s| s.len()), Some(3));
    assert!(state.items().iter().all(|item| item.state() == ItemState::OnGround));

    let reclaimed = handle.interact(carrier, GameTime(2.0)).await.unwrap();
    assert_eq!(reclaimed, InteractOutcome::Reclaimed { count: 3 });

    let state = handle.query_state().await.unwrap();
    let current = state.carrier(carrier).unwrap();
    assert_eq!(current.hand_count(), 3);
    assert!(current.last_dropped_stack.is_none());
    assert_eq!(state.validate_ownership(), Ok(()));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn basket_deposit_equip_and_transfer() {
    let runtime = start(level(
        pile(7, Position::new(0.0, 1.0)),
        vec![BasketSpec {
            position: Position::new(0.0, 1.0),
            capacity: None,
        }],
    ))
    .await;
    let handle = runtime.handle();
    let carrier = handle.join(ControlScheme::Wasd).await.unwrap().carrier;

    handle.interact(carrier, GameTime(0.0)).await.unwrap();
    assert!((handle.speed(carrier).await.unwrap() - 3.2).abs() < 1e-4);

    let deposited = handle.interact(carrier, GameTime(1.0)).await.unwrap();
    assert!(matches!(
        deposited,
        InteractOutcome::Deposited {
            moved: 7,
            left_in_hand: 0,
            ..
        }
    ));

    let equipped = handle.interact(carrier, GameTime(2.0)).await.unwrap();
    assert!(matches!(equipped, InteractOutcome::Equipped { .. }));

    let out = handle.transfer(carrier, GameTime(3.0), None).await.unwrap();
    assert_eq!(
        out,
        TransferOutcome::Moved {
            direction: TransferDirection::ContainerToHand,
            count: 5,
        }
    );
    let bounced = handle.transfer(carrier, GameTime(3.1), None).await.unwrap();
    assert_eq!(bounced, TransferOutcome::Debounced);

    let back = handle.transfer(carrier, GameTime(4.0), Some(2)).await.unwrap();
    assert_eq!(
        back,
        TransferOutcome::Moved {
            direction: TransferDirection::HandToContainer,
            count: 2,
        }
    );

    // Equipped baskets lift the penalty regardless of load.
    assert!((handle.speed(carrier).await.unwrap() - 5.0).abs() < 1e-4);

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.carrier(carrier).unwrap().hand_count(), 3);
    assert_eq!(state.equipped_container(carrier).unwrap().count(), 4);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn same_tick_triggers_resolve_in_join_order() {
    let runtime = start(level(pile(1, Position::new(0.0, 1.0)), Vec::new())).await;
    let handle = runtime.handle();
    let first = handle.join(ControlScheme::Wasd).await.unwrap().carrier;
    let second = handle.join(ControlScheme::Arrows).await.unwrap().carrier;

    let results = handle
        .interact_batch(&[second, first], GameTime(0.0))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, first);
    assert!(matches!(
        results[0].1,
        InteractOutcome::PickedUp { picked: 1, .. }
    ));
    assert_eq!(results[1], (second, InteractOutcome::Nothing));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_config_is_rejected_at_build() {
    let config = RuntimeConfig {
        game_config: GameConfig {
            penalty_per_extra: 1.5,
            ..GameConfig::default()
        },
        ..RuntimeConfig::default()
    };

    let result = Runtime::builder().config(config).build().await;
    assert!(matches!(result, Err(RuntimeError::InvalidConfig(_))));
}

#[tokio::test]
async fn join_and_actions_publish_events() {
    let runtime = start(level(pile(2, Position::new(0.0, 1.0)), Vec::new())).await;
    let handle = runtime.handle();
    let mut session = handle.subscribe(Topic::Session);
    let mut game = handle.subscribe(Topic::GameState);

    let carrier = handle.join(ControlScheme::Arrows).await.unwrap().carrier;

    match session.recv().await.unwrap() {
        Event::Session(SessionEvent::CarrierJoined { carrier: id, scheme, .. }) => {
            assert_eq!(id, carrier);
            assert_eq!(scheme, ControlScheme::Arrows);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match session.recv().await.unwrap() {
        Event::Session(SessionEvent::LabelChanged { label, .. }) => {
            assert_eq!(label, "Arrows Keyboard");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(matches!(
        game.recv().await.unwrap(),
        Event::GameState(GameStateEvent::CarrierChanged { .. })
    ));

    handle.interact(carrier, GameTime(0.0)).await.unwrap();

    let mut changed = Vec::new();
    let executed = loop {
        match game.recv().await.unwrap() {
            Event::GameState(GameStateEvent::ActionExecuted { result, .. }) => break result,
            Event::GameState(event) => changed.extend(event.entity()),
            other => panic!("unexpected event: {other:?}"),
        }
    };
    // carrier plus two items
    assert_eq!(changed.len(), 3);
    let json = serde_json::to_string(&executed).unwrap();
    assert!(json.contains("PickedUp"));

    let bounced = handle.interact(carrier, GameTime(0.1)).await.unwrap();
    assert_eq!(bounced, InteractOutcome::Debounced);
    assert!(matches!(
        game.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));

    handle.set_label(carrier, "Sock Wrangler").await.unwrap();
    let event = session.recv().await.unwrap();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(
        json["Session"]["LabelChanged"]["label"],
        serde_json::json!("Sock Wrangler")
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_carrier_reports_a_failure_event() {
    let runtime = start(level(Vec::new(), Vec::new())).await;
    let handle = runtime.handle();
    let mut game = handle.subscribe(Topic::GameState);

    let error = handle
        .interact(CarrierId(4), GameTime(0.0))
        .await
        .unwrap_err();
    assert!(matches!(error, RuntimeError::Execute(_)));

    assert!(matches!(
        game.recv().await.unwrap(),
        Event::GameState(GameStateEvent::ActionFailed { .. })
    ));

    let label = handle.set_label(CarrierId(4), "ghost").await.unwrap_err();
    assert!(matches!(label, RuntimeError::UnknownCarrier(CarrierId(4))));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn movement_is_slowed_by_heavy_hands() {
    let runtime = start(level(pile(8, Position::new(0.0, 1.0)), Vec::new())).await;
    let handle = runtime.handle();
    let carrier = handle.join(ControlScheme::Wasd).await.unwrap().carrier;

    let free = handle.move_carrier(carrier, 1.0, 0.0, 0.1).await.unwrap();
    assert!((free.speed - 5.0).abs() < 1e-4);
    handle.move_carrier(carrier, -1.0, 0.0, 0.1).await.unwrap();
    handle.move_carrier(carrier, 0.0, 1.0, 0.0).await.unwrap();

    handle.interact(carrier, GameTime(0.0)).await.unwrap();
    let loaded = handle.move_carrier(carrier, 0.0, 1.0, 1.0).await.unwrap();
    // 5 * 0.8^3
    assert!((loaded.speed - 2.56).abs() < 1e-4);

    drop(handle);
    runtime.shutdown().await.unwrap();
}
