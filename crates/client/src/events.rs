//! Background task that reports runtime events.
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use runtime::{Event, GameStateEvent, RuntimeHandle, SessionEvent, Topic};

/// Follows both topics until the runtime shuts down.
pub fn spawn_reporter(handle: &RuntimeHandle, json: bool) -> JoinHandle<()> {
    let mut receivers = handle.subscribe_multiple(&Topic::ALL);
    let mut game = receivers.remove(&Topic::GameState);
    let mut session = receivers.remove(&Topic::Session);

    tokio::spawn(async move {
        loop {
            let next = tokio::select! {
                Some(event) = next_event(&mut game) => event,
                Some(event) = next_event(&mut session) => event,
                else => break,
            };
            report(&next, json);
        }
        debug!("event reporter finished");
    })
}

async fn next_event(
    receiver: &mut Option<tokio::sync::broadcast::Receiver<Event>>,
) -> Option<Event> {
    loop {
        let rx = receiver.as_mut()?;
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "event reporter lagged behind");
            }
            Err(RecvError::Closed) => {
                *receiver = None;
                return None;
            }
        }
    }
}

fn report(event: &Event, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(error) => warn!(%error, "failed to encode event"),
        }
        return;
    }

    match event {
        Event::Session(SessionEvent::CarrierJoined {
            carrier, scheme, ..
        }) => info!(%carrier, %scheme, "joined"),
        Event::Session(SessionEvent::LabelChanged { carrier, label }) => {
            info!(%carrier, %label, "label")
        }
        Event::GameState(GameStateEvent::ActionExecuted { action, result, .. }) => {
            info!(action = action.as_str(), carrier = %action.actor(), ?result, "executed")
        }
        Event::GameState(GameStateEvent::ActionFailed {
            action,
            phase,
            error,
        }) => warn!(action = action.as_str(), ?phase, %error, "failed"),
        Event::GameState(change) => {
            if let Some(entity) = change.entity() {
                debug!(%entity, "changed");
            }
        }
    }
}
