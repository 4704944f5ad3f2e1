//! Broadcast channels, one per [`Topic`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::types::{GameStateEvent, SessionEvent};

/// Event streams a subscriber can pick from.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Executed actions, failures, and per-entity state changes
    GameState,
    /// Joins and display labels
    Session,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::GameState, Topic::Session];
}

/// Any event, tagged by the stream it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    GameState(GameStateEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::GameState(_) => Topic::GameState,
            Event::Session(_) => Topic::Session,
        }
    }
}

impl From<GameStateEvent> for Event {
    fn from(event: GameStateEvent) -> Self {
        Event::GameState(event)
    }
}

impl From<SessionEvent> for Event {
    fn from(event: SessionEvent) -> Self {
        Event::Session(event)
    }
}

/// Fan-out of runtime events to any number of subscribers.
///
/// Cloning shares the underlying channels. Publishing is best-effort: an
/// event nobody listens to is dropped.
#[derive(Clone)]
pub struct EventBus {
    game_state: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// `capacity` events are buffered per topic before slow receivers lag.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            game_state: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::GameState => &self.game_state,
            Topic::Session => &self.session,
        }
    }

    /// Sends to every current subscriber of the event's topic.
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Receiver for one topic, starting with the next published event.
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use game_core::CarrierId;

    use super::*;

    #[tokio::test]
    async fn routes_by_topic() {
        let bus = EventBus::with_capacity(4);
        let mut session = bus.subscribe(Topic::Session);
        let mut game_state = bus.subscribe(Topic::GameState);

        bus.publish(SessionEvent::LabelChanged {
            carrier: CarrierId(0),
            label: "WASD Keyboard".into(),
        });

        assert!(matches!(
            session.recv().await.unwrap(),
            Event::Session(SessionEvent::LabelChanged { .. })
        ));
        assert!(game_state.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::new().publish(SessionEvent::LabelChanged {
            carrier: CarrierId(0),
            label: String::new(),
        });
    }
}
