//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Presentation layers listen on [`Topic::GameState`]
//! for per-entity refreshes and on [`Topic::Session`] for joins and labels.

mod bus;
mod extractor;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use extractor::extract_events;
pub use types::{GameStateEvent, SessionEvent};
