//! Event types for different topics.

use game_core::engine::TransitionPhase;
use game_core::{
    Action, ActionResult, CarrierFields, CarrierId, ContainerFields, EntityRef, ItemFields,
    Position, StateDelta,
};
use serde::{Deserialize, Serialize};

use crate::session::{ControlScheme, Tint};

/// Events related to game state changes (actions, failures)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// An action was executed with resulting state changes
    ActionExecuted {
        action: Action,
        delta: Box<StateDelta>,
        result: ActionResult,
    },

    /// One entity changed; the presentation layer should refresh it.
    ItemChanged { entity: EntityRef, fields: ItemFields },
    ContainerChanged {
        entity: EntityRef,
        fields: ContainerFields,
    },
    CarrierChanged {
        entity: EntityRef,
        fields: CarrierFields,
    },

    /// An action failed during execution pipeline
    ActionFailed {
        action: Action,
        phase: TransitionPhase,
        error: String,
    },
}

impl GameStateEvent {
    /// The entity a per-entity change event refers to.
    pub fn entity(&self) -> Option<EntityRef> {
        match self {
            GameStateEvent::ItemChanged { entity, .. }
            | GameStateEvent::ContainerChanged { entity, .. }
            | GameStateEvent::CarrierChanged { entity, .. } => Some(*entity),
            _ => None,
        }
    }
}

/// Events related to the player roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    CarrierJoined {
        carrier: CarrierId,
        scheme: ControlScheme,
        spawn: Position,
        tint: Tint,
    },

    /// Display label above a carrier changed.
    LabelChanged { carrier: CarrierId, label: String },
}
