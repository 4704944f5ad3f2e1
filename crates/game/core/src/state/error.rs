//! State management errors.
//!
//! Errors related to arena capacity, unknown ids, and ownership invariants.

use core::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CarrierId, ContainerId, ItemId, ItemState};

/// Collection currently referencing an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Holder {
    Hand(CarrierId),
    Container(ContainerId),
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holder::Hand(carrier) => write!(f, "hands of {carrier}"),
            Holder::Container(container) => write!(f, "{container}"),
        }
    }
}

/// Errors that occur during game state operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Carrier list is full (max capacity reached).
    #[error("carrier list is full (max: {max})")]
    CarrierListFull { max: usize },

    #[error("unknown {0}")]
    UnknownItem(ItemId),

    #[error("unknown {0}")]
    UnknownContainer(ContainerId),

    #[error("unknown {0}")]
    UnknownCarrier(CarrierId),

    /// The same item is listed by two collections.
    #[error("{item} is held by both {first} and {second}")]
    DoubleOwnership {
        item: ItemId,
        first: Holder,
        second: Holder,
    },

    /// An item's tag disagrees with the collection holding it.
    #[error("{item} is tagged {tagged} but should be {expected}")]
    StateMismatch {
        item: ItemId,
        tagged: ItemState,
        expected: ItemState,
    },

    #[error("{container} holds {count} items but has capacity {capacity}")]
    ContainerOverfull {
        container: ContainerId,
        count: usize,
        capacity: u32,
    },

    /// Carrier and basket disagree about who has equipped whom.
    #[error("{carrier} and {container} disagree about their attachment")]
    EquipMismatch {
        carrier: CarrierId,
        container: ContainerId,
    },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            CarrierListFull { .. } | UnknownItem(_) | UnknownContainer(_) | UnknownCarrier(_) => {
                ErrorSeverity::Validation
            }

            // Ownership violations mean a reducer bug
            DoubleOwnership { .. }
            | StateMismatch { .. }
            | ContainerOverfull { .. }
            | EquipMismatch { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            CarrierListFull { .. } => "STATE_CARRIER_LIST_FULL",
            UnknownItem(_) => "STATE_UNKNOWN_ITEM",
            UnknownContainer(_) => "STATE_UNKNOWN_CONTAINER",
            UnknownCarrier(_) => "STATE_UNKNOWN_CARRIER",
            DoubleOwnership { .. } => "STATE_DOUBLE_OWNERSHIP",
            StateMismatch { .. } => "STATE_TAG_MISMATCH",
            ContainerOverfull { .. } => "STATE_CONTAINER_OVERFULL",
            EquipMismatch { .. } => "STATE_EQUIP_MISMATCH",
        }
    }
}
