//! Building blocks of the carry state: identifiers, geometry, and the three
//! entity kinds (items, baskets, carriers).
mod carrier;
mod common;
mod container;
mod item;

pub use carrier::{Carrier, DroppedStack};
pub use common::{CarrierId, ContainerId, EntityRef, Facing, GameTime, ItemId, Pose, Position};
pub use container::Container;
pub use item::{Item, ItemState};
