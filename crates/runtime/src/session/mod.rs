//! Player join flow.
//!
//! Each input device joins once and becomes a carrier. The roster decides
//! whether a join is allowed, which spawn slot it gets, and what label the
//! presentation layer shows above the carrier.

mod join;

pub use join::{ControlScheme, JoinRoster, JoinSlot, JoinedCarrier, SessionError, Tint};
