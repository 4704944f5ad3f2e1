//! Data-driven content for the laundry co-op.
//!
//! Provides loaders for the files a session is built from:
//! - Carry rules (`GameConfig`, TOML)
//! - Level layouts: spawn points, loose laundry, baskets (RON)
//!
//! Content seeds the initial [`game_core::GameState`]; after that the engine
//! owns every change.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BasketSpec, ConfigLoader, ContentFactory, LevelLayout, LevelLoader, LoadResult};
