//! File-backed content: carry rules from TOML, level layouts from RON.

pub mod config;
pub mod factory;
pub mod level;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use level::{BasketSpec, LevelLayout, LevelLoader};

use std::path::Path;

use anyhow::Context;

/// Loader failures carry the offending path in their context chain.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
