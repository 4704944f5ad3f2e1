//! Level layout loader.
//!
//! A level lists where players appear and what lies around at session
//! start. Baskets may override the configured capacity.

use std::path::Path;

use game_core::{GameConfig, GameState, Position};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A basket placed in the level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasketSpec {
    pub position: Position,
    /// Falls back to `GameConfig::container_capacity`.
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Initial layout of a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    /// Seed for cosmetic randomness.
    #[serde(default)]
    pub seed: u64,
    /// Indexed by join slot; see [`LevelLayout::spawn_point`].
    #[serde(default)]
    pub spawn_points: Vec<Position>,
    #[serde(default)]
    pub items: Vec<Position>,
    #[serde(default)]
    pub baskets: Vec<BasketSpec>,
}

impl LevelLayout {
    /// An empty level with every player spawning at the origin.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed: 0,
            spawn_points: Vec::new(),
            items: Vec::new(),
            baskets: Vec::new(),
        }
    }

    /// Spawn point for join slot `index`, or the origin if the level does
    /// not define one.
    pub fn spawn_point(&self, index: usize) -> Position {
        self.spawn_points
            .get(index)
            .copied()
            .unwrap_or(Position::ORIGIN)
    }

    /// Builds the initial state: every item on the ground, every basket
    /// free-standing and empty, no carriers.
    pub fn build_state(&self, config: &GameConfig) -> GameState {
        let mut state = GameState::with_seed(self.seed);
        for &position in &self.items {
            state.spawn_item(position);
        }
        for basket in &self.baskets {
            let capacity = basket.capacity.unwrap_or(config.container_capacity);
            state.spawn_container(basket.position, capacity);
        }
        state
    }
}

/// Loader for level layouts from RON files.
pub struct LevelLoader;

impl LevelLoader {
    pub fn load(path: &Path) -> LoadResult<LevelLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid level {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<LevelLayout> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use game_core::{ContainerId, ItemState};

    use super::*;

    const LEVEL: &str = r#"
        (
            name: "test",
            seed: 42,
            spawn_points: [(x: -2.0, y: 0.0), (x: 2.0, y: 0.0)],
            items: [(x: 0.0, y: 1.0), (x: 0.5, y: 1.0)],
            baskets: [
                (position: (x: 3.0, y: 3.0)),
                (position: (x: -3.0, y: 3.0), capacity: Some(4)),
            ],
        )
    "#;

    #[test]
    fn builds_initial_state() {
        let level = LevelLoader::parse(LEVEL).unwrap();
        let state = level.build_state(&GameConfig::default());

        assert_eq!(state.game_seed, 42);
        assert_eq!(state.items().len(), 2);
        assert!(state.items().iter().all(|i| i.state() == ItemState::OnGround));
        assert_eq!(state.container(ContainerId(0)).unwrap().capacity(), 20);
        assert_eq!(state.container(ContainerId(1)).unwrap().capacity(), 4);
        assert!(state.carriers().is_empty());
        assert_eq!(state.validate_ownership(), Ok(()));
    }

    #[test]
    fn missing_spawn_point_falls_back_to_origin() {
        let level = LevelLoader::parse(LEVEL).unwrap();
        assert_eq!(level.spawn_point(1), Position::new(2.0, 0.0));
        assert_eq!(level.spawn_point(5), Position::ORIGIN);
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let level = LevelLoader::parse(r#"(name: "bare")"#).unwrap();
        assert_eq!(level, LevelLayout::empty("bare"));
    }

    #[test]
    fn reports_parse_errors() {
        let error = LevelLoader::parse("(name: 3)").unwrap_err();
        assert!(error.to_string().contains("level RON"));
    }
}
