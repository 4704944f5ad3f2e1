//! Oracles the simulation worker hands to the engine.
//!
//! Bundles the session configuration with the spatial query and the RNG so
//! the worker can build a [`game_core::GameEnv`] per command.

use std::sync::Arc;

use game_core::{Env, GameConfig, GameEnv, PcgRng, RadiusQuery, RngOracle, SpatialOracle};

/// Owns everything the engine reads but never writes.
#[derive(Clone)]
pub struct OracleBundle {
    pub(crate) config: Arc<GameConfig>,
    pub(crate) spatial: Arc<dyn SpatialOracle>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleBundle {
    /// Radius queries over arena positions with the PCG generator.
    pub fn new(config: GameConfig) -> Self {
        Self::with_oracles(config, Arc::new(RadiusQuery), Arc::new(PcgRng))
    }

    pub fn with_oracles(
        config: GameConfig,
        spatial: Arc<dyn SpatialOracle>,
        rng: Arc<dyn RngOracle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            spatial,
            rng,
        }
    }

    /// Converts the bundle into a GameEnv for game-core.
    pub fn as_game_env(&self) -> GameEnv<'_> {
        let spatial: &dyn SpatialOracle = self.spatial.as_ref();
        let rng: &dyn RngOracle = self.rng.as_ref();
        Env::with_all(self.config.as_ref(), spatial, rng)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rng(&self) -> &dyn RngOracle {
        self.rng.as_ref()
    }
}

impl std::fmt::Debug for OracleBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleBundle")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
