//! Read-only collaborators of the engine.
//!
//! Oracles expose what the carry core cannot know by itself: which objects
//! are near a carrier (the host's physics scene) and a random source for
//! cosmetic jitter. The [`Env`] aggregate bundles them with the session
//! configuration so actions can reach everything through one handle.
mod error;
mod rng;
mod scatter;
mod spatial;

pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use scatter::{Placement, scatter};
pub use spatial::{Candidate, RadiusQuery, SpatialOracle};

use crate::config::GameConfig;

/// Aggregates the configuration and read-only oracles used by actions.
pub struct Env<'a, S, R>
where
    S: SpatialOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    config: &'a GameConfig,
    spatial: Option<&'a S>,
    rng: Option<&'a R>,
}

impl<S, R> Clone for Env<'_, S, R>
where
    S: SpatialOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, R> Copy for Env<'_, S, R>
where
    S: SpatialOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn SpatialOracle + 'a, dyn RngOracle + 'a>;

impl<'a, S, R> Env<'a, S, R>
where
    S: SpatialOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(config: &'a GameConfig, spatial: Option<&'a S>, rng: Option<&'a R>) -> Self {
        Self {
            config,
            spatial,
            rng,
        }
    }

    pub fn with_all(config: &'a GameConfig, spatial: &'a S, rng: &'a R) -> Self {
        Self::new(config, Some(spatial), Some(rng))
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Returns the SpatialOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SpatialNotAvailable` if no spatial oracle was provided.
    pub fn spatial(&self) -> Result<&'a S, OracleError> {
        self.spatial.ok_or(OracleError::SpatialNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, S, R> Env<'a, S, R>
where
    S: SpatialOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let spatial: Option<&'a dyn SpatialOracle> = self.spatial.map(|spatial| spatial as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(self.config, spatial, rng)
    }
}
