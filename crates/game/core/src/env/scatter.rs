//! Cosmetic placement of dropped items.

use crate::env::RngOracle;
use crate::state::Position;

/// Where a dropped item lands and how it is rotated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Position,
    /// Yaw in degrees, `[0, 360)`.
    pub rotation: f32,
}

/// Picks a placement uniformly inside the disc of `radius` around `origin`.
///
/// Pure: the result depends only on the arguments. `seed` should come from
/// [`compute_seed`](crate::env::compute_seed) with a distinct context per item.
pub fn scatter<R>(rng: &R, seed: u64, origin: Position, radius: f32) -> Placement
where
    R: RngOracle + ?Sized,
{
    let angle = rng.unit(seed) * core::f32::consts::TAU;
    // sqrt keeps the density uniform over the disc area
    let distance = radius.max(0.0) * rng.unit(seed.rotate_left(17) ^ 0x5bd1e995).sqrt();
    let rotation = rng.unit(seed ^ 0x2545f4914f6cdd1d) * 360.0;

    Placement {
        position: origin.offset(angle.cos() * distance, angle.sin() * distance),
        rotation,
    }
}
