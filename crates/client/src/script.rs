//! Scripted headless session.
//!
//! Stands in for a real input layer: three players join, walk around the
//! laundromat, and exercise every interact branch plus the transfer button.

use anyhow::{Context, Result};
use tracing::info;

use game_core::{CarrierId, GameTime};
use runtime::{ControlScheme, RuntimeHandle};

/// Fixed frame length for scripted movement.
const FRAME: f32 = 0.05;

#[derive(Clone, Copy, Debug)]
enum Input {
    /// Hold a stick direction for `seconds`.
    Walk { x: f32, y: f32, seconds: f32 },
    Interact,
    Transfer(Option<u32>),
}

/// `(player index, input)` in the order they happen.
fn steps() -> Vec<(usize, Input)> {
    use Input::*;
    vec![
        // WASD: grab the pile ahead, carry it to the west basket, then wear it.
        (0, Interact),
        (0, Walk { x: -1.0, y: 0.0, seconds: 0.3 }),
        (0, Interact),
        (0, Interact),
        (0, Transfer(None)),
        (0, Walk { x: 1.0, y: 0.0, seconds: 0.4 }),
        (0, Transfer(Some(1))),
        // Arrows: pick up, drop, and take the same stack back.
        (1, Interact),
        (1, Interact),
        (1, Interact),
        // Gamepad: walk over to the centre pile and scoop up part of it.
        (2, Walk { x: 0.6, y: 0.8, seconds: 0.75 }),
        (2, Walk { x: 0.0, y: 1.0, seconds: 0.05 }),
        (2, Interact),
        (2, Walk { x: 0.0, y: -1.0, seconds: 0.5 }),
    ]
}

/// Joins the players and plays the script with a simulated clock.
pub async fn run(handle: &RuntimeHandle) -> Result<()> {
    let mut carriers: Vec<CarrierId> = Vec::new();
    for scheme in [
        ControlScheme::Wasd,
        ControlScheme::Arrows,
        ControlScheme::Gamepad(0),
    ] {
        let joined = handle
            .join(scheme)
            .await
            .with_context(|| format!("failed to join {scheme}"))?;
        info!(carrier = %joined.carrier, label = %joined.label, "player ready");
        carriers.push(joined.carrier);
    }

    // Triggers are spaced past the cooldown so none of them are debounced.
    let spacing = handle.config().interact_cooldown + 0.05;
    let mut clock = 0.0_f64;

    for (player, input) in steps() {
        let carrier = carriers[player];
        match input {
            Input::Walk { x, y, seconds } => {
                let frames = (seconds / FRAME).round() as usize;
                for _ in 0..frames {
                    handle.move_carrier(carrier, x, y, FRAME).await?;
                }
                clock += f64::from(seconds);
            }
            Input::Interact => {
                clock += spacing;
                let outcome = handle.interact(carrier, GameTime(clock)).await?;
                info!(%carrier, ?outcome, "interact");
            }
            Input::Transfer(amount) => {
                clock += spacing;
                let outcome = handle.transfer(carrier, GameTime(clock), amount).await?;
                info!(%carrier, ?outcome, "transfer");
            }
        }
    }

    for &carrier in &carriers {
        let speed = handle.speed(carrier).await?;
        info!(%carrier, speed, "final speed");
    }

    let state = handle.query_state().await?;
    state
        .validate_ownership()
        .context("ownership invariant broken after script")?;
    info!(
        on_ground = state.ground_items().count(),
        items = state.items().len(),
        "session finished"
    );
    Ok(())
}
