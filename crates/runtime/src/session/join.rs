use std::fmt;

use game_core::{CarrierId, GameConfig, Position, RngOracle, compute_seed};
use serde::{Deserialize, Serialize};

/// Input device a player joins with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Left half of the keyboard (joins with Space).
    Wasd,
    /// Right half of the keyboard (joins with right Ctrl).
    Arrows,
    /// A gamepad, identified by its device id.
    Gamepad(u32),
}

impl fmt::Display for ControlScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlScheme::Wasd => f.write_str("WASD"),
            ControlScheme::Arrows => f.write_str("Arrows"),
            ControlScheme::Gamepad(device) => write!(f, "Gamepad (device {device})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{0} has already joined")]
    AlreadyJoined(ControlScheme),

    #[error("gamepad limit reached (max: {max})")]
    GamepadLimit { max: usize },

    #[error("session is full (max: {max} carriers)")]
    SessionFull { max: usize },
}

/// Cosmetic carrier color, components in `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    /// Random color for `carrier`, stable for a given session seed.
    pub fn roll<R: RngOracle + ?Sized>(rng: &R, game_seed: u64, carrier: CarrierId) -> Self {
        let channel = |context| rng.unit(compute_seed(game_seed, 0, carrier.0, context));
        Self {
            r: channel(0),
            g: channel(1),
            b: channel(2),
        }
    }
}

/// Where and how a newly joined player appears.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinSlot {
    /// Index into the level's spawn points.
    pub spawn_index: usize,
    pub label: String,
}

/// A player that has joined and now controls a carrier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JoinedCarrier {
    pub carrier: CarrierId,
    pub scheme: ControlScheme,
    pub label: String,
    pub spawn: Position,
    pub tint: Tint,
}

/// Tracks which devices have joined.
#[derive(Clone, Debug)]
pub struct JoinRoster {
    max_gamepads: usize,
    wasd_joined: bool,
    arrows_joined: bool,
    gamepads: Vec<u32>,
}

impl JoinRoster {
    pub const DEFAULT_MAX_GAMEPADS: usize = 4;

    pub fn new(max_gamepads: usize) -> Self {
        Self {
            max_gamepads,
            wasd_joined: false,
            arrows_joined: false,
            gamepads: Vec::new(),
        }
    }

    pub fn joined(&self) -> usize {
        usize::from(self.wasd_joined) + usize::from(self.arrows_joined) + self.gamepads.len()
    }

    /// Checks whether `scheme` may join without recording anything.
    pub fn reserve(&self, scheme: ControlScheme) -> Result<JoinSlot, SessionError> {
        if self.joined() >= GameConfig::MAX_CARRIERS {
            return Err(SessionError::SessionFull {
                max: GameConfig::MAX_CARRIERS,
            });
        }

        match scheme {
            ControlScheme::Wasd if self.wasd_joined => Err(SessionError::AlreadyJoined(scheme)),
            ControlScheme::Arrows if self.arrows_joined => Err(SessionError::AlreadyJoined(scheme)),
            ControlScheme::Wasd => Ok(JoinSlot {
                spawn_index: 0,
                label: "WASD Keyboard".to_owned(),
            }),
            ControlScheme::Arrows => Ok(JoinSlot {
                spawn_index: 1,
                label: "Arrows Keyboard".to_owned(),
            }),
            ControlScheme::Gamepad(device) => {
                if self.gamepads.contains(&device) {
                    return Err(SessionError::AlreadyJoined(scheme));
                }
                if self.gamepads.len() >= self.max_gamepads {
                    return Err(SessionError::GamepadLimit {
                        max: self.max_gamepads,
                    });
                }
                let ordinal = self.gamepads.len();
                Ok(JoinSlot {
                    // keyboards own slots 0 and 1
                    spawn_index: 2 + ordinal,
                    label: format!("Gamepad {}", ordinal + 1),
                })
            }
        }
    }

    /// Records a successful join. Call only after [`reserve`](Self::reserve)
    /// succeeded for the same scheme.
    pub fn commit(&mut self, scheme: ControlScheme) {
        match scheme {
            ControlScheme::Wasd => self.wasd_joined = true,
            ControlScheme::Arrows => self.arrows_joined = true,
            ControlScheme::Gamepad(device) => self.gamepads.push(device),
        }
    }
}

impl Default for JoinRoster {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_GAMEPADS)
    }
}
