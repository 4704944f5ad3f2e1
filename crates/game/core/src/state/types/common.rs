use std::fmt;

/// Stable arena key of a laundry item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

/// Stable arena key of a basket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerId(pub u32);

/// Stable arena key of a carrier (one per joined player).
///
/// Ids are handed out in join order, which doubles as the tie-break when two
/// carriers interact in the same tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarrierId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "basket#{}", self.0)
    }
}

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "carrier#{}", self.0)
    }
}

/// Any entity the presentation layer may need to refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityRef {
    Item(ItemId),
    Container(ContainerId),
    Carrier(CarrierId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Item(id) => id.fmt(f),
            EntityRef::Container(id) => id.fmt(f),
            EntityRef::Carrier(id) => id.fmt(f),
        }
    }
}

/// Point on the ground plane, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Unit direction a carrier is looking at.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facing {
    x: f32,
    y: f32,
}

impl Facing {
    pub const NORTH: Self = Self { x: 0.0, y: 1.0 };
    pub const EAST: Self = Self { x: 1.0, y: 0.0 };
    pub const SOUTH: Self = Self { x: 0.0, y: -1.0 };
    pub const WEST: Self = Self { x: -1.0, y: 0.0 };

    /// Normalizes an input vector; `None` for a zero-length input.
    pub fn from_vector(x: f32, y: f32) -> Option<Self> {
        let length = (x * x + y * y).sqrt();
        if length <= f32::EPSILON || !length.is_finite() {
            return None;
        }
        Some(Self {
            x: x / length,
            y: y / length,
        })
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

impl Default for Facing {
    fn default() -> Self {
        Self::NORTH
    }
}

/// Position plus facing of a carrier.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Position,
    pub facing: Facing,
}

impl Pose {
    pub fn new(position: Position, facing: Facing) -> Self {
        Self { position, facing }
    }

    pub fn at(position: Position) -> Self {
        Self::new(position, Facing::default())
    }

    /// Point `distance` units ahead along the facing.
    pub fn ahead(&self, distance: f32) -> Position {
        self.position
            .offset(self.facing.x * distance, self.facing.y * distance)
    }
}

/// Host clock reading, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameTime(pub f64);

impl GameTime {
    pub const ZERO: Self = Self(0.0);

    pub fn seconds(value: f64) -> Self {
        Self(value)
    }

    /// Seconds elapsed since `earlier` (negative if `earlier` is in the future).
    pub fn since(self, earlier: GameTime) -> f64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
