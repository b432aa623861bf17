//! Per-frame animation input.

use serde::{Deserialize, Serialize};

/// Animation names, in the order collaborators list them.
pub const ANIMATIONS: [&str; 8] = [
    "idle", "walk", "inspect", "point", "wave", "vent", "ghost", "dead",
];

/// Direction names paired with their numeric codes.
pub const DIRECTIONS: [(&str, u8); 4] = [("down", 0), ("left", 1), ("up", 2), ("right", 3)];

/// Animation being played.
///
/// Only `Walk` drives body bob and foot steps; the others draw the static pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Animation {
    #[default]
    Idle,
    Walk,
    Inspect,
    Point,
    Wave,
    Vent,
    Ghost,
    Dead,
}

impl Animation {
    /// All animations in declaration order.
    pub const ALL: [Animation; 8] = [
        Animation::Idle,
        Animation::Walk,
        Animation::Inspect,
        Animation::Point,
        Animation::Wave,
        Animation::Vent,
        Animation::Ghost,
        Animation::Dead,
    ];

    /// Returns the serialized name.
    pub fn as_str(&self) -> &'static str {
        ANIMATIONS[*self as usize]
    }

    /// Looks up an animation by name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == name)
    }
}

/// Facing direction.
///
/// Deserializes from a name or a numeric code. Anything unrecognized reads
/// as `Right`, which draws unmirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "DirectionRepr")]
pub enum Direction {
    Down,
    /// Drawn as a horizontal mirror of the base pose.
    Left,
    Up,
    #[default]
    Right,
}

impl Direction {
    /// All directions ordered by code; this is also the spritesheet row order.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Up,
        Direction::Right,
    ];

    /// Numeric direction code (down=0, left=1, up=2, right=3).
    pub fn code(&self) -> u8 {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Right => 3,
        }
    }

    /// Maps a numeric code back to a direction.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Returns the serialized name.
    pub fn as_str(&self) -> &'static str {
        DIRECTIONS[self.code() as usize].0
    }

    /// Looks up a direction by name.
    pub fn by_name(name: &str) -> Option<Self> {
        DIRECTIONS
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, code)| Self::from_code(*code))
    }

    /// Whether drawing in this direction mirrors horizontally.
    pub fn is_mirrored(&self) -> bool {
        matches!(self, Direction::Left)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DirectionRepr {
    Code(u64),
    Name(String),
    Other(serde::de::IgnoredAny),
}

impl From<DirectionRepr> for Direction {
    fn from(repr: DirectionRepr) -> Self {
        let known = match repr {
            DirectionRepr::Code(code) => u8::try_from(code).ok().and_then(Direction::from_code),
            DirectionRepr::Name(name) => Direction::by_name(&name),
            DirectionRepr::Other(_) => None,
        };
        known.unwrap_or_default()
    }
}

/// Transient animation state for a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoseState {
    pub animation: Animation,
    /// Frame index within the animation cycle. Phase is periodic, so any
    /// value is valid.
    pub frame: u32,
    pub direction: Direction,
}

impl PoseState {
    /// Creates a pose.
    pub fn new(animation: Animation, frame: u32, direction: Direction) -> Self {
        Self {
            animation,
            frame,
            direction,
        }
    }

    /// A walk-cycle pose, as baked into spritesheets.
    pub fn walk(frame: u32, direction: Direction) -> Self {
        Self::new(Animation::Walk, frame, direction)
    }
}
