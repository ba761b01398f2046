//! Value types shared by the generator and its consumers.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer cell coordinate. `y` grows upward: row 0 is the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const UP: Self = Self { x: 0, y: 1 };
    pub const DOWN: Self = Self { x: 0, y: -1 };
    pub const LEFT: Self = Self { x: -1, y: 0 };
    pub const RIGHT: Self = Self { x: 1, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in cell units.
    pub fn distance(self, other: Self) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for GridPos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: 1.0 };
    pub const DOWN: Self = Self { x: 0.0, y: -1.0 };
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

/// Axis-aligned world rectangle described by its centre and half-size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec2,
    pub extents: Vec2,
}

impl Bounds {
    pub fn from_size(center: Vec2, size: Vec2) -> Self {
        Self { center, extents: size * 0.5 }
    }

    pub fn size(&self) -> Vec2 {
        self.extents * 2.0
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.extents
    }

    /// Inclusive containment test; points on the boundary count as inside.
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Open,
    OpenPocket,
    Funnel,
    BlockedRock,
    BlockedWallBuffer,
}

impl TerrainType {
    pub const ALL: [Self; 5] =
        [Self::Open, Self::OpenPocket, Self::Funnel, Self::BlockedRock, Self::BlockedWallBuffer];

    /// Traversable terrain. This is what open-cell counts measure.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::OpenPocket | Self::Funnel)
    }

    /// Open ground that is not a funnel corridor. Smoothing treats everything
    /// else as an obstruction and spawn selection only draws from these cells.
    pub fn is_clear(self) -> bool {
        matches!(self, Self::Open | Self::OpenPocket)
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::OpenPocket => 1,
            Self::Funnel => 2,
            Self::BlockedRock => 3,
            Self::BlockedWallBuffer => 4,
        }
    }
}

/// Physical response of a boundary wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallType {
    Normal,
    Bouncy,
    Dampen,
    Breakable,
}

impl WallType {
    pub fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Bouncy => 1,
            Self::Dampen => 2,
            Self::Breakable => 3,
        }
    }
}

/// Boundary side, in launcher emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    pub fn inward_normal(self) -> Vec2 {
        match self {
            Self::Top => Vec2::DOWN,
            Self::Right => Vec2::LEFT,
            Self::Bottom => Vec2::UP,
            Self::Left => Vec2::RIGHT,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapPreset {
    Small,
    Medium,
    Large,
    BossRoom,
}

impl MapPreset {
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::BossRoom];

    /// Nominal world size in world units.
    pub fn nominal_size(self) -> Vec2 {
        match self {
            Self::Small => Vec2::new(12.0, 8.0),
            Self::Medium => Vec2::new(20.0, 12.0),
            Self::Large => Vec2::new(30.0, 18.0),
            Self::BossRoom => Vec2::new(50.0, 30.0),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Small => 0,
            Self::Medium => 1,
            Self::Large => 2,
            Self::BossRoom => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::BossRoom => "boss-room",
        }
    }
}

impl fmt::Display for MapPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown map preset '{0}' (expected small, medium, large or boss-room)")]
pub struct ParsePresetError(pub String);

impl FromStr for MapPreset {
    type Err = ParsePresetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            "boss-room" | "boss_room" | "bossroom" | "boss" => Ok(Self::BossRoom),
            _ => Err(ParsePresetError(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_sizes_match_nominal_world_dimensions() {
        assert_eq!(MapPreset::Small.nominal_size(), Vec2::new(12.0, 8.0));
        assert_eq!(MapPreset::Medium.nominal_size(), Vec2::new(20.0, 12.0));
        assert_eq!(MapPreset::Large.nominal_size(), Vec2::new(30.0, 18.0));
        assert_eq!(MapPreset::BossRoom.nominal_size(), Vec2::new(50.0, 30.0));
    }

    #[test]
    fn preset_names_parse_back() {
        for preset in MapPreset::ALL {
            assert_eq!(preset.to_string().parse::<MapPreset>(), Ok(preset));
        }
        assert_eq!("BossRoom".parse::<MapPreset>(), Ok(MapPreset::BossRoom));
        let err = "huge".parse::<MapPreset>().expect_err("unknown preset should fail");
        assert!(err.to_string().contains("huge"));
    }

    #[test]
    fn only_open_pocket_and_funnel_are_traversable() {
        let open: Vec<_> = TerrainType::ALL.into_iter().filter(|t| t.is_open()).collect();
        assert_eq!(open, [TerrainType::Open, TerrainType::OpenPocket, TerrainType::Funnel]);
        assert!(!TerrainType::Funnel.is_clear());
        assert!(TerrainType::OpenPocket.is_clear());
    }

    #[test]
    fn bounds_contain_their_corners_but_not_points_beyond() {
        let bounds = Bounds::from_size(Vec2::ZERO, Vec2::new(20.0, 12.0));
        assert!(bounds.contains(Vec2::new(10.0, 6.0)));
        assert!(bounds.contains(Vec2::new(-10.0, -6.0)));
        assert!(!bounds.contains(Vec2::new(10.01, 0.0)));
        assert!(!bounds.contains(Vec2::new(0.0, -7.5)));
    }

    #[test]
    fn edge_normals_point_inward() {
        assert_eq!(Edge::Top.inward_normal(), Vec2::DOWN);
        assert_eq!(Edge::Right.inward_normal(), Vec2::LEFT);
        assert_eq!(Edge::Bottom.inward_normal(), Vec2::UP);
        assert_eq!(Edge::Left.inward_normal(), Vec2::RIGHT);
    }
}
