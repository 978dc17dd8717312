use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
            Pos { y: self.y, x: self.x + 1 },
        ]
    }
}

/// Terrain or structure tag carried by every grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Wall,
    Floor,
    Door,
    Empty,
    Water,
    Tree,
    Road,
    Building,
}

impl CellKind {
    pub const ALL: [CellKind; 8] = [
        CellKind::Wall,
        CellKind::Floor,
        CellKind::Door,
        CellKind::Empty,
        CellKind::Water,
        CellKind::Tree,
        CellKind::Road,
        CellKind::Building,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CellKind::Wall => "wall",
            CellKind::Floor => "floor",
            CellKind::Door => "door",
            CellKind::Empty => "empty",
            CellKind::Water => "water",
            CellKind::Tree => "tree",
            CellKind::Road => "road",
            CellKind::Building => "building",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Pos,
    pub kind: CellKind,
}

/// Map generation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    #[default]
    Dungeon,
    Wilderness,
    City,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Dungeon, Archetype::Wilderness, Archetype::City];

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Dungeon => "dungeon",
            Archetype::Wilderness => "wilderness",
            Archetype::City => "city",
        }
    }

    /// Tag every cell starts with before any feature is placed.
    pub fn base_kind(self) -> CellKind {
        match self {
            Archetype::Dungeon => CellKind::Wall,
            Archetype::Wilderness => CellKind::Empty,
            Archetype::City => CellKind::Road,
        }
    }

    pub fn kinds(self) -> &'static [CellKind] {
        match self {
            Archetype::Dungeon => &[CellKind::Wall, CellKind::Floor, CellKind::Door],
            Archetype::Wilderness => {
                &[CellKind::Empty, CellKind::Water, CellKind::Tree, CellKind::Road]
            }
            Archetype::City => &[CellKind::Road, CellKind::Building, CellKind::Water],
        }
    }

    pub fn allows(self, kind: CellKind) -> bool {
        self.kinds().contains(&kind)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .into_iter()
            .find(|archetype| archetype.name().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| ParseError::UnknownArchetype(raw.to_string()))
    }
}

/// Size class preset selecting the grid dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl MapSize {
    pub const ALL: [MapSize; 3] = [MapSize::Small, MapSize::Medium, MapSize::Large];

    pub fn name(self) -> &'static str {
        match self {
            MapSize::Small => "small",
            MapSize::Medium => "medium",
            MapSize::Large => "large",
        }
    }

    /// `(width, height)` in cells.
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            MapSize::Small => (20, 15),
            MapSize::Medium => (30, 22),
            MapSize::Large => (40, 30),
        }
    }
}

impl fmt::Display for MapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapSize {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        MapSize::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| ParseError::UnknownSize(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown map archetype '{0}' (expected dungeon, wilderness or city)")]
    UnknownArchetype(String),
    #[error("unknown map size '{0}' (expected small, medium or large)")]
    UnknownSize(String),
}
