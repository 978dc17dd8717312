//! Public data model for generated maps.

use serde::Serialize;

use crate::types::{Archetype, Cell, CellKind, MapSize, Pos};

/// A finished map: a row-major grid of terrain tags.
///
/// Grids are immutable once generation returns; regenerating produces a new
/// value rather than editing an existing one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    archetype: Archetype,
    size: MapSize,
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    pub(super) fn filled(archetype: Archetype, size: MapSize) -> Self {
        let (width, height) = size.dimensions();
        Self { archetype, size, width, height, cells: vec![archetype.base_kind(); width * height] }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn size(&self) -> MapSize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn kind_at(&self, pos: Pos) -> Option<CellKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[(pos.y as usize) * self.width + (pos.x as usize)])
    }

    /// Row `y` as a slice, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[CellKind]> {
        if y >= self.height {
            return None;
        }
        Some(&self.cells[y * self.width..(y + 1) * self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.width)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().map(|(index, &kind)| Cell {
            pos: Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 },
            kind,
        })
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }

    /// Stable byte encoding used for fingerprinting generated output.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.cells.len() + 10);
        bytes.push(match self.archetype {
            Archetype::Dungeon => 0,
            Archetype::Wilderness => 1,
            Archetype::City => 2,
        });
        bytes.push(match self.size {
            MapSize::Small => 0,
            MapSize::Medium => 1,
            MapSize::Large => 2,
        });
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for cell in &self.cells {
            bytes.push(match cell {
                CellKind::Wall => 0,
                CellKind::Floor => 1,
                CellKind::Door => 2,
                CellKind::Empty => 3,
                CellKind::Water => 4,
                CellKind::Tree => 5,
                CellKind::Road => 6,
                CellKind::Building => 7,
            });
        }
        bytes
    }

    /// Writes `kind` at `pos`; positions outside the grid are skipped.
    pub(super) fn set(&mut self, pos: Pos, kind: CellKind) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        self.cells[(pos.y as usize) * self.width + (pos.x as usize)] = kind;
        true
    }
}
