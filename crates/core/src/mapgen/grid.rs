//! Grid-space painting primitives shared by the archetype generators.

use crate::types::{CellKind, Pos};

use super::model::Grid;

pub(super) fn within_radius(center: Pos, pos: Pos, radius: i32) -> bool {
    let dx = i64::from(pos.x - center.x);
    let dy = i64::from(pos.y - center.y);
    dx * dx + dy * dy <= i64::from(radius) * i64::from(radius)
}

/// Paints every in-bounds cell within Euclidean `radius` of `center`.
pub(super) fn paint_disc(grid: &mut Grid, center: Pos, radius: i32, kind: CellKind) {
    let top = (center.y - radius).max(0);
    let bottom = (center.y + radius).min(grid.height() as i32 - 1);
    let left = (center.x - radius).max(0);
    let right = (center.x + radius).min(grid.width() as i32 - 1);
    for y in top..=bottom {
        for x in left..=right {
            let pos = Pos { y, x };
            if within_radius(center, pos, radius) {
                grid.set(pos, kind);
            }
        }
    }
}

/// Paints a horizontal run of row `y` between two columns, inclusive.
pub(super) fn paint_horizontal(grid: &mut Grid, y: i32, from_x: i32, to_x: i32, kind: CellKind) {
    for x in from_x.min(to_x)..=from_x.max(to_x) {
        grid.set(Pos { y, x }, kind);
    }
}

/// Paints a vertical run of column `x` between two rows, inclusive.
pub(super) fn paint_vertical(grid: &mut Grid, x: i32, from_y: i32, to_y: i32, kind: CellKind) {
    for y in from_y.min(to_y)..=from_y.max(to_y) {
        grid.set(Pos { y, x }, kind);
    }
}
