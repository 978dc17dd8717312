//! Regular street grid of building blocks with an optional fountain.

use tracing::debug;

use crate::types::{Archetype, CellKind, MapSize, Pos};

use super::super::grid::paint_disc;
use super::super::model::Grid;
use super::super::seed::MapRng;

const BLOCK_STRIDE: usize = 6;
const BUILDING_SPAN: usize = BLOCK_STRIDE - 2;
const FOUNTAIN_RADIUS: i32 = 2;
const FOUNTAIN_CHANCE: f64 = 0.4;

/// Building footprint as `(x, y, width, height)` in cells.
type BuildingLot = (usize, usize, usize, usize);

pub(super) fn generate_city(size: MapSize, rng: &mut MapRng) -> Grid {
    let mut grid = Grid::filled(Archetype::City, size);

    for (x, y, lot_width, lot_height) in building_lots(grid.width(), grid.height()) {
        for row in y..y + lot_height {
            for column in x..x + lot_width {
                grid.set(Pos { y: row as i32, x: column as i32 }, CellKind::Building);
            }
        }
    }

    if rng.chance(FOUNTAIN_CHANCE) {
        let center = fountain_center(grid.width(), grid.height());
        debug!(?center, "placed city fountain");
        paint_disc(&mut grid, center, FOUNTAIN_RADIUS, CellKind::Water);
    }

    grid
}

/// Lots start one cell in from the edge on a fixed stride and are clipped so
/// the outer ring of the map stays street.
fn building_lots(width: usize, height: usize) -> Vec<BuildingLot> {
    let mut lots = Vec::new();
    for y in (1..height.saturating_sub(1)).step_by(BLOCK_STRIDE) {
        for x in (1..width.saturating_sub(1)).step_by(BLOCK_STRIDE) {
            let lot_width = BUILDING_SPAN.min(width - x - 1);
            let lot_height = BUILDING_SPAN.min(height - y - 1);
            lots.push((x, y, lot_width, lot_height));
        }
    }
    lots
}

fn fountain_center(width: usize, height: usize) -> Pos {
    Pos { y: (height / 2) as i32, x: (width / 2) as i32 }
}
