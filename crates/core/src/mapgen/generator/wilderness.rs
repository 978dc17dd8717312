//! Open terrain with lakes, scattered trees and straight roads.

use tracing::debug;

use crate::types::{Archetype, CellKind, MapSize, Pos};

use super::super::grid::paint_disc;
use super::super::model::Grid;
use super::super::seed::MapRng;

const MIN_LAKES: usize = 1;
const MAX_LAKES: usize = 3;
const MIN_LAKE_RADIUS: usize = 2;
const MAX_LAKE_RADIUS: usize = 5;
const TREE_CHANCE: f64 = 0.3;
const MIN_ROADS: usize = 1;
const MAX_ROADS: usize = 3;

/// A disc of water stamped onto the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Lake {
    center: Pos,
    radius: i32,
}

pub(super) fn generate_wilderness(size: MapSize, rng: &mut MapRng) -> Grid {
    let mut grid = Grid::filled(Archetype::Wilderness, size);
    for lake in place_lakes(&mut grid, rng) {
        debug!(x = lake.center.x, y = lake.center.y, radius = lake.radius, "placed wilderness lake");
    }
    scatter_trees(&mut grid, rng);
    place_roads(&mut grid, rng);
    grid
}

fn place_lakes(grid: &mut Grid, rng: &mut MapRng) -> Vec<Lake> {
    let lake_count = rng.range(MIN_LAKES, MAX_LAKES);
    let mut lakes = Vec::with_capacity(lake_count);
    for _ in 0..lake_count {
        let center =
            Pos { x: rng.below(grid.width()) as i32, y: rng.below(grid.height()) as i32 };
        let radius = rng.range(MIN_LAKE_RADIUS, MAX_LAKE_RADIUS) as i32;
        paint_disc(grid, center, radius, CellKind::Water);
        lakes.push(Lake { center, radius });
    }
    lakes
}

fn scatter_trees(grid: &mut Grid, rng: &mut MapRng) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let pos = Pos { y, x };
            if grid.kind_at(pos) == Some(CellKind::Empty) && rng.chance(TREE_CHANCE) {
                grid.set(pos, CellKind::Tree);
            }
        }
    }
}

/// Full-length roads; water is never paved over.
fn place_roads(grid: &mut Grid, rng: &mut MapRng) {
    let road_count = rng.range(MIN_ROADS, MAX_ROADS);
    for _ in 0..road_count {
        let horizontal = rng.chance(0.5);
        let line: Vec<Pos> = if horizontal {
            let y = rng.below(grid.height()) as i32;
            (0..grid.width() as i32).map(|x| Pos { y, x }).collect()
        } else {
            let x = rng.below(grid.width()) as i32;
            (0..grid.height() as i32).map(|y| Pos { y, x }).collect()
        };
        debug!(horizontal, start = ?line.first(), "placed wilderness road");
        for pos in line {
            if grid.kind_at(pos) != Some(CellKind::Water) {
                grid.set(pos, CellKind::Road);
            }
        }
    }
}
