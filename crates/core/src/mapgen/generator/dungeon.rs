//! Rooms joined by L-shaped corridors, with doors on room edges.

use crate::types::{Archetype, MapSize};

use super::super::layout::{build_room_layout, carve_room, carve_room_corridors, place_doors};
use super::super::model::Grid;
use super::super::seed::MapRng;

pub(super) fn generate_dungeon(size: MapSize, rng: &mut MapRng) -> Grid {
    let mut grid = Grid::filled(Archetype::Dungeon, size);
    let rooms = build_room_layout(rng, grid.width(), grid.height());

    for room in &rooms {
        carve_room(&mut grid, room);
    }
    carve_room_corridors(&mut grid, &rooms);
    place_doors(&mut grid, rng, &rooms);

    grid
}
