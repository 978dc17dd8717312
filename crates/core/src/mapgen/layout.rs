//! Room placement, corridor carving and door placement for dungeon maps.

use tracing::debug;

use crate::types::{CellKind, Pos};

use super::grid::{paint_horizontal, paint_vertical};
use super::model::Grid;
use super::seed::MapRng;

pub(super) const MIN_ROOM_ATTEMPTS: usize = 5;
pub(super) const MAX_ROOM_ATTEMPTS: usize = 12;
const MIN_ROOM_WIDTH: usize = 4;
const MAX_ROOM_WIDTH: usize = 11;
const MIN_ROOM_HEIGHT: usize = 3;
const MAX_ROOM_HEIGHT: usize = 8;
const DOOR_CHANCE: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl RoomRect {
    fn right(self) -> usize {
        self.x + self.width - 1
    }

    fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub(super) fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    pub(super) fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub(super) fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Edge midpoints in top, bottom, left, right order.
    pub(super) fn door_candidates(self) -> [Pos; 4] {
        let mid_x = (self.x + self.width / 2) as i32;
        let mid_y = (self.y + self.height / 2) as i32;
        [
            Pos { y: self.y as i32, x: mid_x },
            Pos { y: self.bottom() as i32, x: mid_x },
            Pos { y: mid_y, x: self.x as i32 },
            Pos { y: mid_y, x: self.right() as i32 },
        ]
    }
}

/// Draws the attempt count once, then tries that many random rooms.
///
/// Candidates whose 1-cell margin touches an accepted room's margin are
/// dropped without retrying, so fewer rooms than attempts may survive.
/// Both boxes are expanded, so accepted rooms are at least two walls apart.
pub(super) fn build_room_layout(rng: &mut MapRng, width: usize, height: usize) -> Vec<RoomRect> {
    let attempts = rng.range(MIN_ROOM_ATTEMPTS, MAX_ROOM_ATTEMPTS);
    let mut rooms: Vec<RoomRect> = Vec::with_capacity(attempts);

    for _ in 0..attempts {
        let room_width = rng.range(MIN_ROOM_WIDTH, MAX_ROOM_WIDTH);
        let room_height = rng.range(MIN_ROOM_HEIGHT, MAX_ROOM_HEIGHT);
        if room_width + 3 > width || room_height + 3 > height {
            continue;
        }

        let x = rng.range(1, width - room_width - 2);
        let y = rng.range(1, height - room_height - 2);
        let candidate = RoomRect { x, y, width: room_width, height: room_height };
        let candidate_with_margin = candidate.expanded(1);
        if rooms
            .iter()
            .any(|existing_room| existing_room.expanded(1).intersects(&candidate_with_margin))
        {
            continue;
        }
        rooms.push(candidate);
    }

    debug!(attempts, accepted = rooms.len(), "placed dungeon rooms");
    rooms
}

pub(super) fn carve_room(grid: &mut Grid, room: &RoomRect) {
    for y in room.y..=room.bottom() {
        paint_horizontal(grid, y as i32, room.x as i32, room.right() as i32, CellKind::Floor);
    }
}

/// Joins each room to the next one in placement order with an L-shaped run:
/// horizontal along the first center's row, then vertical along the second
/// center's column.
pub(super) fn carve_room_corridors(grid: &mut Grid, rooms: &[RoomRect]) {
    for pair in rooms.windows(2) {
        let start = pair[0].center();
        let end = pair[1].center();
        paint_horizontal(grid, start.y, start.x, end.x, CellKind::Floor);
        paint_vertical(grid, end.x, start.y, end.y, CellKind::Floor);
    }
}

pub(super) fn place_doors(grid: &mut Grid, rng: &mut MapRng, rooms: &[RoomRect]) {
    let mut doors = 0_usize;
    for room in rooms {
        for candidate in room.door_candidates() {
            if !rng.chance(DOOR_CHANCE) || !grid.in_bounds(candidate) {
                continue;
            }
            let touches_floor = candidate
                .neighbors()
                .into_iter()
                .any(|neighbor| grid.kind_at(neighbor) == Some(CellKind::Floor));
            if touches_floor {
                grid.set(candidate, CellKind::Door);
                doors += 1;
            }
        }
    }
    debug!(doors, "placed dungeon doors");
}
