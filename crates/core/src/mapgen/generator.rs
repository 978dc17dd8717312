//! Archetype dispatch for map generation.

mod city;
mod dungeon;
mod wilderness;

use tracing::debug;

use crate::types::{Archetype, MapSize};

use super::model::Grid;
use super::seed::MapRng;

/// Builds a fresh grid for `archetype` at `size`, drawing from `rng`.
pub fn generate(archetype: Archetype, size: MapSize, rng: &mut MapRng) -> Grid {
    let grid = match archetype {
        Archetype::Dungeon => dungeon::generate_dungeon(size, rng),
        Archetype::Wilderness => wilderness::generate_wilderness(size, rng),
        Archetype::City => city::generate_city(size, rng),
    };
    debug!(%archetype, %size, width = grid.width(), height = grid.height(), "generated map");
    grid
}

/// Seeded generator; every call with the same inputs yields the same grid.
pub struct MapGenerator {
    seed: u64,
}

impl MapGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generate(&self, archetype: Archetype, size: MapSize) -> Grid {
        generate(archetype, size, &mut MapRng::from_seed(self.seed))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::mapgen::layout::{MAX_ROOM_ATTEMPTS, build_room_layout};
    use crate::types::{CellKind, Pos};

    #[test]
    fn same_seed_produces_byte_identical_grids() {
        for archetype in Archetype::ALL {
            let a = MapGenerator::new(123_456).generate(archetype, MapSize::Large);
            let b = MapGenerator::new(123_456).generate(archetype, MapSize::Large);
            assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        }
    }

    #[test]
    fn different_seeds_change_dungeon_and_wilderness_output() {
        for archetype in [Archetype::Dungeon, Archetype::Wilderness] {
            let outputs: BTreeSet<Vec<u8>> = (0..8)
                .map(|seed| MapGenerator::new(seed).generate(archetype, MapSize::Medium))
                .map(|grid| grid.canonical_bytes())
                .collect();
            assert!(outputs.len() > 1, "{archetype} output never varied");
        }
    }

    #[test]
    fn small_dungeon_matches_worked_example() {
        let seed = 42;
        let grid = MapGenerator::new(seed).generate(Archetype::Dungeon, MapSize::Small);
        let rooms = build_room_layout(&mut MapRng::from_seed(seed), 20, 15);

        assert_eq!((grid.width(), grid.height()), (20, 15));
        assert!(!rooms.is_empty() && rooms.len() <= MAX_ROOM_ATTEMPTS);
        for room in &rooms {
            for y in room.y..room.y + room.height {
                for x in room.x..room.x + room.width {
                    let kind = grid.kind_at(Pos { y: y as i32, x: x as i32 });
                    assert!(matches!(kind, Some(CellKind::Floor | CellKind::Door)), "{kind:?}");
                }
            }
        }
        let open = grid.count(CellKind::Floor) + grid.count(CellKind::Door);
        assert_eq!(grid.count(CellKind::Wall), 300 - open);
    }

    #[test]
    fn dungeon_outer_ring_stays_wall() {
        for seed in 0..32 {
            let grid = MapGenerator::new(seed).generate(Archetype::Dungeon, MapSize::Small);
            for cell in grid.cells() {
                let on_border = cell.pos.x == 0
                    || cell.pos.y == 0
                    || cell.pos.x == 19
                    || cell.pos.y == 14;
                if on_border {
                    assert_eq!(cell.kind, CellKind::Wall, "seed={seed} {:?}", cell.pos);
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_grids_have_fixed_dimensions_and_valid_tags(
            seed in any::<u64>(),
            archetype_selector in 0_usize..3,
            size_selector in 0_usize..3,
        ) {
            let archetype = Archetype::ALL[archetype_selector];
            let size = MapSize::ALL[size_selector];
            let grid = MapGenerator::new(seed).generate(archetype, size);

            prop_assert_eq!((grid.width(), grid.height()), size.dimensions());
            prop_assert_eq!(grid.rows().count(), size.dimensions().1);
            for cell in grid.cells() {
                prop_assert!(archetype.allows(cell.kind), "{:?} in {}", cell.kind, archetype);
            }
        }

        #[test]
        fn dungeon_open_cells_form_one_connected_region(
            seed in any::<u64>(),
            size_selector in 0_usize..3,
        ) {
            let size = MapSize::ALL[size_selector];
            let grid = MapGenerator::new(seed).generate(Archetype::Dungeon, size);
            prop_assert!(open_cells_connected(&grid), "seed={seed}");
        }

        #[test]
        fn dungeon_room_interiors_are_open(seed in any::<u64>(), size_selector in 0_usize..3) {
            let size = MapSize::ALL[size_selector];
            let (width, height) = size.dimensions();
            let grid = MapGenerator::new(seed).generate(Archetype::Dungeon, size);
            let rooms = build_room_layout(&mut MapRng::from_seed(seed), width, height);
            prop_assert!(!rooms.is_empty());
            for room in &rooms {
                for y in room.y..room.y + room.height {
                    for x in room.x..room.x + room.width {
                        let kind = grid.kind_at(Pos { y: y as i32, x: x as i32 });
                        prop_assert!(
                            matches!(kind, Some(CellKind::Floor | CellKind::Door)),
                            "seed={} room={:?} cell=({}, {}) kind={:?}", seed, room, x, y, kind
                        );
                    }
                }
            }
        }

        #[test]
        fn dungeon_rooms_keep_their_margin(seed in any::<u64>(), size_selector in 0_usize..3) {
            let (width, height) = MapSize::ALL[size_selector].dimensions();
            let rooms = build_room_layout(&mut MapRng::from_seed(seed), width, height);
            for (index, room) in rooms.iter().enumerate() {
                for other in &rooms[index + 1..] {
                    prop_assert!(!room.expanded(1).intersects(&other.expanded(1)));
                }
            }
        }
    }

    fn open_cells_connected(grid: &Grid) -> bool {
        let is_open =
            |kind: Option<CellKind>| matches!(kind, Some(CellKind::Floor | CellKind::Door));
        let open_positions: Vec<Pos> =
            grid.cells().filter(|cell| is_open(Some(cell.kind))).map(|cell| cell.pos).collect();

        let Some(start) = open_positions.first().copied() else {
            return true;
        };

        let mut open = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);
        while let Some(pos) = open.pop_front() {
            for next in pos.neighbors() {
                if seen.contains(&next) || !is_open(grid.kind_at(next)) {
                    continue;
                }
                seen.insert(next);
                open.push_back(next);
            }
        }

        seen.len() == open_positions.len()
    }
}
