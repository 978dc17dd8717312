use std::collections::{BTreeSet, VecDeque};

use anyhow::{Result, bail};
use clap::Parser;
use map_core::{Archetype, CellKind, Grid, MapGenerator, MapRng, MapSize, Pos};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Maps generated per archetype and size
    #[arg(short, long, default_value_t = 200)]
    count: u32,
}

fn open_cells_connected(grid: &Grid) -> bool {
    let is_open = |pos: Pos| matches!(grid.kind_at(pos), Some(CellKind::Floor | CellKind::Door));
    let open: Vec<Pos> = grid.cells().map(|cell| cell.pos).filter(|&pos| is_open(pos)).collect();
    let Some(start) = open.first().copied() else {
        return false;
    };

    let mut queue = VecDeque::from([start]);
    let mut seen = BTreeSet::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in pos.neighbors() {
            if is_open(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() == open.len()
}

/// First cell on the outer ring that is not street.
fn city_border_violation(grid: &Grid) -> Option<Pos> {
    let (right, bottom) = (grid.width() as i32 - 1, grid.height() as i32 - 1);
    grid.cells()
        .filter(|cell| {
            cell.pos.x == 0 || cell.pos.y == 0 || cell.pos.x == right || cell.pos.y == bottom
        })
        .find(|cell| cell.kind != CellKind::Road)
        .map(|cell| cell.pos)
}

fn check(grid: &Grid, archetype: Archetype, size: MapSize) -> Option<String> {
    if (grid.width(), grid.height()) != size.dimensions() {
        return Some("dimensions differ from size class".to_string());
    }
    if let Some(cell) = grid.cells().find(|cell| !archetype.allows(cell.kind)) {
        return Some(format!("foreign tag {:?} at {:?}", cell.kind, cell.pos));
    }
    match archetype {
        Archetype::Dungeon if !open_cells_connected(grid) => {
            Some("dungeon rooms are not connected".to_string())
        }
        Archetype::Wilderness if grid.count(CellKind::Water) == 0 => {
            Some("wilderness has no water".to_string())
        }
        Archetype::City => {
            city_border_violation(grid).map(|pos| format!("city border is not street at {pos:?}"))
        }
        _ => None,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    info!(seed = args.seed, count = args.count, "starting map fuzz harness");
    let mut seeds = MapRng::from_seed(args.seed);
    let mut failures = 0_u32;

    for _ in 0..args.count {
        let case_seed = seeds.next_u64();
        for archetype in Archetype::ALL {
            for size in MapSize::ALL {
                let grid = MapGenerator::new(case_seed).generate(archetype, size);
                if let Some(reason) = check(&grid, archetype, size) {
                    warn!(case_seed, %archetype, %size, %reason, "invariant failed");
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} generated maps violated invariants");
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
