//! In-memory map generator state, updated only through [`MapSession::apply`].

use tracing::debug;

use crate::mapgen::{Grid, generate_seeded};
use crate::render::export_file_name;
use crate::types::{Archetype, MapSize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    SelectArchetype(Archetype),
    SelectSize(MapSize),
    /// Enter the generating state; the map is built on `CompleteGeneration`.
    RequestGeneration { seed: u64 },
    CompleteGeneration,
    /// Drop the current map and cancel any pending generation.
    Clear,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapSession {
    archetype: Archetype,
    size: MapSize,
    grid: Option<Grid>,
    pending_seed: Option<u64>,
    last_seed: Option<u64>,
}

impl MapSession {
    pub fn new(archetype: Archetype, size: MapSize) -> Self {
        Self { archetype, size, ..Self::default() }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn size(&self) -> MapSize {
        self.size
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.pending_seed.is_some()
    }

    /// Seed of the grid currently shown, if any.
    pub fn last_seed(&self) -> Option<u64> {
        self.last_seed
    }

    pub fn apply(self, action: SessionAction) -> Self {
        match action {
            SessionAction::SelectArchetype(archetype) => Self { archetype, ..self },
            SessionAction::SelectSize(size) => Self { size, ..self },
            SessionAction::RequestGeneration { seed } => {
                if self.is_generating() {
                    return self;
                }
                Self { pending_seed: Some(seed), ..self }
            }
            SessionAction::CompleteGeneration => {
                let Some(seed) = self.pending_seed else {
                    return self;
                };
                debug!(seed, archetype = %self.archetype, size = %self.size, "completing generation");
                let grid = generate_seeded(self.archetype, self.size, seed);
                Self { grid: Some(grid), pending_seed: None, last_seed: Some(seed), ..self }
            }
            SessionAction::Clear => {
                Self { grid: None, pending_seed: None, last_seed: None, ..self }
            }
        }
    }

    /// Download name for the current grid; `None` until a map exists.
    pub fn export_file_name(&self, timestamp_ms: u64) -> Option<String> {
        self.grid.as_ref().map(|grid| export_file_name(grid.archetype(), grid.size(), timestamp_ms))
    }
}
