pub mod config;
pub mod mapgen;
pub mod render;
pub mod session;
pub mod types;

pub use config::{ConfigError, MapConfig};
pub use mapgen::{Grid, MapGenerator, MapRng, generate, generate_seeded};
pub use render::{ExportError, RenderOptions};
pub use session::{MapSession, SessionAction};
pub use types::*;
