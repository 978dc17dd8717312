//! Optional TOML configuration shared by the CLI and the desktop viewer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{DEFAULT_CELL_SIZE, MAX_CELL_SIZE, RenderOptions};
use crate::types::{Archetype, MapSize};

/// Defaults for map selection and image export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub archetype: Archetype,
    pub size: MapSize,
    pub cell_size: u32,
    pub draw_borders: bool,
    pub output_dir: PathBuf,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            archetype: Archetype::default(),
            size: MapSize::default(),
            cell_size: DEFAULT_CELL_SIZE,
            draw_borders: true,
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cell_size must be between 1 and {MAX_CELL_SIZE}, got {0}")]
    InvalidCellSize(u32),
}

impl MapConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { cell_size: self.cell_size, draw_borders: self.draw_borders }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_yields_defaults() {
        let config = MapConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn partial_document_overrides_named_fields() {
        let config = MapConfig::from_toml_str(
            r#"
archetype = "city"
size = "large"
cell_size = 12
"#,
        )
        .expect("parse");
        assert_eq!(config.archetype, Archetype::City);
        assert_eq!(config.size, MapSize::Large);
        assert_eq!(config.cell_size, 12);
        assert!(config.draw_borders);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn rejects_out_of_range_cell_size() {
        assert!(matches!(
            MapConfig::from_toml_str("cell_size = 0"),
            Err(ConfigError::InvalidCellSize(0))
        ));
        assert!(matches!(
            MapConfig::from_toml_str("cell_size = 65"),
            Err(ConfigError::InvalidCellSize(65))
        ));
    }

    #[test]
    fn rejects_unknown_archetype_and_fields() {
        assert!(matches!(
            MapConfig::from_toml_str(r#"archetype = "cavern""#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(MapConfig::from_toml_str("zoom = 2"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("mapgen.toml");
        fs::write(&path, "size = \"small\"\ndraw_borders = false\n").expect("write");

        let config = MapConfig::load(&path).expect("load");
        assert_eq!(config.size, MapSize::Small);
        assert!(!config.draw_borders);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(MapConfig::load(&missing), Err(ConfigError::Read { .. })));
    }
}
