//! Raster rendering, PNG export and text views of generated grids.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{ImageFormat, Rgba, RgbaImage};
use thiserror::Error;
use tracing::info;

use crate::mapgen::Grid;
use crate::types::{Archetype, CellKind, MapSize};

pub const DEFAULT_CELL_SIZE: u32 = 20;
pub const MAX_CELL_SIZE: u32 = 64;
const BORDER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Cells smaller than this are drawn without an outline.
const MIN_BORDERED_CELL_SIZE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub cell_size: u32,
    pub draw_borders: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { cell_size: DEFAULT_CELL_SIZE, draw_borders: true }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cell size must be between 1 and {MAX_CELL_SIZE} pixels, got {0}")]
    InvalidCellSize(u32),
    #[error("failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub fn cell_rgb(kind: CellKind) -> [u8; 3] {
    match kind {
        CellKind::Wall => [0x4a, 0x4a, 0x4a],
        CellKind::Floor => [0xf5, 0xf5, 0xdc],
        CellKind::Door => [0x8b, 0x45, 0x13],
        CellKind::Water => [0x41, 0x69, 0xe1],
        CellKind::Tree => [0x22, 0x8b, 0x22],
        CellKind::Building => [0x69, 0x69, 0x69],
        CellKind::Road => [0xd3, 0xd3, 0xd3],
        CellKind::Empty => [0x90, 0xee, 0x90],
    }
}

pub fn cell_color(kind: CellKind) -> Rgba<u8> {
    let [r, g, b] = cell_rgb(kind);
    Rgba([r, g, b, 255])
}

pub fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Wall => '#',
        CellKind::Floor => '.',
        CellKind::Door => '+',
        CellKind::Water => '~',
        CellKind::Tree => 'T',
        CellKind::Building => 'B',
        CellKind::Road => '=',
        CellKind::Empty => ',',
    }
}

/// Legend rows shown next to a map of the given archetype.
pub fn legend(archetype: Archetype) -> &'static [(&'static str, CellKind)] {
    match archetype {
        Archetype::Dungeon => {
            &[("Wall", CellKind::Wall), ("Floor", CellKind::Floor), ("Door", CellKind::Door)]
        }
        Archetype::Wilderness => &[
            ("Grass", CellKind::Empty),
            ("Trees", CellKind::Tree),
            ("Water", CellKind::Water),
            ("Road", CellKind::Road),
        ],
        Archetype::City => &[
            ("Street", CellKind::Road),
            ("Building", CellKind::Building),
            ("Fountain", CellKind::Water),
        ],
    }
}

pub fn description(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::Dungeon => "A procedurally generated dungeon with rooms and corridors",
        Archetype::Wilderness => "A natural landscape with trees, water, and paths",
        Archetype::City => "An urban environment with buildings and streets",
    }
}

pub fn render_image(grid: &Grid, options: &RenderOptions) -> RgbaImage {
    let cell_size = options.cell_size.max(1);
    let bordered = options.draw_borders && cell_size >= MIN_BORDERED_CELL_SIZE;
    let image_width = grid.width() as u32 * cell_size;
    let image_height = grid.height() as u32 * cell_size;

    RgbaImage::from_fn(image_width, image_height, |px, py| {
        let local_x = px % cell_size;
        let local_y = py % cell_size;
        if bordered
            && (local_x == 0
                || local_y == 0
                || local_x == cell_size - 1
                || local_y == cell_size - 1)
        {
            return BORDER_COLOR;
        }
        let row = grid.row((py / cell_size) as usize).unwrap_or_default();
        row.get((px / cell_size) as usize).copied().map_or(BORDER_COLOR, cell_color)
    })
}

/// File name used for downloads: `{archetype}-map-{size}-{timestamp}.png`.
pub fn export_file_name(archetype: Archetype, size: MapSize, timestamp_ms: u64) -> String {
    format!("{archetype}-map-{size}-{timestamp_ms}.png")
}

pub fn export_png(
    grid: &Grid,
    dir: &Path,
    options: &RenderOptions,
    timestamp_ms: u64,
) -> Result<PathBuf, ExportError> {
    if options.cell_size == 0 || options.cell_size > MAX_CELL_SIZE {
        return Err(ExportError::InvalidCellSize(options.cell_size));
    }
    fs::create_dir_all(dir)
        .map_err(|source| ExportError::CreateDir { path: dir.to_path_buf(), source })?;

    let path = dir.join(export_file_name(grid.archetype(), grid.size(), timestamp_ms));
    render_image(grid, options)
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| ExportError::Encode { path: path.clone(), source })?;

    info!(path = %path.display(), "exported map image");
    Ok(path)
}

pub fn unix_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |duration| duration.as_millis() as u64)
}

pub fn to_ascii(grid: &Grid) -> String {
    let mut text = String::with_capacity((grid.width() + 1) * grid.height());
    for row in grid.rows() {
        text.extend(row.iter().map(|&kind| glyph(kind)));
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::MapGenerator;

    #[test]
    fn export_file_name_follows_download_pattern() {
        assert_eq!(
            export_file_name(Archetype::Wilderness, MapSize::Large, 1_700_000_000_123),
            "wilderness-map-large-1700000000123.png"
        );
    }

    #[test]
    fn image_scales_with_cell_size() {
        let grid = MapGenerator::new(5).generate(Archetype::Dungeon, MapSize::Small);
        let image = render_image(&grid, &RenderOptions::default());
        assert_eq!(image.dimensions(), (400, 300));

        let tiny = render_image(&grid, &RenderOptions { cell_size: 2, draw_borders: true });
        assert_eq!(tiny.dimensions(), (40, 30));
    }

    #[test]
    fn cell_interiors_use_palette_and_edges_use_border() {
        let grid = MapGenerator::new(5).generate(Archetype::City, MapSize::Small);
        let image = render_image(&grid, &RenderOptions::default());

        // Top-left cell is always street.
        assert_eq!(*image.get_pixel(10, 10), cell_color(CellKind::Road));
        assert_eq!(*image.get_pixel(0, 10), BORDER_COLOR);
        assert_eq!(*image.get_pixel(19, 19), BORDER_COLOR);
        // Cell (1, 1) is the first building lot.
        assert_eq!(*image.get_pixel(30, 30), cell_color(CellKind::Building));
    }

    #[test]
    fn borders_can_be_disabled() {
        let grid = MapGenerator::new(5).generate(Archetype::City, MapSize::Small);
        let image = render_image(&grid, &RenderOptions { cell_size: 4, draw_borders: false });
        assert_eq!(*image.get_pixel(0, 0), cell_color(CellKind::Road));
    }

    #[test]
    fn legend_only_lists_kinds_of_its_archetype() {
        for archetype in Archetype::ALL {
            let entries = legend(archetype);
            assert_eq!(entries.len(), archetype.kinds().len());
            assert!(entries.iter().all(|&(_, kind)| archetype.allows(kind)));
        }
    }

    #[test]
    fn ascii_view_has_one_line_per_row() {
        let grid = MapGenerator::new(9).generate(Archetype::Wilderness, MapSize::Medium);
        let text = to_ascii(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 22);
        assert!(lines.iter().all(|line| line.chars().count() == 30));
        assert_eq!(text.matches('~').count(), grid.count(CellKind::Water));
    }

    #[test]
    fn palette_colors_are_distinct() {
        let mut colors: Vec<[u8; 3]> = CellKind::ALL.iter().map(|&kind| cell_rgb(kind)).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), CellKind::ALL.len());
    }
}
