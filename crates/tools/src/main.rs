use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use map_core::mapgen::generate_runtime_seed;
use map_core::mapgen::seed::parse_seed_value;
use map_core::render::{export_png, to_ascii, unix_millis};
use map_core::{Archetype, CellKind, Grid, MapConfig, MapGenerator, MapSize};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
    Png,
}

#[derive(Parser)]
#[command(author, version, about = "Generate tabletop grid maps", long_about = None)]
struct Args {
    /// Map archetype: dungeon, wilderness or city
    #[arg(short, long)]
    archetype: Option<Archetype>,
    /// Size class: small (20x15), medium (30x22) or large (40x30)
    #[arg(short, long)]
    size: Option<MapSize>,
    /// Seed for a reproducible map (decimal or 0x-prefixed hex); random when omitted
    #[arg(long, value_parser = parse_seed)]
    seed: Option<u64>,
    /// Path to a TOML config file with defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory PNG files are written to
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Pixels per cell in exported images
    #[arg(long)]
    cell_size: Option<u32>,
    /// Skip the per-cell outline in exported images
    #[arg(long)]
    no_borders: bool,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
}

fn parse_seed(raw: &str) -> Result<u64, String> {
    parse_seed_value(raw).ok_or_else(|| format!("seed value '{raw}' must be a number"))
}

#[derive(Serialize)]
struct MapDocument<'a> {
    archetype: Archetype,
    size: MapSize,
    seed: u64,
    width: usize,
    height: usize,
    rows: Vec<&'a [CellKind]>,
}

/// Applies command-line overrides on top of the loaded config.
fn resolve_config(args: &Args, mut config: MapConfig) -> Result<MapConfig> {
    if let Some(archetype) = args.archetype {
        config.archetype = archetype;
    }
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(cell_size) = args.cell_size {
        config.cell_size = cell_size;
    }
    if args.no_borders {
        config.draw_borders = false;
    }
    config.validate().context("Invalid map settings")?;
    Ok(config)
}

fn load_config(args: &Args) -> Result<MapConfig> {
    match &args.config {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(MapConfig::default()),
    }
}

fn write_document(grid: &Grid, seed: u64) -> Result<String> {
    let document = MapDocument {
        archetype: grid.archetype(),
        size: grid.size(),
        seed,
        width: grid.width(),
        height: grid.height(),
        rows: grid.rows().collect(),
    };
    serde_json::to_string_pretty(&document).context("Failed to serialize map JSON")
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = resolve_config(&args, load_config(&args)?)?;
    let seed = args.seed.unwrap_or_else(generate_runtime_seed);
    debug!(?config, "resolved settings");

    let grid = MapGenerator::new(seed).generate(config.archetype, config.size);
    info!(seed, archetype = %config.archetype, size = %config.size, "generated map");

    match args.format {
        OutputFormat::Ascii => {
            print!("{}", to_ascii(&grid));
            println!("Seed: {seed}");
        }
        OutputFormat::Json => println!("{}", write_document(&grid, seed)?),
        OutputFormat::Png => {
            let options = config.render_options();
            let path = export_png(&grid, &config.output_dir, &options, unix_millis())
                .with_context(|| format!("Failed to export map for seed {seed}"))?;
            println!("Wrote {}", path.display());
            println!("Seed: {seed}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::iter;

    use super::*;

    fn parse(arguments: &[&str]) -> Args {
        Args::try_parse_from(iter::once("mapgen").chain(arguments.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn flags_override_config_defaults() {
        let args = parse(&[
            "--archetype",
            "city",
            "--size",
            "large",
            "--cell-size",
            "8",
            "--no-borders",
        ]);
        let config = resolve_config(&args, MapConfig::default()).expect("valid");
        assert_eq!(config.archetype, Archetype::City);
        assert_eq!(config.size, MapSize::Large);
        assert_eq!(config.cell_size, 8);
        assert!(!config.draw_borders);
    }

    #[test]
    fn config_values_survive_without_flags() {
        let args = parse(&[]);
        let base = MapConfig { archetype: Archetype::Wilderness, ..MapConfig::default() };
        let config = resolve_config(&args, base.clone()).expect("valid");
        assert_eq!(config, base);
        assert_eq!(args.format, OutputFormat::Ascii);
    }

    #[test]
    fn invalid_cell_size_flag_is_rejected() {
        let args = parse(&["--cell-size", "0"]);
        assert!(resolve_config(&args, MapConfig::default()).is_err());
    }

    #[test]
    fn seeds_and_names_parse_from_strings() {
        let args = parse(&["-a", "Wilderness", "--seed", "0x10", "--format", "json"]);
        assert_eq!(args.archetype, Some(Archetype::Wilderness));
        assert_eq!(args.seed, Some(16));
        assert_eq!(args.format, OutputFormat::Json);

        assert!(Args::try_parse_from(["mapgen", "--seed", "abc"]).is_err());
        assert!(Args::try_parse_from(["mapgen", "--archetype", "cavern"]).is_err());
    }

    #[test]
    fn json_document_lists_rows_of_cell_names() {
        let grid = MapGenerator::new(3).generate(Archetype::Dungeon, MapSize::Small);
        let json = write_document(&grid, 3).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["archetype"], "dungeon");
        assert_eq!(value["seed"], 3);
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(15));
        assert_eq!(value["rows"][0][0], "wall");
    }
}
