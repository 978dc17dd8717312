mod frame_input;
mod map_render;
mod viewer_layout;
mod window_config;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use app::app_loop::{AppState, FrameRequest};
use frame_input::capture_frame_input;
use macroquad::prelude::*;
use map_render::draw_frame;
use mapcore::mapgen::generate_runtime_seed;
use mapcore::render::{export_png, unix_millis};
use mapcore::{Grid, MapConfig};
use taffy::TaffyTree;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use viewer_layout::{compute_frame_layout, setup_layout};
use window_config::build_window_conf;

const CONFIG_ENV_VAR: &str = "MAPGEN_CONFIG";

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn load_viewer_config() -> Result<MapConfig> {
    match env::var_os(CONFIG_ENV_VAR) {
        Some(raw_path) => {
            let path = PathBuf::from(raw_path);
            MapConfig::load(&path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))
        }
        None => Ok(MapConfig::default()),
    }
}

fn export_grid(grid: &Grid, config: &MapConfig) -> String {
    match export_png(grid, &config.output_dir, &config.render_options(), unix_millis()) {
        Ok(path) => format!("Exported {}", path.display()),
        Err(export_error) => {
            error!(error = %export_error, "map export failed");
            format!("Export failed: {export_error}")
        }
    }
}

#[macroquad::main(build_window_conf)]
async fn main() {
    init_logging();
    let config = load_viewer_config().unwrap_or_else(|load_error| {
        error!(error = ?load_error, "using default viewer settings");
        MapConfig::default()
    });
    info!(archetype = %config.archetype, size = %config.size, "viewer started");

    let mut app_state = AppState::new(config.archetype, config.size);
    let mut taffy = TaffyTree::new();
    let layout_nodes = setup_layout(&mut taffy);

    loop {
        let input = capture_frame_input();
        let requests = app_state.tick(&input.keys_pressed, get_time(), generate_runtime_seed());
        for request in requests {
            match request {
                FrameRequest::ExportPng => {
                    if let Some(grid) = app_state.session.grid() {
                        app_state.status_line = Some(export_grid(grid, &config));
                    }
                }
            }
        }

        clear_background(Color::from_rgba(24, 24, 28, 255));
        let layout = compute_frame_layout(&mut taffy, &layout_nodes, screen_width(), screen_height());
        draw_frame(&app_state, &layout);

        next_frame().await
    }
}
