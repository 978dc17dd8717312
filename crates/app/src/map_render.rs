//! Rendering for the viewer frame: status bar, selection sidebar and map panel.

use crate::viewer_layout::{FrameLayout, PanelRect};
use app::app_loop::AppState;
use app::status_text;
use mapcore::render::{cell_rgb, description, legend};
use mapcore::{Archetype, CellKind, Grid, MapSize};
use macroquad::prelude::*;

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const CELL_OUTLINE_COLOR: Color = BLACK;
const HIGHLIGHT_COLOR: Color = Color { r: 1.0, g: 0.85, b: 0.3, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const PANEL_PAD_X: f32 = 15.0;
const PANEL_PAD_Y: f32 = 25.0;
const FONT_SIZE: f32 = 18.0;
const LINE_STEP: f32 = 20.0;
const SWATCH_SIZE: f32 = 14.0;
const MAX_CELL_PIXELS: f32 = 32.0;
const MIN_OUTLINED_CELL_PIXELS: f32 = 4.0;

pub fn draw_frame(app_state: &AppState, layout: &FrameLayout) {
    draw_panel_borders(layout);
    draw_status_panel(app_state, layout.status);
    draw_sidebar(app_state, layout.sidebar);
    draw_map_panel(app_state, layout.map);
}

fn draw_panel_borders(layout: &FrameLayout) {
    for panel in [layout.status, layout.sidebar, layout.map] {
        draw_rectangle_lines(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            BORDER_THICKNESS,
            BORDER_COLOR,
        );
    }
}

fn draw_status_panel(app_state: &AppState, panel: PanelRect) {
    let status = app_state.status_line.clone().unwrap_or_else(|| status_text(&app_state.session));
    draw_text(&status, panel.x + PANEL_PAD_X, panel.y + 22.0, 20.0, WHITE);
}

fn draw_sidebar(app_state: &AppState, panel: PanelRect) {
    let archetype = app_state.session.archetype();
    let entries = legend(archetype);
    let legend_height = (entries.len() + 1) as f32 * LINE_STEP;
    let lines = sidebar_lines(archetype, app_state.session.size());
    let fitted = fit_lines_to_panel(&lines, panel.height - legend_height, LINE_STEP, PANEL_PAD_Y);

    let text_x = panel.x + PANEL_PAD_X;
    let mut y = panel.y + PANEL_PAD_Y;
    for line in &fitted {
        let color = if line.starts_with('>') { HIGHLIGHT_COLOR } else { LIGHTGRAY };
        draw_text(line, text_x, y, FONT_SIZE, color);
        y += LINE_STEP;
    }

    draw_text("Legend", text_x, y, FONT_SIZE, WHITE);
    y += LINE_STEP;
    for &(label, kind) in entries {
        draw_rectangle(text_x, y - SWATCH_SIZE + 2.0, SWATCH_SIZE, SWATCH_SIZE, kind_color(kind));
        draw_rectangle_lines(
            text_x,
            y - SWATCH_SIZE + 2.0,
            SWATCH_SIZE,
            SWATCH_SIZE,
            BORDER_THICKNESS,
            CELL_OUTLINE_COLOR,
        );
        draw_text(label, text_x + SWATCH_SIZE + 8.0, y, FONT_SIZE, LIGHTGRAY);
        y += LINE_STEP;
    }
}

fn draw_map_panel(app_state: &AppState, panel: PanelRect) {
    let Some(grid) = app_state.session.grid() else {
        let placeholder = if app_state.session.is_generating() {
            "Generating..."
        } else {
            "No Map Generated"
        };
        draw_text(placeholder, panel.x + PANEL_PAD_X, panel.y + PANEL_PAD_Y, 24.0, GRAY);
        return;
    };

    let cell = fit_cell_size(
        panel.width - 2.0 * PANEL_PAD_X,
        panel.height - 2.0 * PANEL_PAD_X,
        grid.width(),
        grid.height(),
    );
    let origin_x = panel.x + PANEL_PAD_X;
    let origin_y = panel.y + PANEL_PAD_X;
    draw_grid(grid, origin_x, origin_y, cell);
}

fn draw_grid(grid: &Grid, origin_x: f32, origin_y: f32, cell: f32) {
    for (y, row) in grid.rows().enumerate() {
        for (x, &kind) in row.iter().enumerate() {
            let cell_x = origin_x + x as f32 * cell;
            let cell_y = origin_y + y as f32 * cell;
            draw_rectangle(cell_x, cell_y, cell, cell, kind_color(kind));
            if cell >= MIN_OUTLINED_CELL_PIXELS {
                draw_rectangle_lines(cell_x, cell_y, cell, cell, 1.0, CELL_OUTLINE_COLOR);
            }
        }
    }
}

fn kind_color(kind: CellKind) -> Color {
    let [r, g, b] = cell_rgb(kind);
    Color::from_rgba(r, g, b, 255)
}

fn archetype_label(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::Dungeon => "Dungeon",
        Archetype::Wilderness => "Wilderness",
        Archetype::City => "City",
    }
}

fn size_label(size: MapSize) -> &'static str {
    match size {
        MapSize::Small => "Small",
        MapSize::Medium => "Medium",
        MapSize::Large => "Large",
    }
}

/// Selection and key help lines; the selected entries are prefixed with `>`.
fn sidebar_lines(selected_archetype: Archetype, selected_size: MapSize) -> Vec<String> {
    let mut lines = vec!["Map Type".to_string()];
    for (index, archetype) in Archetype::ALL.into_iter().enumerate() {
        let marker = if archetype == selected_archetype { '>' } else { ' ' };
        lines.push(format!("{marker} [{}] {}", index + 1, archetype_label(archetype)));
    }

    lines.push("Map Size".to_string());
    for size in MapSize::ALL {
        let marker = if size == selected_size { '>' } else { ' ' };
        let (width, height) = size.dimensions();
        let key = &size_label(size)[..1];
        lines.push(format!("{marker} [{key}] {} ({width}x{height})", size_label(size)));
    }

    lines.push(description(selected_archetype).to_string());
    lines.push("[G] Generate  [E] Export".to_string());
    lines.push("[C] Clear".to_string());
    lines
}

/// Largest whole-pixel cell size that fits `columns x rows` into the area.
fn fit_cell_size(available_width: f32, available_height: f32, columns: usize, rows: usize) -> f32 {
    if columns == 0 || rows == 0 {
        return 0.0;
    }
    let by_width = available_width / columns as f32;
    let by_height = available_height / rows as f32;
    by_width.min(by_height).floor().clamp(1.0, MAX_CELL_PIXELS)
}

fn fit_lines_to_panel(
    lines: &[String],
    panel_height: f32,
    line_step: f32,
    panel_pad_y: f32,
) -> Vec<String> {
    if line_step <= 0.0 {
        return Vec::new();
    }

    let usable_height = (panel_height - panel_pad_y).max(0.0);
    let max_lines = (usable_height / line_step).floor() as usize;
    if lines.len() <= max_lines {
        return lines.to_vec();
    }
    if max_lines == 0 {
        return Vec::new();
    }
    if max_lines == 1 {
        return vec![format!("... and {} more", lines.len())];
    }

    let hidden_count = lines.len() - (max_lines - 1);
    let mut fitted_lines = lines[..max_lines - 1].to_vec();
    fitted_lines.push(format!("... and {hidden_count} more"));
    fitted_lines
}

#[cfg(test)]
mod tests;
