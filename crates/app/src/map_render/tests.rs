use super::{fit_cell_size, fit_lines_to_panel, kind_color, sidebar_lines};
use mapcore::{Archetype, CellKind, MapSize};

#[test]
fn cell_size_fits_the_tighter_axis() {
    // 800x600 area: 40 columns give 20px, 30 rows give 20px.
    assert_eq!(fit_cell_size(800.0, 600.0, 40, 30), 20.0);
    // Height-limited.
    assert_eq!(fit_cell_size(800.0, 300.0, 40, 30), 10.0);
    // Caps oversized cells and never drops below one pixel.
    assert_eq!(fit_cell_size(5_000.0, 5_000.0, 20, 15), 32.0);
    assert_eq!(fit_cell_size(10.0, 10.0, 40, 30), 1.0);
    assert_eq!(fit_cell_size(100.0, 100.0, 0, 0), 0.0);
}

#[test]
fn sidebar_marks_current_selection() {
    let lines = sidebar_lines(Archetype::Wilderness, MapSize::Large);
    let selected: Vec<&String> = lines.iter().filter(|line| line.starts_with('>')).collect();
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0], "> [2] Wilderness");
    assert_eq!(selected[1], "> [L] Large (40x30)");
    assert!(lines.iter().any(|line| line.contains("trees, water, and paths")));
}

#[test]
fn sidebar_lists_every_size_with_dimensions() {
    let lines = sidebar_lines(Archetype::Dungeon, MapSize::Medium);
    assert!(lines.contains(&"  [S] Small (20x15)".to_string()));
    assert!(lines.contains(&"> [M] Medium (30x22)".to_string()));
    assert!(lines.contains(&"  [L] Large (40x30)".to_string()));
}

#[test]
fn fit_lines_truncates_with_summary() {
    let lines: Vec<String> = (0..10).map(|index| format!("line {index}")).collect();
    let fitted = fit_lines_to_panel(&lines, 85.0, 20.0, 25.0);
    assert_eq!(fitted, vec!["line 0", "line 1", "... and 8 more"]);
    assert_eq!(fit_lines_to_panel(&lines, 300.0, 20.0, 25.0), lines);
    assert!(fit_lines_to_panel(&lines, 10.0, 20.0, 25.0).is_empty());
}

#[test]
fn swatch_colors_follow_the_export_palette() {
    let wall = kind_color(CellKind::Wall);
    assert!((wall.r - 0x4a as f32 / 255.0).abs() < 1e-6);
    assert_eq!(wall.a, 1.0);
    assert_ne!(kind_color(CellKind::Water), kind_color(CellKind::Tree));
}
