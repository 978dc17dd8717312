pub mod app_loop;

pub const APP_NAME: &str = "Tabletop Map Generator";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Status text for the current session.
pub fn status_text(session: &mapcore::MapSession) -> String {
    if session.is_generating() {
        return "Generating...".to_string();
    }
    match (session.grid(), session.last_seed()) {
        (Some(grid), Some(seed)) => format!(
            "{} x {} {} map, seed {}",
            grid.width(),
            grid.height(),
            grid.archetype(),
            format_seed(seed)
        ),
        _ => "No Map Generated - press G to generate".to_string(),
    }
}
