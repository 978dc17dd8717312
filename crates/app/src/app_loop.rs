use std::mem;

use macroquad::prelude::KeyCode;
use mapcore::{Archetype, MapSession, MapSize, SessionAction};

/// Artificial pause between a generate request and the finished map, in seconds.
pub const GENERATION_DELAY: f64 = 0.5;

/// Work the frame loop must perform outside the pure state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    ExportPng,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub session: MapSession,
    /// When the pending generation was requested, in seconds since start.
    pub requested_at: Option<f64>,
    pub status_line: Option<String>,
}

impl AppState {
    pub fn new(archetype: Archetype, size: MapSize) -> Self {
        Self { session: MapSession::new(archetype, size), ..Self::default() }
    }

    fn dispatch(&mut self, action: SessionAction) {
        let session = mem::take(&mut self.session);
        self.session = session.apply(action);
    }

    /// Handles one frame of input. `fresh_seed` is used only when this frame
    /// starts a new generation.
    pub fn tick(
        &mut self,
        keys_pressed: &[KeyCode],
        now: f64,
        fresh_seed: u64,
    ) -> Vec<FrameRequest> {
        let mut requests = Vec::new();

        for key in keys_pressed {
            match key {
                KeyCode::Key1 => self.dispatch(SessionAction::SelectArchetype(Archetype::Dungeon)),
                KeyCode::Key2 => {
                    self.dispatch(SessionAction::SelectArchetype(Archetype::Wilderness))
                }
                KeyCode::Key3 => self.dispatch(SessionAction::SelectArchetype(Archetype::City)),
                KeyCode::S => self.dispatch(SessionAction::SelectSize(MapSize::Small)),
                KeyCode::M => self.dispatch(SessionAction::SelectSize(MapSize::Medium)),
                KeyCode::L => self.dispatch(SessionAction::SelectSize(MapSize::Large)),
                KeyCode::G | KeyCode::Space if !self.session.is_generating() => {
                    self.dispatch(SessionAction::RequestGeneration { seed: fresh_seed });
                    self.requested_at = Some(now);
                    self.status_line = None;
                }
                KeyCode::C => {
                    self.dispatch(SessionAction::Clear);
                    self.requested_at = None;
                    self.status_line = None;
                }
                KeyCode::E if self.session.grid().is_some() => {
                    if !requests.contains(&FrameRequest::ExportPng) {
                        requests.push(FrameRequest::ExportPng);
                    }
                }
                _ => {}
            }
        }

        if let Some(requested_at) = self.requested_at
            && now - requested_at >= GENERATION_DELAY
        {
            self.dispatch(SessionAction::CompleteGeneration);
            self.requested_at = None;
        }

        requests
    }
}
