//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_pressed};

const ACTION_KEYS: [KeyCode; 10] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::S,
    KeyCode::M,
    KeyCode::L,
    KeyCode::G,
    KeyCode::Space,
    KeyCode::E,
    KeyCode::C,
];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
}

pub fn capture_frame_input() -> FrameInput {
    let keys_pressed = ACTION_KEYS.into_iter().filter(|&key| is_key_pressed(key)).collect();
    FrameInput { keys_pressed }
}
