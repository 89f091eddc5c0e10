//! Per-tick input derived from held keys

use super::state::KeysHeld;

/// Key identifiers the game reacts to
pub mod keys {
    pub const SERVE: &str = " ";
    pub const P1_UP: &str = "w";
    pub const P1_DOWN: &str = "s";
    pub const P2_UP: &str = "ArrowUp";
    pub const P2_DOWN: &str = "ArrowDown";
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Input {
    /// Serve key held
    pub request_start: bool,
    /// Left paddle direction (-1 down, 0 still, 1 up)
    pub paddle1_dir: i8,
    /// Right paddle direction (-1 down, 0 still, 1 up)
    pub paddle2_dir: i8,
    /// Time since the previous tick
    pub elapsed_ms: f32,
}

/// Build the tick input from the keys currently held
pub fn derive_input(keys_held: &KeysHeld, elapsed_ms: f32) -> Input {
    Input {
        request_start: keys_held.contains(keys::SERVE),
        paddle1_dir: direction(keys_held, keys::P1_UP, keys::P1_DOWN),
        paddle2_dir: direction(keys_held, keys::P2_UP, keys::P2_DOWN),
        elapsed_ms,
    }
}

/// Down wins when both keys are held
fn direction(keys_held: &KeysHeld, up: &str, down: &str) -> i8 {
    if keys_held.contains(down) {
        -1
    } else if keys_held.contains(up) {
        1
    } else {
        0
    }
}
