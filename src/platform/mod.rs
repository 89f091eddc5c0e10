//! Platform glue between host events and the simulation
//!
//! The host delivers key-down, key-up and animation-frame events one at a
//! time. `Session` owns the game state and applies each event to it;
//! `FrameClock` turns frame timestamps into elapsed milliseconds.

use crate::scene::{Palette, Scene, render};
use crate::sim::{GamePhase, GameState, derive_input, step};

/// Live game driven by host events
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: GameState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Resume from an existing state
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn key_down(&mut self, key: &str) {
        log::debug!("key down {:?}", key);
        self.state.keys_held.press(key);
    }

    pub fn key_up(&mut self, key: &str) {
        log::debug!("key up {:?}", key);
        self.state.keys_held.release(key);
    }

    /// Run one simulation step and replace the stored state with the result
    pub fn tick(&mut self, elapsed_ms: f32) -> &GameState {
        let input = derive_input(&self.state.keys_held, elapsed_ms);
        let prev = std::mem::take(&mut self.state);
        let (prev_phase, prev_score) = (prev.phase, (prev.player1.score, prev.player2.score));

        self.state = step(prev, &input);

        let score = (self.state.player1.score, self.state.player2.score);
        if score.0 != prev_score.0 {
            log::info!("Point to player 1, score {}", self.state.score_line());
        }
        if score.1 != prev_score.1 {
            log::info!("Point to player 2, score {}", self.state.score_line());
        }
        if self.state.phase != prev_phase {
            match self.state.phase {
                GamePhase::Playing => log::info!("Serve"),
                GamePhase::Paused => log::info!("Paused, waiting for serve"),
            }
        }

        &self.state
    }

    /// Scene for the current state
    pub fn scene(&self, palette: &Palette) -> Scene {
        render(&self.state, palette)
    }
}

/// Converts animation-frame timestamps into per-frame deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous timestamp; zero on the first frame
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let elapsed = match self.last {
            Some(last) => timestamp_ms - last,
            None => 0.0,
        };
        self.last = Some(timestamp_ms);
        elapsed as f32
    }
}
