//! Game state and core simulation types
//!
//! A `GameState` is an immutable value: each tick builds a new one from the
//! previous state's fields. Only `keys_held` changes between ticks.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ms_to_secs;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active play, physics integrates
    Playing,
    /// Waiting for the serve key, ball frozen
    #[default]
    Paused,
}

/// Anything with a position and a velocity
///
/// Ball and paddles share one integration rule through this trait.
pub trait MovingBody: Sized {
    fn pos(&self) -> Vec2;
    fn vel(&self) -> Vec2;
    /// Rebuild the body with new motion, keeping every other field
    fn with_motion(self, pos: Vec2, vel: Vec2) -> Self;

    /// Advance position by `vel` over `elapsed_ms`
    fn integrate(self, elapsed_ms: f32) -> Self {
        let pos = self.pos() + self.vel() * ms_to_secs(elapsed_ms);
        let vel = self.vel();
        self.with_motion(pos, vel)
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub const fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::new(BALL_START_VX, BALL_START_VY))
    }
}

impl MovingBody for Ball {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    fn with_motion(self, pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }
}

/// A player paddle and its score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub score: u32,
}

impl Player {
    /// Centered paddle at the given x, not moving, no points
    pub const fn at(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            vel: Vec2::ZERO,
            score: 0,
        }
    }

    /// Left paddle
    pub const fn left() -> Self {
        Self::at(PADDLE_WALL_OFFSET - HALF_WIDTH)
    }

    /// Right paddle
    pub const fn right() -> Self {
        Self::at(HALF_WIDTH - PADDLE_WALL_OFFSET)
    }
}

impl MovingBody for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    fn with_motion(self, pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel, ..self }
    }
}

/// Keys currently held down, by key identifier
///
/// Mutated only by key-down/key-up events, never by a tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysHeld(BTreeSet<String>);

impl KeysHeld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Repeats are no-ops.
    pub fn press(&mut self, key: &str) {
        self.0.insert(key.to_owned());
    }

    /// Record a key-up. Releasing an unheld key is a no-op.
    pub fn release(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeysHeld {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|k| k.as_ref().to_owned()).collect())
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Held keys (updated outside the tick transition)
    pub keys_held: KeysHeld,
    /// Current phase
    pub phase: GamePhase,
    pub ball: Ball,
    /// Left paddle (W/S)
    pub player1: Player,
    /// Right paddle (arrow keys)
    pub player2: Player,
}

impl GameState {
    /// Fresh table: ball centered, paddles centered, no points, paused
    pub fn new() -> Self {
        Self {
            keys_held: KeysHeld::new(),
            phase: GamePhase::Paused,
            ball: Ball::default(),
            player1: Player::left(),
            player2: Player::right(),
        }
    }

    /// Score label as shown on the board
    pub fn score_line(&self) -> String {
        format!("{} - {}", self.player1.score, self.player2.score)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
