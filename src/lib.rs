//! Vector Pong - two-player keyboard Pong
//!
//! Core modules:
//! - `sim`: Pure simulation (physics, bounces, scoring, serve/pause)
//! - `scene`: Display-agnostic scene built from a game state
//! - `renderer`: WebGPU rendering of scene shapes
//! - `platform`: Event routing between the host and the simulation
//! - `settings`: Presentation preferences

pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use platform::{FrameClock, Session};
pub use scene::{Palette, Scene, render};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Board dimensions (world units, origin at board center)
    pub const GAME_WIDTH: f32 = 600.0;
    pub const GAME_HEIGHT: f32 = 400.0;
    pub const HALF_WIDTH: f32 = GAME_WIDTH / 2.0;
    pub const HALF_HEIGHT: f32 = GAME_HEIGHT / 2.0;

    /// Ball defaults
    pub const BALL_START_VX: f32 = 200.0;
    pub const BALL_START_VY: f32 = 200.0;
    pub const BALL_RADIUS: f32 = 7.5;
    /// Ball bounces off the floor/ceiling this far inside the edge
    pub const BALL_WALL_MARGIN: f32 = 7.0;

    /// Paddle defaults
    pub const PADDLE_SPEED: f32 = 200.0;
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 40.0;
    /// Distance from the side wall to the paddle center
    pub const PADDLE_WALL_OFFSET: f32 = 20.0;
    /// Paddle center may not come closer than this to the floor/ceiling
    pub const PADDLE_CLAMP_MARGIN: f32 = 22.0;

    /// Hit-box half extents around a paddle center
    pub const HITBOX_HALF_WIDTH: f32 = 8.0;
    pub const HITBOX_HALF_HEIGHT: f32 = 20.0;
}

/// Seconds covered by a millisecond delta
#[inline]
pub fn ms_to_secs(elapsed_ms: f32) -> f32 {
    elapsed_ms / 1000.0
}
