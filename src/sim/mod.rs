//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Elapsed-time integration only, no clocks
//! - No logging, rendering or platform dependencies
//! - Every tick returns a new state value

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::within_paddle;
pub use input::{Input, derive_input, keys};
pub use state::{Ball, GamePhase, GameState, KeysHeld, MovingBody, Player};
pub use tick::{advance_ball, advance_player, step};
