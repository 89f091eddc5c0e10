//! Hit tests for the ball against paddles, walls and goal lines
//!
//! All tests are inclusive at the boundary.

use super::state::{Ball, Player};
use crate::consts::*;

/// Whether the ball center lies inside the paddle's hit-box
pub fn within_paddle(ball: &Ball, player: &Player) -> bool {
    (ball.pos.x - player.pos.x).abs() <= HITBOX_HALF_WIDTH
        && (ball.pos.y - player.pos.y).abs() <= HITBOX_HALF_HEIGHT
}

/// Ball has dropped below the floor bounce line
#[inline]
pub fn below_floor(ball: &Ball) -> bool {
    ball.pos.y < BALL_WALL_MARGIN - HALF_HEIGHT
}

/// Ball has risen above the ceiling bounce line
#[inline]
pub fn above_ceiling(ball: &Ball) -> bool {
    ball.pos.y > HALF_HEIGHT - BALL_WALL_MARGIN
}

/// Ball has left the field past the right edge (point to player 1)
#[inline]
pub fn past_right_edge(ball: &Ball) -> bool {
    ball.pos.x > HALF_WIDTH
}

/// Ball has left the field past the left edge (point to player 2)
#[inline]
pub fn past_left_edge(ball: &Ball) -> bool {
    ball.pos.x < -HALF_WIDTH
}

/// Ball is outside the horizontal extent of the field
#[inline]
pub fn out_of_bounds(ball: &Ball) -> bool {
    ball.pos.x.abs() > HALF_WIDTH
}
