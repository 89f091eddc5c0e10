//! Per-frame simulation step
//!
//! `step` maps the previous state and this frame's input to the next state.
//! It is total: any elapsed time (zero, negative, huge) is integrated as-is.

use glam::Vec2;

use super::collision::{
    above_ceiling, below_floor, out_of_bounds, past_left_edge, past_right_edge, within_paddle,
};
use super::input::Input;
use super::state::{Ball, GamePhase, GameState, MovingBody, Player};
use crate::consts::*;

/// Advance the game by one frame
pub fn step(state: GameState, input: &Input) -> GameState {
    let GameState {
        keys_held,
        phase,
        ball,
        player1,
        player2,
    } = state;

    // Both sides are evaluated independently
    let score1 = u32::from(past_right_edge(&ball));
    let score2 = u32::from(past_left_edge(&ball));

    let next_phase = if input.request_start {
        GamePhase::Playing
    } else if score1 != score2 {
        GamePhase::Paused
    } else {
        phase
    };

    // Freeze decision uses the phase we entered the frame with
    let next_ball = match phase {
        GamePhase::Paused => ball,
        GamePhase::Playing => advance_ball(input.elapsed_ms, ball, &player1, &player2),
    };

    GameState {
        keys_held,
        phase: next_phase,
        ball: next_ball,
        player1: advance_player(input.elapsed_ms, input.paddle1_dir, score1, player1),
        player2: advance_player(input.elapsed_ms, input.paddle2_dir, score2, player2),
    }
}

/// Bounce and move the ball, or put it back on the center spot once it has
/// left the field
///
/// The velocity survives a reset untouched.
pub fn advance_ball(elapsed_ms: f32, ball: Ball, player1: &Player, player2: &Player) -> Ball {
    if out_of_bounds(&ball) {
        return Ball {
            pos: Vec2::ZERO,
            ..ball
        };
    }

    let vx = if within_paddle(&ball, player1) {
        ball.vel.x.abs()
    } else if within_paddle(&ball, player2) {
        -ball.vel.x.abs()
    } else {
        ball.vel.x
    };

    let vy = if below_floor(&ball) {
        ball.vel.y.abs()
    } else if above_ceiling(&ball) {
        -ball.vel.y.abs()
    } else {
        ball.vel.y
    };

    Ball {
        vel: Vec2::new(vx, vy),
        ..ball
    }
    .integrate(elapsed_ms)
}

/// Move a paddle at fixed speed in `dir`, keep it on the board, and add
/// any points won this frame
pub fn advance_player(elapsed_ms: f32, dir: i8, points_scored: u32, player: Player) -> Player {
    let moved = Player {
        vel: Vec2::new(player.vel.x, f32::from(dir) * PADDLE_SPEED),
        ..player
    }
    .integrate(elapsed_ms);

    let limit = HALF_HEIGHT - PADDLE_CLAMP_MARGIN;
    Player {
        pos: Vec2::new(moved.pos.x, moved.pos.y.clamp(-limit, limit)),
        score: player.score + points_scored,
        ..moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::derive_input;
    use crate::sim::state::KeysHeld;
    use proptest::prelude::*;

    fn playing() -> GameState {
        GameState {
            phase: GamePhase::Playing,
            ..GameState::new()
        }
    }

    fn input(elapsed_ms: f32) -> Input {
        Input {
            elapsed_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_left_paddle_bounce() {
        let player1 = Player::left();
        let player2 = Player::right();
        let ball = Ball::new(Vec2::new(player1.pos.x, 0.0), Vec2::new(-200.0, 0.0));

        let next = advance_ball(16.0, ball, &player1, &player2);
        assert_eq!(next.vel.x, 200.0);
        assert!(next.pos.x > ball.pos.x);
    }

    #[test]
    fn test_right_paddle_bounce() {
        let player1 = Player::left();
        let player2 = Player::right();
        let ball = Ball::new(Vec2::new(275.0, 10.0), Vec2::new(200.0, 50.0));

        let next = advance_ball(16.0, ball, &player1, &player2);
        assert_eq!(next.vel.x, -200.0);
        assert_eq!(next.vel.y, 50.0);
    }

    #[test]
    fn test_left_paddle_wins_overlap() {
        // Both paddles stacked on the same spot
        let player1 = Player::at(0.0);
        let player2 = Player::at(0.0);
        let ball = Ball::new(Vec2::ZERO, Vec2::new(-200.0, 0.0));

        let next = advance_ball(0.0, ball, &player1, &player2);
        assert_eq!(next.vel.x, 200.0);
    }

    #[test]
    fn test_ceiling_bounce() {
        let ball = Ball::new(Vec2::new(0.0, HALF_HEIGHT - 5.0), Vec2::new(200.0, 200.0));
        let next = advance_ball(16.0, ball, &Player::left(), &Player::right());
        assert_eq!(next.vel.y, -200.0);
        assert_eq!(next.vel.x, 200.0);
        // Moved with the bounced velocity in the same frame
        assert!(next.pos.y < ball.pos.y);
    }

    #[test]
    fn test_floor_bounce() {
        let ball = Ball::new(Vec2::new(0.0, 6.0 - HALF_HEIGHT), Vec2::new(200.0, -150.0));
        let next = advance_ball(16.0, ball, &Player::left(), &Player::right());
        assert_eq!(next.vel.y, 150.0);
    }

    #[test]
    fn test_reset_on_exit_keeps_velocity() {
        let ball = Ball::new(Vec2::new(HALF_WIDTH + 50.0, 42.0), Vec2::new(200.0, -200.0));
        let next = advance_ball(16.0, ball, &Player::left(), &Player::right());
        assert_eq!(next.pos, Vec2::ZERO);
        assert_eq!(next.vel, ball.vel);
    }

    #[test]
    fn test_score_accumulation_pauses() {
        let mut state = playing();
        state.player1.score = 3;
        state.player2.score = 1;
        state.ball.pos = Vec2::new(HALF_WIDTH + 1.0, 0.0);

        let next = step(state, &input(16.0));
        assert_eq!(next.player1.score, 4);
        assert_eq!(next.player2.score, 1);
        assert_eq!(next.phase, GamePhase::Paused);
        // Ball entered the frame in play, so it was reset
        assert_eq!(next.ball.pos, Vec2::ZERO);
    }

    #[test]
    fn test_score_for_player_two() {
        let mut state = playing();
        state.ball.pos = Vec2::new(-HALF_WIDTH - 3.0, 50.0);

        let next = step(state, &input(16.0));
        assert_eq!(next.player1.score, 0);
        assert_eq!(next.player2.score, 1);
        assert_eq!(next.phase, GamePhase::Paused);
    }

    #[test]
    fn test_serve_overrides_score_pause() {
        let mut state = playing();
        state.ball.pos = Vec2::new(HALF_WIDTH + 1.0, 0.0);
        let serve = Input {
            request_start: true,
            elapsed_ms: 16.0,
            ..Default::default()
        };

        let next = step(state, &serve);
        assert_eq!(next.phase, GamePhase::Playing);
        assert_eq!(next.player1.score, 1);
    }

    #[test]
    fn test_paused_ball_counts_points_while_frozen() {
        let mut state = GameState::new();
        state.ball.pos = Vec2::new(HALF_WIDTH + 10.0, 0.0);

        let next = step(state.clone(), &input(16.0));
        assert_eq!(next.ball, state.ball);
        assert_eq!(next.player1.score, 1);
        assert_eq!(next.phase, GamePhase::Paused);
    }

    #[test]
    fn test_pause_freezes_ball() {
        let state = GameState::new();
        let before = state.ball;
        let next = step(state, &input(123_456.0));
        assert_eq!(next.ball, before);
        assert_eq!(next.phase, GamePhase::Paused);
    }

    #[test]
    fn test_serve_uses_previous_phase_for_freeze() {
        // Pressing serve flips the phase, but the ball stays put this frame
        let state = GameState::new();
        let serve = Input {
            request_start: true,
            elapsed_ms: 16.0,
            ..Default::default()
        };
        let next = step(state, &serve);
        assert_eq!(next.phase, GamePhase::Playing);
        assert_eq!(next.ball.pos, Vec2::ZERO);
    }

    #[test]
    fn test_paddle_clamp() {
        let top = advance_player(100_000.0, 1, 0, Player::left());
        assert_eq!(top.pos.y, HALF_HEIGHT - 22.0);
        assert_eq!(top.vel.y, 200.0);

        let bottom = advance_player(100_000.0, -1, 0, Player::right());
        assert_eq!(bottom.pos.y, 22.0 - HALF_HEIGHT);
        assert_eq!(bottom.pos.x, HALF_WIDTH - 20.0);
    }

    #[test]
    fn test_paddle_velocity_snaps_to_input() {
        let moving = Player {
            vel: Vec2::new(0.0, 200.0),
            ..Player::left()
        };
        let stopped = advance_player(16.0, 0, 0, moving);
        assert_eq!(stopped.vel.y, 0.0);
        assert_eq!(stopped.pos.y, 0.0);
    }

    #[test]
    fn test_players_update_simultaneously() {
        let mut state = playing();
        state.player1.pos.y = 50.0;
        state.player2.pos.y = -50.0;
        let moves = Input {
            paddle1_dir: 1,
            paddle2_dir: -1,
            elapsed_ms: 100.0,
            ..Default::default()
        };

        let next = step(state, &moves);
        assert!((next.player1.pos.y - 70.0).abs() < 1e-4);
        assert!((next.player2.pos.y + 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_step_carries_keys_held() {
        let mut state = GameState::new();
        state.keys_held.press("w");
        state.keys_held.press("Shift");
        let expected = state.keys_held.clone();

        let next = step(state, &input(16.0));
        assert_eq!(next.keys_held, expected);
    }

    #[test]
    fn test_serve_from_initial_state() {
        let keys: KeysHeld = [" "].into_iter().collect();
        let state = GameState {
            keys_held: keys,
            ..GameState::new()
        };

        let input = derive_input(&state.keys_held, 16.0);
        let served = step(state, &input);
        assert_eq!(served.phase, GamePhase::Playing);
        // The serve tick itself leaves the ball still (it entered paused)
        assert_eq!(served.ball.pos, Vec2::ZERO);

        // First frame in play moves the ball by 200 * 16 / 1000
        let input = derive_input(&served.keys_held, 16.0);
        let next = step(served, &input);
        assert!((next.ball.pos.x - 3.2).abs() < 1e-4);
        assert!((next.ball.pos.y - 3.2).abs() < 1e-4);
        assert_eq!(next.phase, GamePhase::Playing);
    }

    #[test]
    fn test_zero_and_negative_elapsed() {
        let state = playing();
        let still = step(state.clone(), &input(0.0));
        assert_eq!(still.ball.pos, Vec2::ZERO);

        let back = step(state, &input(-1000.0));
        assert_eq!(back.ball.pos, Vec2::new(-200.0, -200.0));
    }

    proptest! {
        #[test]
        fn prop_velocity_sign_kept_without_bounce(
            x in -260.0f32..260.0,
            y in -190.0f32..190.0,
            vx in -400.0f32..400.0,
            vy in -400.0f32..400.0,
            elapsed_ms in 0.0f32..100.0,
        ) {
            let player1 = Player::left();
            let player2 = Player::right();
            let ball = Ball::new(Vec2::new(x, y), Vec2::new(vx, vy));
            prop_assume!(!within_paddle(&ball, &player1) && !within_paddle(&ball, &player2));
            prop_assume!(!below_floor(&ball) && !above_ceiling(&ball));

            let next = advance_ball(elapsed_ms, ball, &player1, &player2);
            prop_assert_eq!(next.vel, ball.vel);
        }

        #[test]
        fn prop_paddle_stays_on_board(
            y in -178.0f32..178.0,
            dir in -1i8..=1,
            elapsed_ms in 0.0f32..1_000_000.0,
        ) {
            let player = Player { pos: Vec2::new(-280.0, y), ..Player::left() };
            let next = advance_player(elapsed_ms, dir, 0, player);
            prop_assert!(next.pos.y.abs() <= HALF_HEIGHT - PADDLE_CLAMP_MARGIN);
            prop_assert_eq!(next.pos.x, player.pos.x);
        }

        #[test]
        fn prop_paused_ball_is_frozen(
            x in -600.0f32..600.0,
            y in -200.0f32..200.0,
            elapsed_ms in -10_000.0f32..10_000.0,
        ) {
            let mut state = GameState::new();
            state.ball.pos = Vec2::new(x, y);
            let before = state.ball;
            let next = step(state, &input(elapsed_ms));
            prop_assert_eq!(next.ball, before);
        }
    }
}
