//! Demo-mode player
//!
//! Produces the same `TickInput` a keyboard would, so a game driven by the
//! autopilot goes through exactly the same rules as a human one.

use super::state::{Ball, GamePhase, GameState};
use super::tick::TickInput;

/// Pick inputs for the next tick
///
/// Serves immediately, tracks the most urgent descending ball, and goes for
/// falling gifts when every ball is safely on its way up.
pub fn autopilot_input(state: &GameState, now_ms: u64) -> TickInput {
    let mut input = TickInput::default();

    match state.phase {
        GamePhase::Prepare => {
            input.launch = true;
            return input;
        }
        GamePhase::Playing => {}
        GamePhase::Paused | GamePhase::GameOver => return input,
    }

    let field = &state.config().field;
    let paddle = &state.paddle;

    // The descending ball closest to the paddle is the one to save
    let threat = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let all_safe = state
        .balls
        .iter()
        .all(|b| b.vel.y < 0.0 || b.pos.y < field.height / 2.0);

    let target_x = if all_safe && !state.gifts.is_empty() {
        state
            .gifts
            .iter()
            .max_by(|a, b| a.rect.pos.y.total_cmp(&b.rect.pos.y))
            .map(|g| g.rect.center().x)
    } else {
        threat.or_else(|| lowest_ball(&state.balls)).map(|ball| {
            // Oscillating offset so rallies don't settle into a loop
            let time_factor = state.time_ticks as f32 * 0.01;
            let offset = (time_factor.sin() * 0.3) + (time_factor * 0.7).sin() * 0.15;
            ball.pos.x + offset * paddle.rect.width() / 2.0
        })
    };

    if let Some(target) = target_x {
        let center = paddle.rect.center().x;
        let deadzone = paddle.speed;
        input.move_left = target < center - deadzone;
        input.move_right = target > center + deadzone;
    }

    input.shoot = paddle.can_shoot(now_ms, state.config().gifts.shoot_delay_ms);
    input
}

fn lowest_ball(balls: &[Ball]) -> Option<&Ball> {
    balls.iter().max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
}
