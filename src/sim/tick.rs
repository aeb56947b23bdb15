//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one animation frame.
//! Speeds are per tick; timed power-ups compare against the caller's clock.

use rand::Rng;

use super::body::Rect;
use super::collision::{brick_bounce, circle_rect_overlap, paddle_bounce};
use super::powerup::{apply_gift, expire_effects};
use super::state::{GameEvent, GamePhase, GameState, Gift, GiftKind, Projectile};

/// Input commands for a single tick
///
/// Movement flags are held state; the rest are one-shot commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Start play from Prepare
    pub launch: bool,
    /// Fire the paddle guns (Playing only)
    pub shoot: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
}

/// Advance the game state by one frame
///
/// `now_ms` is a monotonic wall-clock timestamp used only for timed
/// power-ups and the gun cooldown. Returns the events produced this tick.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.paddle.moving_left = input.move_left;
    state.paddle.moving_right = input.move_right;

    match state.phase {
        GamePhase::GameOver => {
            if input.restart {
                state.reset();
                events.push(GameEvent::Restarted);
            }
            return events;
        }
        GamePhase::Prepare => {
            if input.launch {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Launched);
            }
            return events;
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
            return events;
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
        }
    }

    state.time_ticks += 1;

    // Timed power-ups lapse before anything moves
    expire_effects(state, now_ms, &mut events);

    if input.shoot {
        fire_guns(state, now_ms, &mut events);
    }

    let field_width = state.config().field.width;
    state.paddle.advance(field_width);

    move_balls(state, &mut events);
    if state.balls.is_empty() {
        lose_life(state, &mut events);
        return events;
    }

    for gift in &mut state.gifts {
        gift.advance();
    }
    state.projectiles.retain_mut(|p| p.advance());

    let destroyed = resolve_ball_hits(state, &mut events);
    if destroyed > 0 && check_level_clear(state, &mut events) {
        return events;
    }

    catch_gifts(state, now_ms, &mut events);

    let destroyed = resolve_projectile_hits(state, &mut events);
    if destroyed > 0 && check_level_clear(state, &mut events) {
        return events;
    }

    // Ensure deterministic ordering
    state.normalize_order();
    events
}

/// Move every ball; the bottom edge either bounces (floor) or removes it
fn move_balls(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let field = state.config().field.clone();
    let floor = state.floor.is_active();

    state.balls.retain_mut(|ball| {
        ball.advance(&field);
        if !ball.past_bottom(&field) {
            return true;
        }
        if floor {
            if ball.vel.y > 0.0 {
                events.push(GameEvent::FloorSave { ball_id: ball.id });
            }
            ball.bounce_off_floor();
            true
        } else {
            events.push(GameEvent::BallLost { ball_id: ball.id });
            false
        }
    });
}

/// No balls left in play
fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over at level {} with score {}", state.level, state.score);
    } else {
        state.spawn_ball();
        state.phase = GamePhase::Prepare;
        log::info!("Ball lost, {} lives left", state.lives);
    }
}

/// Ball vs paddle, then ball vs every overlapping brick
///
/// A ball overlapping several bricks in the same tick hits all of them and
/// flips its vertical direction once per brick. Returns bricks destroyed.
fn resolve_ball_hits(state: &mut GameState, events: &mut Vec<GameEvent>) -> usize {
    let max_angle = state.config().ball.max_bounce_angle_deg.to_radians();
    let paddle = state.paddle.rect;
    let mut destroyed = 0;

    for ball_idx in 0..state.balls.len() {
        let ball = &mut state.balls[ball_idx];
        if circle_rect_overlap(ball.pos, ball.radius, &paddle) {
            ball.vel = paddle_bounce(ball.pos.x, ball.vel, &paddle, max_angle);
            events.push(GameEvent::PaddleHit { ball_id: ball.id });
        }

        let mut brick_idx = state.bricks.len();
        while brick_idx > 0 {
            brick_idx -= 1;
            let ball = &state.balls[ball_idx];
            if !circle_rect_overlap(ball.pos, ball.radius, &state.bricks[brick_idx].rect) {
                continue;
            }
            let ball = &mut state.balls[ball_idx];
            ball.vel = brick_bounce(ball.vel);
            if strike_brick(state, brick_idx, events) {
                destroyed += 1;
            }
        }
    }

    destroyed
}

/// Projectiles stop at the first brick they touch, breakable or not
fn resolve_projectile_hits(state: &mut GameState, events: &mut Vec<GameEvent>) -> usize {
    let mut destroyed = 0;

    let mut idx = state.projectiles.len();
    while idx > 0 {
        idx -= 1;
        let rect = state.projectiles[idx].rect;
        if let Some(brick_idx) = state.bricks.iter().rposition(|b| b.rect.intersects(&rect)) {
            state.projectiles.remove(idx);
            if strike_brick(state, brick_idx, events) {
                destroyed += 1;
            }
        }
    }

    destroyed
}

/// Apply one hit to a brick; on destruction remove it, score it, drop its gift
///
/// Returns true if the brick was destroyed by this hit.
fn strike_brick(state: &mut GameState, brick_idx: usize, events: &mut Vec<GameEvent>) -> bool {
    let brick = &mut state.bricks[brick_idx];
    if !brick.hit() {
        events.push(GameEvent::BrickHit {
            brick_id: brick.id,
            kind: brick.kind,
        });
        return false;
    }

    let brick = state.bricks.remove(brick_idx);
    let points = brick.points(state.config());
    state.score += points;
    events.push(GameEvent::BrickDestroyed {
        brick_id: brick.id,
        kind: brick.kind,
        points,
    });

    if let Some(kind) = brick.gift {
        spawn_gift(state, kind, &brick.rect, events);
    }
    true
}

/// Drop a gift from a destroyed brick's position
fn spawn_gift(state: &mut GameState, kind: GiftKind, from: &Rect, events: &mut Vec<GameEvent>) {
    let (width, height, speed, max_drift, value) = {
        let cfg = &state.config().gifts;
        let value = match kind {
            GiftKind::Points => cfg.points_value,
            GiftKind::Life => u64::from(cfg.life_value),
            _ => 0,
        };
        (
            cfg.width,
            cfg.height,
            cfg.speed,
            cfg.max_drift_deg.to_radians(),
            value,
        )
    };

    let angle = if max_drift > 0.0 {
        state.rng.random_range(-max_drift..max_drift)
    } else {
        0.0
    };

    let id = state.next_entity_id();
    state.gifts.push(Gift {
        id,
        kind,
        rect: Rect::new(from.pos.x, from.pos.y, width, height),
        angle,
        speed,
        value,
    });
    events.push(GameEvent::GiftSpawned { gift_id: id, kind });
}

/// Paddle catches overlapping gifts; gifts below the field are dropped
fn catch_gifts(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let paddle = state.paddle.rect;
    let field = state.config().field.clone();

    let mut caught = Vec::new();
    state.gifts.retain(|gift| {
        if gift.rect.intersects(&paddle) {
            caught.push(gift.clone());
            false
        } else {
            !gift.below_field(&field)
        }
    });

    for gift in caught {
        apply_gift(state, &gift, now_ms, events);
    }
}

/// Fire both guns if armed and off cooldown
fn fire_guns(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let delay = state.config().gifts.shoot_delay_ms;
    if !state.paddle.can_shoot(now_ms, delay) {
        return;
    }
    state.paddle.last_shot_at = Some(now_ms);

    let (width, height, speed) = {
        let cfg = &state.config().projectiles;
        (cfg.width, cfg.height, cfg.speed)
    };
    for muzzle in state.paddle.muzzles() {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            rect: Rect::new(muzzle.x - width / 2.0, muzzle.y - height, width, height),
            speed,
        });
    }
    events.push(GameEvent::ShotFired);
}

/// Advance to the next level when nothing clearable is left
fn check_level_clear(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.is_level_clear() {
        return false;
    }

    let cleared = state.level;
    state.level += 1;
    state.lives = state.lives.saturating_add(state.config().level_bonus_lives);
    events.push(GameEvent::LevelCleared { level: cleared });
    log::info!(
        "Level {} cleared (score {}, lives {})",
        cleared,
        state.score,
        state.lives
    );
    state.reset_level();
    true
}
