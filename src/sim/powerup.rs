//! Power-up lifecycle: gift rolls, catch effects, and timed expiry
//!
//! Timed effects store an absolute expiry timestamp and are checked once per
//! tick; there are no timers. Catching a timed gift that is already active
//! replaces the expiry rather than extending it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, GameEvent, GameState, Gift, GiftKind};
use crate::config::GiftConfig;

/// A power-up that stays on until an absolute timestamp (ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    expires_at: Option<u64>,
}

impl TimedEffect {
    /// Turn on (or re-arm) until `now + duration`
    pub fn activate(&mut self, now_ms: u64, duration_ms: u64) {
        self.expires_at = Some(now_ms.saturating_add(duration_ms));
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    /// Switch off once `now` has reached the expiry; returns true on that tick
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(at) if now_ms >= at => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Decide at brick creation whether it carries a gift, and which one
///
/// A drop roll against `drop_chance`, then a weighted pick. Weights are
/// relative; zero-weight kinds are never picked.
pub fn roll_gift<R: Rng>(rng: &mut R, config: &GiftConfig) -> Option<GiftKind> {
    if rng.random::<f32>() >= config.drop_chance {
        return None;
    }

    let entries = config.weights.entries();
    let total = config.weights.total();
    let mut roll = rng.random::<f32>() * total;
    for (kind, weight) in entries {
        if weight <= 0.0 {
            continue;
        }
        if roll < weight {
            return Some(kind);
        }
        roll -= weight;
    }

    // Rounding at the top of the range lands on the last weighted kind
    entries
        .iter()
        .rev()
        .find(|(_, w)| *w > 0.0)
        .map(|(kind, _)| *kind)
}

/// Two velocities rotated ±`angle` from `vel`, same speed
pub fn split_velocities(vel: Vec2, angle: f32) -> [Vec2; 2] {
    [
        Vec2::from_angle(-angle).rotate(vel),
        Vec2::from_angle(angle).rotate(vel),
    ]
}

/// Split a uniformly chosen ball into itself plus two children
///
/// Returns the number of balls added.
pub fn split_random_ball(state: &mut GameState) -> usize {
    if state.balls.is_empty() {
        return 0;
    }
    let index = state.rng.random_range(0..state.balls.len());
    let parent = state.balls[index].clone();
    let angle = state.config().gifts.split_angle_deg.to_radians();

    for vel in split_velocities(parent.vel, angle) {
        let id = state.next_entity_id();
        state.balls.push(Ball {
            id,
            pos: parent.pos,
            vel,
            radius: parent.radius,
        });
    }
    log::debug!("Ball {} split ({} balls in play)", parent.id, state.balls.len());
    2
}

/// Apply a caught gift's effect
pub fn apply_gift(state: &mut GameState, gift: &Gift, now_ms: u64, events: &mut Vec<GameEvent>) {
    match gift.kind {
        GiftKind::Points => {
            state.score += gift.value;
        }
        GiftKind::Life => {
            let lives = u32::try_from(gift.value).unwrap_or(u32::MAX);
            state.lives = state.lives.saturating_add(lives);
        }
        GiftKind::Floor => {
            let duration = state.config().gifts.floor_duration_ms;
            state.floor.activate(now_ms, duration);
        }
        GiftKind::Split => {
            split_random_ball(state);
        }
        GiftKind::Guns => {
            let duration = state.config().gifts.guns_duration_ms;
            state.paddle.guns.activate(now_ms, duration);
        }
    }
    log::debug!("Caught {} gift", gift.kind.as_str());
    events.push(GameEvent::GiftCaught {
        gift_id: gift.id,
        kind: gift.kind,
    });
}

/// Switch off timed effects whose expiry has been reached
pub fn expire_effects(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    if state.floor.expire(now_ms) {
        events.push(GameEvent::FloorExpired);
    }
    if state.paddle.guns.expire(now_ms) {
        state.paddle.last_shot_at = None;
        events.push(GameEvent::GunsExpired);
    }
}
