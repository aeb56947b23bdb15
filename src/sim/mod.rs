//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, speeds in pixels per tick
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! Wall-clock time enters only as the `now_ms` argument to [`tick`], for
//! timed power-ups and the gun cooldown.

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod grid;
pub mod powerup;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use body::{Body, EntityKind, Rect};
pub use collision::{
    ball_past_bottom, brick_bounce, circle_rect_overlap, paddle_bounce, reflect_velocity,
};
pub use grid::generate_level;
pub use powerup::{TimedEffect, apply_gift, expire_effects, roll_gift, split_velocities};
pub use state::{
    Ball, Brick, BrickKind, GameEvent, GamePhase, GameState, Gift, GiftKind, Paddle, Projectile,
};
pub use tick::{TickInput, tick};
