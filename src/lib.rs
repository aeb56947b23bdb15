//! Breakout - a deterministic brick breaker simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, power-ups, game state)
//! - `config`: Immutable, data-driven game balance
//! - `input`: Keyboard adapter producing per-tick commands
//! - `view`: Read-only per-frame snapshot handed to a presenter
//! - `driver`: One update + present pass per animation frame

pub mod config;
pub mod driver;
pub mod input;
pub mod sim;
pub mod view;

pub use config::{ConfigError, GameConfig};
pub use driver::{FrameDriver, NullPresenter, Presenter};
pub use input::{InputState, Key, KeyEvent};
pub use view::Snapshot;

/// Default configuration constants (canvas pixels, per-frame speeds, milliseconds)
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Gap between paddle bottom and field bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_DX: f32 = 3.0;
    pub const BALL_START_DY: f32 = -3.0;
    /// Ball spawns this far above the field bottom
    pub const BALL_SPAWN_HEIGHT: f32 = 30.0;
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLS: u32 = 8;
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_TOP_OFFSET: f32 = 50.0;

    /// Gift defaults
    pub const GIFT_SIZE: f32 = 20.0;
    pub const GIFT_SPEED: f32 = 2.0;
    pub const GIFT_DROP_CHANCE: f32 = 0.2;
    pub const GIFT_MAX_DRIFT_DEG: f32 = 45.0;
    pub const TIMED_GIFT_DURATION_MS: u64 = 10_000;
    pub const GUN_SHOOT_DELAY_MS: u64 = 100;
    pub const SPLIT_ANGLE_DEG: f32 = 30.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;

    /// Bookkeeping defaults
    pub const STARTING_LIVES: u32 = 3;
}
