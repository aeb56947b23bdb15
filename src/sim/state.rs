//! Game state and core simulation types
//!
//! `GameState` is the aggregate root: it owns the configuration, the seeded
//! RNG, and every entity. Entities only know how to move and take hits; the
//! rules that tie them together live in `tick` and `powerup`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Rect;
use super::collision::ball_past_bottom;
use super::grid::generate_level;
use super::powerup::TimedEffect;
use crate::config::{ConfigError, FieldConfig, GameConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command (new game, new life, new level)
    Prepare,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; only restart is honored
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Prepare => "prepare",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Something that happened during a tick (for sound/particle hooks and logs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    Paused,
    Resumed,
    Restarted,
    PaddleHit { ball_id: u32 },
    /// A brick absorbed a hit without breaking
    BrickHit { brick_id: u32, kind: BrickKind },
    BrickDestroyed { brick_id: u32, kind: BrickKind, points: u64 },
    GiftSpawned { gift_id: u32, kind: GiftKind },
    GiftCaught { gift_id: u32, kind: GiftKind },
    ShotFired,
    /// The floor bounced a ball back into play
    FloorSave { ball_id: u32 },
    FloorExpired,
    GunsExpired,
    BallLost { ball_id: u32 },
    LifeLost { lives_left: u32 },
    LevelCleared { level: u32 },
    GameOver { score: u64 },
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A fresh ball at the spawn point with the configured launch velocity
    pub fn new(id: u32, config: &GameConfig) -> Self {
        Self {
            id,
            pos: Vec2::new(
                config.field.width / 2.0,
                config.field.height - config.ball.spawn_height,
            ),
            vel: Vec2::new(config.ball.start_dx, config.ball.start_dy),
            radius: config.ball.radius,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// Move one tick and bounce off the side and top walls
    ///
    /// Each wall only ever turns the ball away from itself, so a ball that is
    /// still overlapping a wall on the next tick cannot get stuck flipping.
    pub fn advance(&mut self, field: &FieldConfig) {
        self.pos += self.vel;

        if self.pos.x - self.radius < 0.0 {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + self.radius > field.width {
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y - self.radius < 0.0 {
            self.vel.y = self.vel.y.abs();
        }
    }

    pub fn past_bottom(&self, field: &FieldConfig) -> bool {
        ball_past_bottom(self.pos, self.radius, field.height)
    }

    /// Floor save: send the ball back up
    pub fn bounce_off_floor(&mut self) {
        self.vel.y = -self.vel.y.abs();
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Pixels per tick
    pub speed: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Shooting capability
    pub guns: TimedEffect,
    /// Timestamp (ms) of the last volley
    pub last_shot_at: Option<u64>,
}

impl Paddle {
    /// Centered paddle resting just above the field bottom
    pub fn new(config: &GameConfig) -> Self {
        let width = config.paddle.width;
        Self {
            rect: Rect::new(
                (config.field.width - width) / 2.0,
                config.paddle_y(),
                width,
                config.paddle.height,
            ),
            speed: config.paddle.speed,
            moving_left: false,
            moving_right: false,
            guns: TimedEffect::default(),
            last_shot_at: None,
        }
    }

    /// Apply movement intent, clamped to the field
    pub fn advance(&mut self, field_width: f32) {
        let mut x = self.rect.pos.x;
        if self.moving_left {
            x -= self.speed;
        }
        if self.moving_right {
            x += self.speed;
        }
        let max_x = (field_width - self.rect.width()).max(0.0);
        self.rect.pos.x = x.clamp(0.0, max_x);
    }

    /// Guns are active and the inter-shot delay has elapsed
    pub fn can_shoot(&self, now_ms: u64, shoot_delay_ms: u64) -> bool {
        self.guns.is_active()
            && self
                .last_shot_at
                .is_none_or(|last| now_ms.saturating_sub(last) >= shoot_delay_ms)
    }

    /// Spawn points of the two guns (a quarter in from each edge, at the top)
    pub fn muzzles(&self) -> [Vec2; 2] {
        let x = self.rect.left();
        let w = self.rect.width();
        let y = self.rect.top();
        [Vec2::new(x + w / 4.0, y), Vec2::new(x + w * 3.0 / 4.0, y)]
    }
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Breakable,
    MultiHit,
    /// Cannot be destroyed, doesn't count for level clear
    Unbreakable,
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub kind: BrickKind,
    pub hits: u8,
    pub rect: Rect,
    /// Gift released on destruction, fixed at creation
    pub gift: Option<GiftKind>,
}

impl Brick {
    /// Take one hit; returns true when this hit destroyed the brick
    pub fn hit(&mut self) -> bool {
        if self.kind == BrickKind::Unbreakable || self.hits == 0 {
            return false;
        }
        self.hits -= 1;
        self.hits == 0
    }

    /// Returns true if this brick must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        self.kind != BrickKind::Unbreakable
    }

    /// Score for destroying this brick
    pub fn points(&self, config: &GameConfig) -> u64 {
        match self.kind {
            BrickKind::Breakable => config.bricks.breakable_points,
            BrickKind::MultiHit => config.bricks.multi_hit_points,
            BrickKind::Unbreakable => 0,
        }
    }
}

/// Gift (power-up) types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GiftKind {
    Points,
    Life,
    Floor,
    Split,
    Guns,
}

impl GiftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiftKind::Points => "points",
            GiftKind::Life => "life",
            GiftKind::Floor => "floor",
            GiftKind::Split => "split",
            GiftKind::Guns => "guns",
        }
    }
}

/// A falling gift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub id: u32,
    pub kind: GiftKind,
    pub rect: Rect,
    /// Fall direction, radians from straight down (positive drifts right)
    pub angle: f32,
    pub speed: f32,
    /// Points or lives granted; 0 for other kinds
    pub value: u64,
}

impl Gift {
    pub fn advance(&mut self) {
        self.rect.pos.x += self.angle.sin() * self.speed;
        self.rect.pos.y += self.angle.cos() * self.speed;
    }

    pub fn below_field(&self, field: &FieldConfig) -> bool {
        self.rect.top() > field.height
    }
}

/// A paddle gun projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    pub speed: f32,
}

impl Projectile {
    /// Move upward; returns false once it has left the top of the field
    pub fn advance(&mut self) -> bool {
        self.rect.pos.y -= self.speed;
        self.rect.top() > 0.0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub gifts: Vec<Gift>,
    pub projectiles: Vec<Projectile>,
    /// Reflective bottom boundary
    pub floor: TimedEffect,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new game: validates the config, builds level 1, waits in Prepare
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let paddle = Paddle::new(&config);
        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            lives: 0,
            score: 0,
            phase: GamePhase::Prepare,
            paddle,
            balls: Vec::new(),
            bricks: Vec::new(),
            gifts: Vec::new(),
            projectiles: Vec::new(),
            floor: TimedEffect::default(),
            time_ticks: 0,
            next_id: 1,
        };
        state.reset();
        Ok(state)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Full restart: score, lives and level back to their starting values
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level = 1;
        self.reset_level();
        log::info!("New game (seed {})", self.seed);
    }

    /// Fresh grid, paddle and ball for the current level; keeps score/lives/level
    pub fn reset_level(&mut self) {
        self.paddle = Paddle::new(&self.config);
        self.balls.clear();
        self.gifts.clear();
        self.projectiles.clear();
        self.floor = TimedEffect::default();
        self.spawn_ball();
        generate_level(self);
        self.phase = GamePhase::Prepare;
    }

    /// Spawn a ball at the serve position
    pub fn spawn_ball(&mut self) {
        let id = self.next_entity_id();
        let ball = Ball::new(id, &self.config);
        self.balls.push(ball);
    }

    /// Number of bricks that still block the level clear
    pub fn clearable_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.counts_for_clear()).count()
    }

    pub fn is_level_clear(&self) -> bool {
        self.clearable_bricks() == 0
    }

    pub fn floor_active(&self) -> bool {
        self.floor.is_active()
    }

    pub fn guns_active(&self) -> bool {
        self.paddle.guns.is_active()
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.bricks.sort_by_key(|b| b.id);
        self.gifts.sort_by_key(|g| g.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
