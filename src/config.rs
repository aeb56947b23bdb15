//! Game configuration
//!
//! A single immutable value built once at startup, validated, and then owned
//! by [`GameState`](crate::sim::GameState). Every section uses
//! `#[serde(default)]` so a JSON file only needs the keys it overrides.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::GiftKind;

/// Play field bounds (origin top-left, +y down)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per tick while a direction is held
    pub speed: f32,
    pub bottom_margin: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            bottom_margin: PADDLE_BOTTOM_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub start_dx: f32,
    pub start_dy: f32,
    /// Distance between the spawn point and the field bottom
    pub spawn_height: f32,
    /// Deflection at the paddle edges, degrees
    pub max_bounce_angle_deg: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            start_dx: BALL_START_DX,
            start_dy: BALL_START_DY,
            spawn_height: BALL_SPAWN_HEIGHT,
            max_bounce_angle_deg: MAX_BOUNCE_ANGLE_DEG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub rows: u32,
    pub cols: u32,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub top_offset: f32,
    /// Chance that a brick is unbreakable
    pub unbreakable_chance: f32,
    /// Chance that a non-unbreakable brick is multi-hit (second, independent roll)
    pub multi_hit_chance: f32,
    pub multi_hit_min: u8,
    pub multi_hit_max: u8,
    pub breakable_points: u64,
    pub multi_hit_points: u64,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            cols: BRICK_COLS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            top_offset: BRICK_TOP_OFFSET,
            unbreakable_chance: 0.1,
            multi_hit_chance: 0.2,
            multi_hit_min: 2,
            multi_hit_max: 4,
            breakable_points: 1,
            multi_hit_points: 5,
        }
    }
}

impl BrickConfig {
    /// Horizontal span of a full row, trailing padding included
    pub fn grid_width(&self) -> f32 {
        self.cols as f32 * (self.width + self.padding)
    }

    /// Y coordinate of the bottom edge of the last row
    pub fn grid_bottom(&self) -> f32 {
        self.top_offset + self.rows as f32 * (self.height + self.padding) - self.padding
    }
}

/// Relative gift weights; they do not need to sum to 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftWeights {
    pub points: f32,
    pub life: f32,
    pub floor: f32,
    pub split: f32,
    pub guns: f32,
}

impl Default for GiftWeights {
    fn default() -> Self {
        Self {
            points: 0.3,
            life: 0.1,
            floor: 0.2,
            split: 0.2,
            guns: 0.2,
        }
    }
}

impl GiftWeights {
    /// Weights in selection order
    pub fn entries(&self) -> [(GiftKind, f32); 5] {
        [
            (GiftKind::Points, self.points),
            (GiftKind::Life, self.life),
            (GiftKind::Floor, self.floor),
            (GiftKind::Split, self.split),
            (GiftKind::Guns, self.guns),
        ]
    }

    pub fn total(&self) -> f32 {
        self.entries().iter().map(|(_, w)| w).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Chance that a destructible brick carries a gift
    pub drop_chance: f32,
    /// Fall direction is picked within ± this many degrees of straight down
    pub max_drift_deg: f32,
    pub weights: GiftWeights,
    pub points_value: u64,
    pub life_value: u32,
    pub floor_duration_ms: u64,
    pub guns_duration_ms: u64,
    pub shoot_delay_ms: u64,
    pub split_angle_deg: f32,
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self {
            width: GIFT_SIZE,
            height: GIFT_SIZE,
            speed: GIFT_SPEED,
            drop_chance: GIFT_DROP_CHANCE,
            max_drift_deg: GIFT_MAX_DRIFT_DEG,
            weights: GiftWeights::default(),
            points_value: 10,
            life_value: 1,
            floor_duration_ms: TIMED_GIFT_DURATION_MS,
            guns_duration_ms: TIMED_GIFT_DURATION_MS,
            shoot_delay_ms: GUN_SHOOT_DELAY_MS,
            split_angle_deg: SPLIT_ANGLE_DEG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub gifts: GiftConfig,
    pub projectiles: ProjectileConfig,
    pub starting_lives: u32,
    /// Lives granted when a level is cleared
    pub level_bonus_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bricks: BrickConfig::default(),
            gifts: GiftConfig::default(),
            projectiles: ProjectileConfig::default(),
            starting_lives: STARTING_LIVES,
            level_bonus_lives: 1,
        }
    }
}

impl GameConfig {
    /// Flat-canvas rule set: only points/life gifts, falling straight down,
    /// and a denser mix of unbreakable and multi-hit bricks.
    pub fn classic() -> Self {
        let mut config = Self::default();
        config.ball.radius = 10.0;
        config.bricks.unbreakable_chance = 0.2;
        config.bricks.multi_hit_chance = 0.5;
        config.gifts.max_drift_deg = 0.0;
        config.gifts.weights = GiftWeights {
            points: 0.5,
            life: 0.5,
            floor: 0.0,
            split: 0.0,
            guns: 0.0,
        };
        config
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Paddle top edge
    pub fn paddle_y(&self) -> f32 {
        self.field.height - self.paddle.height - self.paddle.bottom_margin
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field.width", self.field.width)?;
        positive("field.height", self.field.height)?;
        positive("paddle.width", self.paddle.width)?;
        positive("paddle.height", self.paddle.height)?;
        positive("paddle.speed", self.paddle.speed)?;
        positive("ball.radius", self.ball.radius)?;
        positive("bricks.width", self.bricks.width)?;
        positive("bricks.height", self.bricks.height)?;
        positive("gifts.width", self.gifts.width)?;
        positive("gifts.height", self.gifts.height)?;
        positive("gifts.speed", self.gifts.speed)?;
        positive("projectiles.width", self.projectiles.width)?;
        positive("projectiles.height", self.projectiles.height)?;
        positive("projectiles.speed", self.projectiles.speed)?;

        non_negative("paddle.bottom_margin", self.paddle.bottom_margin)?;
        non_negative("bricks.padding", self.bricks.padding)?;
        non_negative("bricks.top_offset", self.bricks.top_offset)?;

        // The served ball must start fully inside the field
        let spawn = self.ball.spawn_height;
        if !(spawn > self.ball.radius && spawn <= self.field.height - self.ball.radius) {
            return Err(ConfigError::SpawnOutsideField {
                spawn_height: spawn,
                radius: self.ball.radius,
                field_height: self.field.height,
            });
        }

        let start_speed = (self.ball.start_dx.powi(2) + self.ball.start_dy.powi(2)).sqrt();
        positive("ball start speed", start_speed)?;

        if self.paddle.width > self.field.width {
            return Err(ConfigError::PaddleTooWide {
                paddle_width: self.paddle.width,
                field_width: self.field.width,
            });
        }

        probability("bricks.unbreakable_chance", self.bricks.unbreakable_chance)?;
        probability("bricks.multi_hit_chance", self.bricks.multi_hit_chance)?;
        probability("gifts.drop_chance", self.gifts.drop_chance)?;

        if self.bricks.rows == 0 || self.bricks.cols == 0 {
            return Err(ConfigError::EmptyBrickGrid);
        }
        if self.bricks.grid_width() > self.field.width {
            return Err(ConfigError::GridTooWide {
                grid_width: self.bricks.grid_width(),
                field_width: self.field.width,
            });
        }
        if self.bricks.grid_bottom() >= self.paddle_y() {
            return Err(ConfigError::GridOverlapsPaddle {
                grid_bottom: self.bricks.grid_bottom(),
                paddle_top: self.paddle_y(),
            });
        }
        if self.bricks.multi_hit_min < 2 || self.bricks.multi_hit_min > self.bricks.multi_hit_max {
            return Err(ConfigError::MultiHitRange {
                min: self.bricks.multi_hit_min,
                max: self.bricks.multi_hit_max,
            });
        }

        let weights = &self.gifts.weights;
        let any_negative = weights.entries().iter().any(|(_, w)| !(*w >= 0.0));
        if any_negative || !(weights.total() > 0.0) {
            return Err(ConfigError::GiftWeights);
        }

        if !(0.0..=90.0).contains(&self.gifts.max_drift_deg) {
            return Err(ConfigError::Angle {
                field: "gifts.max_drift_deg",
                value: self.gifts.max_drift_deg,
            });
        }
        if !(self.ball.max_bounce_angle_deg > 0.0 && self.ball.max_bounce_angle_deg < 90.0) {
            return Err(ConfigError::Angle {
                field: "ball.max_bounce_angle_deg",
                value: self.ball.max_bounce_angle_deg,
            });
        }

        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { field, value })
    }
}

/// Fatal configuration problems
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid JSON for [`GameConfig`]
    Parse(serde_json::Error),
    NonPositive { field: &'static str, value: f32 },
    Negative { field: &'static str, value: f32 },
    /// Served ball would start outside the field
    SpawnOutsideField { spawn_height: f32, radius: f32, field_height: f32 },
    Probability { field: &'static str, value: f32 },
    Angle { field: &'static str, value: f32 },
    PaddleTooWide { paddle_width: f32, field_width: f32 },
    EmptyBrickGrid,
    GridTooWide { grid_width: f32, field_width: f32 },
    GridOverlapsPaddle { grid_bottom: f32, paddle_top: f32 },
    MultiHitRange { min: u8, max: u8 },
    /// Gift weights are negative or all zero
    GiftWeights,
    NoLives,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "read config: {}", e),
            ConfigError::Parse(e) => write!(f, "parse config: {}", e),
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be > 0 (got {})", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must be >= 0 (got {})", field, value)
            }
            ConfigError::SpawnOutsideField {
                spawn_height,
                radius,
                field_height,
            } => write!(
                f,
                "ball.spawn_height {} must be within {}..={} so the ball starts inside the field",
                spawn_height,
                radius,
                field_height - radius
            ),
            ConfigError::Probability { field, value } => {
                write!(f, "{} must be within 0..=1 (got {})", field, value)
            }
            ConfigError::Angle { field, value } => {
                write!(f, "{} out of range (got {} degrees)", field, value)
            }
            ConfigError::PaddleTooWide {
                paddle_width,
                field_width,
            } => write!(
                f,
                "paddle width {} exceeds field width {}",
                paddle_width, field_width
            ),
            ConfigError::EmptyBrickGrid => write!(f, "brick grid has no rows or no columns"),
            ConfigError::GridTooWide {
                grid_width,
                field_width,
            } => write!(
                f,
                "brick grid width {} exceeds field width {}",
                grid_width, field_width
            ),
            ConfigError::GridOverlapsPaddle {
                grid_bottom,
                paddle_top,
            } => write!(
                f,
                "brick grid bottom {} reaches paddle top {}",
                grid_bottom, paddle_top
            ),
            ConfigError::MultiHitRange { min, max } => {
                write!(f, "invalid multi-hit range {}..={} (min must be >= 2)", min, max)
            }
            ConfigError::GiftWeights => {
                write!(f, "gift weights must be non-negative with a positive total")
            }
            ConfigError::NoLives => write!(f, "starting_lives must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::classic().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "starting_lives": 5, "bricks": { "rows": 2 } }"#)
                .unwrap();
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.bricks.rows, 2);
        assert_eq!(config.bricks.cols, BRICK_COLS);
        assert_eq!(config.field, FieldConfig::default());
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = GameConfig::default().to_json_pretty().unwrap();
        let parsed = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, GameConfig::default());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load_from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let mut config = GameConfig::default();
        config.bricks.cols = 0;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBrickGrid)));
    }

    #[test]
    fn test_gift_weights_rejected() {
        let mut config = GameConfig::default();
        config.gifts.weights = GiftWeights {
            points: 0.0,
            life: 0.0,
            floor: 0.0,
            split: 0.0,
            guns: 0.0,
        };
        assert!(matches!(config.validate(), Err(ConfigError::GiftWeights)));

        config.gifts.weights.points = 1.0;
        config.gifts.weights.life = -0.5;
        assert!(matches!(config.validate(), Err(ConfigError::GiftWeights)));
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let mut config = GameConfig::default();
        config.gifts.weights.points = 7.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_probability_and_dimension_checks() {
        let mut config = GameConfig::default();
        config.gifts.drop_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability { field: "gifts.drop_chance", .. })
        ));

        let mut config = GameConfig::default();
        config.ball.radius = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "ball.radius", .. })
        ));

        let mut config = GameConfig::default();
        config.bricks.cols = 20;
        assert!(matches!(config.validate(), Err(ConfigError::GridTooWide { .. })));

        let mut config = GameConfig::default();
        config.bricks.multi_hit_min = 5;
        assert!(matches!(config.validate(), Err(ConfigError::MultiHitRange { .. })));

        let mut config = GameConfig::default();
        config.starting_lives = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoLives)));
    }

    #[test]
    fn test_spawn_height_keeps_ball_inside_field() {
        let mut config = GameConfig::default();
        config.ball.spawn_height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnOutsideField { .. })
        ));

        // Exactly one radius up still touches the bottom edge
        config.ball.spawn_height = config.ball.radius;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnOutsideField { .. })
        ));

        config.ball.spawn_height = config.field.height;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnOutsideField { .. })
        ));

        config.ball.spawn_height = config.ball.radius + 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_offsets_rejected() {
        let mut config = GameConfig::default();
        config.paddle.bottom_margin = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "paddle.bottom_margin", .. })
        ));

        let mut config = GameConfig::default();
        config.bricks.padding = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "bricks.padding", .. })
        ));

        let mut config = GameConfig::default();
        config.bricks.top_offset = -10.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "bricks.top_offset", .. })
        ));

        // Zero is a valid offset
        let mut config = GameConfig::default();
        config.paddle.bottom_margin = 0.0;
        config.bricks.padding = 0.0;
        config.bricks.top_offset = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ConfigError::NonPositive {
            field: "paddle.speed",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "paddle.speed must be > 0 (got 0)");
    }
}
