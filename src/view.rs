//! Read-only per-frame view of the game
//!
//! A `Snapshot` owns copies of everything a presenter needs, so drawing code
//! never holds a reference into the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Body, BrickKind, EntityKind, GamePhase, GameState, GiftKind, Rect};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrickView {
    pub id: u32,
    pub rect: Rect,
    pub kind: BrickKind,
    pub hits: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GiftView {
    pub id: u32,
    pub rect: Rect,
    pub kind: GiftKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub rect: Rect,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub balls: usize,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub field: Vec2,
    pub paddle: Rect,
    pub guns_active: bool,
    pub floor_active: bool,
    pub balls: Vec<BallView>,
    pub bricks: Vec<BrickView>,
    pub gifts: Vec<GiftView>,
    pub projectiles: Vec<ProjectileView>,
    pub hud: Hud,
    pub phase: GamePhase,
    /// Centered overlay text, top to bottom
    pub overlay: Vec<String>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let field = &state.config().field;
        Self {
            field: Vec2::new(field.width, field.height),
            paddle: state.paddle.rect,
            guns_active: state.guns_active(),
            floor_active: state.floor_active(),
            balls: state
                .balls
                .iter()
                .map(|b| BallView {
                    id: b.id,
                    center: b.pos,
                    radius: b.radius,
                })
                .collect(),
            bricks: state
                .bricks
                .iter()
                .map(|b| BrickView {
                    id: b.id,
                    rect: b.rect,
                    kind: b.kind,
                    hits: b.hits,
                })
                .collect(),
            gifts: state
                .gifts
                .iter()
                .map(|g| GiftView {
                    id: g.id,
                    rect: g.rect,
                    kind: g.kind,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    rect: p.rect,
                })
                .collect(),
            hud: Hud {
                score: state.score,
                lives: state.lives,
                level: state.level,
                balls: state.balls.len(),
            },
            phase: state.phase,
            overlay: overlay_lines(state.phase, state.level, state.score),
        }
    }

    /// All bodies as one list, tagged by kind (paddle first, then bricks,
    /// gifts, projectiles, balls)
    pub fn bodies(&self) -> Vec<Body> {
        let mut bodies = Vec::with_capacity(
            1 + self.bricks.len() + self.gifts.len() + self.projectiles.len() + self.balls.len(),
        );
        bodies.push(Body {
            kind: EntityKind::Paddle,
            id: 0,
            rect: self.paddle,
        });
        bodies.extend(self.bricks.iter().map(|b| Body {
            kind: EntityKind::Brick,
            id: b.id,
            rect: b.rect,
        }));
        bodies.extend(self.gifts.iter().map(|g| Body {
            kind: EntityKind::Gift,
            id: g.id,
            rect: g.rect,
        }));
        bodies.extend(self.projectiles.iter().map(|p| Body {
            kind: EntityKind::Projectile,
            id: p.id,
            rect: p.rect,
        }));
        bodies.extend(self.balls.iter().map(|b| Body {
            kind: EntityKind::Ball,
            id: b.id,
            rect: Rect::around_circle(b.center, b.radius),
        }));
        bodies
    }
}

/// Overlay text for a phase; empty while playing
pub fn overlay_lines(phase: GamePhase, level: u32, score: u64) -> Vec<String> {
    match phase {
        GamePhase::Prepare => vec![
            format!("Prepare for Level {}", level),
            "Press SPACE to start".to_string(),
        ],
        GamePhase::Playing => Vec::new(),
        GamePhase::Paused => vec!["PAUSED".to_string()],
        GamePhase::GameOver => vec![
            "GAME OVER".to_string(),
            format!("Final Score: {}", score),
            "Press R to restart".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;

    #[test]
    fn test_overlay_text() {
        assert_eq!(
            overlay_lines(GamePhase::Prepare, 2, 0),
            vec!["Prepare for Level 2", "Press SPACE to start"]
        );
        assert!(overlay_lines(GamePhase::Playing, 1, 0).is_empty());
        assert_eq!(overlay_lines(GamePhase::Paused, 1, 0), vec!["PAUSED"]);
        assert_eq!(
            overlay_lines(GamePhase::GameOver, 3, 42),
            vec!["GAME OVER", "Final Score: 42", "Press R to restart"]
        );
    }

    #[test]
    fn test_capture_new_game() {
        let state = GameState::new(GameConfig::default(), 8).unwrap();
        let snap = Snapshot::capture(&state);

        assert_eq!(snap.field, Vec2::new(800.0, 600.0));
        assert_eq!(snap.paddle, Rect::new(325.0, 580.0, 150.0, 10.0));
        assert_eq!(snap.bricks.len(), 40);
        assert_eq!(snap.balls.len(), 1);
        assert_eq!(snap.balls[0].center, Vec2::new(400.0, 570.0));
        assert_eq!(
            snap.hud,
            Hud {
                score: 0,
                lives: 3,
                level: 1,
                balls: 1
            }
        );
        assert_eq!(snap.phase, GamePhase::Prepare);
        assert_eq!(snap.overlay[0], "Prepare for Level 1");
        assert!(!snap.guns_active);
        assert!(!snap.floor_active);
    }

    #[test]
    fn test_bodies_tagged() {
        let state = GameState::new(GameConfig::default(), 8).unwrap();
        let bodies = Snapshot::capture(&state).bodies();

        assert_eq!(bodies.len(), 1 + 40 + 1);
        assert_eq!(bodies[0].kind, EntityKind::Paddle);
        assert_eq!(
            bodies.iter().filter(|b| b.kind == EntityKind::Brick).count(),
            40
        );
        let ball = bodies.last().unwrap();
        assert_eq!(ball.kind, EntityKind::Ball);
        assert_eq!(ball.rect, Rect::new(392.0, 562.0, 16.0, 16.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(GameConfig::default(), 8).unwrap();
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Prepare\""));
        assert!(json.contains("Press SPACE to start"));
    }
}
