//! Brick grid generation

use rand::Rng;

use super::body::Rect;
use super::powerup::roll_gift;
use super::state::{Brick, BrickKind, GameState};

/// Build the brick grid for the current level
///
/// The grid is centered horizontally. Each brick first rolls for
/// unbreakable, then (independently) for multi-hit, otherwise it is a plain
/// breakable brick. Destructible bricks also roll for a gift. If the rolls
/// leave nothing to clear, the first brick is turned breakable so the level
/// can always be finished.
pub fn generate_level(state: &mut GameState) {
    let bricks_cfg = state.config().bricks.clone();
    let gifts_cfg = state.config().gifts.clone();
    let field_width = state.config().field.width;

    let start_x = (field_width - bricks_cfg.grid_width()) / 2.0;
    let mut bricks = Vec::with_capacity((bricks_cfg.rows * bricks_cfg.cols) as usize);

    for row in 0..bricks_cfg.rows {
        for col in 0..bricks_cfg.cols {
            let x = start_x + col as f32 * (bricks_cfg.width + bricks_cfg.padding);
            let y = bricks_cfg.top_offset + row as f32 * (bricks_cfg.height + bricks_cfg.padding);

            let (kind, hits) = if state.rng.random::<f32>() < bricks_cfg.unbreakable_chance {
                (BrickKind::Unbreakable, 1)
            } else if state.rng.random::<f32>() < bricks_cfg.multi_hit_chance {
                let hits = state
                    .rng
                    .random_range(bricks_cfg.multi_hit_min..=bricks_cfg.multi_hit_max);
                (BrickKind::MultiHit, hits)
            } else {
                (BrickKind::Breakable, 1)
            };

            let gift = if kind == BrickKind::Unbreakable {
                None
            } else {
                roll_gift(&mut state.rng, &gifts_cfg)
            };

            bricks.push(Brick {
                id: state.next_entity_id(),
                kind,
                hits,
                rect: Rect::new(x, y, bricks_cfg.width, bricks_cfg.height),
                gift,
            });
        }
    }

    if !bricks.iter().any(|b| b.counts_for_clear()) {
        if let Some(first) = bricks.first_mut() {
            log::warn!("Level {} rolled no clearable bricks; forcing one", state.level);
            first.kind = BrickKind::Breakable;
            first.hits = 1;
        }
    }

    let unbreakable = bricks.iter().filter(|b| !b.counts_for_clear()).count();
    let with_gifts = bricks.iter().filter(|b| b.gift.is_some()).count();
    log::info!(
        "Level {}: {} bricks ({} unbreakable, {} carrying gifts)",
        state.level,
        bricks.len(),
        unbreakable,
        with_gifts
    );

    state.bricks = bricks;
}
