//! Breakout headless demo
//!
//! Runs the autopilot against the simulation with a simulated 60 Hz clock and
//! logs how the game goes. `RUST_LOG=debug` shows every game event.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use breakout::sim::{GameEvent, GamePhase};
use breakout::{FrameDriver, GameConfig, Presenter, Snapshot};

/// Milliseconds per frame at 60 Hz
const FRAME_MS: u64 = 16;

#[derive(Parser, Debug)]
#[command(about = "Run a Breakout game on autopilot", version)]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of frames to run
    #[arg(long, default_value_t = 36_000)]
    frames: u64,
    /// JSON config file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use the classic flat-canvas balance
    #[arg(long, conflicts_with = "config")]
    classic: bool,
    /// Print the final frame as JSON
    #[arg(long)]
    json: bool,
}

/// Logs the HUD once a second of game time and keeps the last frame
#[derive(Default)]
struct LogPresenter {
    frames: u64,
    last: Option<Snapshot>,
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &Snapshot) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::info!(
                "[{}] level {} score {} lives {} balls {} bricks {}{}{}",
                frame.phase.as_str(),
                frame.hud.level,
                frame.hud.score,
                frame.hud.lives,
                frame.hud.balls,
                frame.bricks.len(),
                if frame.floor_active { " +floor" } else { "" },
                if frame.guns_active { " +guns" } else { "" },
            );
        }
        self.last = Some(frame.clone());
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match (&args.config, args.classic) {
        (Some(path), _) => GameConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        (None, true) => GameConfig::classic(),
        (None, false) => GameConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Breakout (native) starting with seed {}", seed);

    let mut driver = FrameDriver::new(config, seed, LogPresenter::default())
        .context("invalid game configuration")?;
    driver.set_autopilot(true);

    let mut levels_cleared = 0;
    for frame in 0..args.frames {
        let events = driver.frame(frame * FRAME_MS);
        levels_cleared += events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelCleared { .. }))
            .count();
        if driver.state().phase == GamePhase::GameOver {
            break;
        }
    }

    let state = driver.state();
    log::info!(
        "Finished after {} frames: {} at level {}, score {}, {} levels cleared",
        driver.presenter().frames,
        state.phase.as_str(),
        state.level,
        state.score,
        levels_cleared
    );

    if args.json {
        if let Some(last) = &driver.presenter().last {
            let json = serde_json::to_string_pretty(last).context("serializing final frame")?;
            println!("{}", json);
        }
    }

    Ok(())
}
