//! Frame driver
//!
//! One call per animation frame: take the buffered input, run one tick, then
//! hand a snapshot to the presenter. Presentation happens every frame, in
//! every phase, so overlays are drawn while the simulation is frozen.

use crate::config::{ConfigError, GameConfig};
use crate::input::{InputState, KeyEvent};
use crate::sim::{GameEvent, GameState, TickInput, autopilot_input, tick};
use crate::view::Snapshot;

/// Draws frames; gets a read-only snapshot and cannot touch the simulation
pub trait Presenter {
    fn present(&mut self, frame: &Snapshot);
}

/// Presenter that draws nothing
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _frame: &Snapshot) {}
}

pub struct FrameDriver<P: Presenter> {
    state: GameState,
    input: InputState,
    presenter: P,
    autopilot: bool,
}

impl<P: Presenter> FrameDriver<P> {
    pub fn new(config: GameConfig, seed: u64, presenter: P) -> Result<Self, ConfigError> {
        let state = GameState::new(config, seed)?;
        log::info!("Frame driver ready (seed {})", seed);
        Ok(Self {
            state,
            input: InputState::new(),
            presenter,
            autopilot: false,
        })
    }

    /// Buffer a key transition for the next frame
    pub fn handle_key(&mut self, event: KeyEvent) {
        self.input.handle(event);
    }

    /// Let the autopilot play instead of buffered keys
    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.autopilot = enabled;
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Run one animation frame at wall-clock time `now_ms`
    pub fn frame(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let keys = self.input.take_tick_input();
        let input = if self.autopilot {
            let mut auto = autopilot_input(&self.state, now_ms);
            // Pause and restart stay with the player
            auto.pause = keys.pause;
            auto.restart = keys.restart;
            auto
        } else {
            keys
        };

        let events = self.run_tick(&input, now_ms);
        let snapshot = Snapshot::capture(&self.state);
        self.presenter.present(&snapshot);
        events
    }

    fn run_tick(&mut self, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, now_ms);
        for event in &events {
            log::debug!("{:?}", event);
        }
        events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
