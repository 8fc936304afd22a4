//! A running game as the host sees it
//!
//! Ties the simulation to input, the frame driver, the autoplay bot and the
//! high score table. Both the wasm handle and the native demo drive one of these.

use crate::highscores::HighScores;
use crate::settings::{GameSettings, SettingsError};
use crate::sim::{Autopilot, Command, GameEvent, GamePhase, GameState, MoveOutcome, apply};

use super::driver::FixedStep;
use super::input::{KeyAction, map_key};
use super::now_ms;

pub struct Session {
    pub state: GameState,
    pub highscores: HighScores,
    driver: FixedStep,
    autopilot: Autopilot,
    autoplay: bool,
    /// Rank earned by the last finished run, if it made the table
    last_rank: Option<usize>,
    /// Events since the host last asked
    pending: Vec<GameEvent>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed), HighScores::new())
    }

    pub fn with_settings(
        seed: u64,
        settings: GameSettings,
        highscores: HighScores,
    ) -> Result<Self, SettingsError> {
        Ok(Self::from_state(
            GameState::with_settings(seed, settings)?,
            highscores,
        ))
    }

    fn from_state(state: GameState, highscores: HighScores) -> Self {
        let mut session = Self {
            state,
            highscores,
            driver: FixedStep::new(),
            autopilot: Autopilot::new(),
            autoplay: false,
            last_rank: None,
            pending: Vec::new(),
        };
        session.collect_events();
        session
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, on: bool) {
        self.autoplay = on;
        log::info!("Autoplay: {}", on);
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Handle a browser key name. Returns true if the key was recognized.
    pub fn key_down(&mut self, key: &str) -> bool {
        match map_key(key) {
            Some(KeyAction::Game(command)) => {
                self.command(command);
                true
            }
            Some(KeyAction::ToggleAutoplay) => {
                self.set_autoplay(!self.autoplay);
                true
            }
            None => false,
        }
    }

    pub fn command(&mut self, command: Command) -> MoveOutcome {
        let outcome = apply(&mut self.state, command);
        if outcome == MoveOutcome::Locked || command == Command::Pause {
            self.driver.reset();
        }
        self.collect_events();
        outcome
    }

    /// Advance by one animation frame. Returns gravity steps taken.
    pub fn frame(&mut self, frame_ms: f32) -> u32 {
        if self.autoplay && self.state.phase == GamePhase::Playing {
            if let Some(command) = self.autopilot.next_command(&self.state) {
                self.command(command);
            }
        }
        let steps = self.driver.advance(&mut self.state, frame_ms);
        self.collect_events();
        steps
    }

    pub fn restart(&mut self, seed: u64) {
        self.state.restart(seed);
        self.driver.reset();
        self.autopilot = Autopilot::new();
        self.last_rank = None;
        self.pending.clear();
        self.collect_events();
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    fn collect_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::GameOver { score } = event {
                let (lines, level) = (self.state.lines, self.state.level);
                self.last_rank = self.highscores.add_score(score, lines, level, now_ms());
                if let Some(rank) = self.last_rank {
                    log::info!("New high score {} at rank {}", score, rank);
                    self.highscores.save();
                }
            }
            self.pending.push(event);
        }
    }
}
