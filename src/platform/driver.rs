//! Frame time to gravity steps
//!
//! The host calls `advance` once per animation frame with the elapsed time.
//! Time accumulates until a full drop interval has passed, then one gravity
//! step fires. The interval is re-read after each step because a level-up
//! can shorten it mid-frame.

use crate::consts::{MAX_FRAME_MS, MAX_STEPS_PER_FRAME};
use crate::sim::{GamePhase, GameState, tick};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator_ms: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulated_ms(&self) -> f32 {
        self.accumulator_ms
    }

    /// Drop any partial interval (after restart, resume, or a hard drop)
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }

    /// Feed frame time; returns the number of gravity steps taken
    pub fn advance(&mut self, state: &mut GameState, frame_ms: f32) -> u32 {
        if state.phase != GamePhase::Playing {
            self.reset();
            return 0;
        }

        if frame_ms.is_finite() {
            self.accumulator_ms += frame_ms.clamp(0.0, MAX_FRAME_MS);
        }

        let mut steps = 0;
        while steps < MAX_STEPS_PER_FRAME {
            let interval = state.drop_interval_ms();
            if self.accumulator_ms < interval {
                break;
            }
            self.accumulator_ms -= interval;
            tick(state);
            steps += 1;
            if state.phase != GamePhase::Playing {
                self.reset();
                break;
            }
        }

        if steps == MAX_STEPS_PER_FRAME {
            // Spiral of death guard: forget the backlog
            self.reset();
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Command, apply};

    #[test]
    fn test_steps_once_per_interval() {
        let mut state = GameState::new(1);
        let mut driver = FixedStep::new();
        let y0 = state.active.as_ref().unwrap().pos.y;

        assert_eq!(driver.advance(&mut state, 400.0), 0);
        assert_eq!(driver.advance(&mut state, 400.0), 0);
        assert_eq!(driver.advance(&mut state, 400.0), 1);
        assert!((driver.accumulated_ms() - 200.0).abs() < 0.01);
        assert_eq!(state.active.as_ref().unwrap().pos.y, y0 + 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut state = GameState::new(1);
        let mut driver = FixedStep::new();
        // a 10s stall counts as one clamped frame
        assert_eq!(driver.advance(&mut state, 10_000.0), 1);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_fast_levels_take_several_steps() {
        let mut state = GameState::new(1);
        state.level = 30; // 100ms floor
        let mut driver = FixedStep::new();
        assert_eq!(driver.advance(&mut state, 350.0), 3);
    }

    #[test]
    fn test_paused_game_does_not_accumulate() {
        let mut state = GameState::new(1);
        let mut driver = FixedStep::new();
        driver.advance(&mut state, 900.0);
        apply(&mut state, Command::Pause);
        assert_eq!(driver.advance(&mut state, 900.0), 0);
        assert_eq!(driver.accumulated_ms(), 0.0);
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut state = GameState::new(1);
        let mut driver = FixedStep::new();
        assert_eq!(driver.advance(&mut state, -50.0), 0);
        assert_eq!(driver.accumulated_ms(), 0.0);
    }
}
