//! Player commands and the gravity tick
//!
//! Commands are applied synchronously as input arrives. Gravity is a separate
//! fixed step fired by the host's timer every `drop_interval_ms`.

use super::rules::MoveOutcome;
use super::state::{GamePhase, GameState};

/// A single player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    /// One row down; locks if blocked
    SoftDrop,
    Rotate,
    HardDrop,
    /// Toggle pause
    Pause,
}

/// Apply one command to the game
pub fn apply(state: &mut GameState, command: Command) -> MoveOutcome {
    match command {
        Command::Left => state.try_move(-1, 0),
        Command::Right => state.try_move(1, 0),
        Command::SoftDrop => state.try_move(0, 1),
        Command::Rotate => state.rotate(),
        Command::HardDrop => match state.hard_drop() {
            Some(_) => MoveOutcome::Locked,
            None => MoveOutcome::Inactive,
        },
        Command::Pause => {
            toggle_pause(state);
            MoveOutcome::Inactive
        }
    }
}

/// Pause while playing, resume while paused; game over is left alone
pub fn toggle_pause(state: &mut GameState) {
    state.phase = match state.phase {
        GamePhase::Playing => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Playing,
        GamePhase::GameOver => GamePhase::GameOver,
    };
    log::debug!("Phase now {:?}", state.phase);
}

/// Advance the game by one gravity step
pub fn tick(state: &mut GameState) -> MoveOutcome {
    if state.phase != GamePhase::Playing {
        return MoveOutcome::Inactive;
    }
    state.time_ticks += 1;
    state.try_move(0, 1)
}
