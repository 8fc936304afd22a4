//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Gravity advances only on explicit ticks
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod grid;
pub mod piece;
pub mod rules;
pub mod state;
pub mod tick;

pub use autoplay::{Autopilot, Plan, best_placement};
pub use grid::{Cell, Grid};
pub use piece::{PieceKind, Shape};
pub use rules::{LINE_SCORE, MoveOutcome};
pub use state::{ActivePiece, GameEvent, GamePhase, GameState, RngState};
pub use tick::{Command, apply, tick, toggle_pause};
