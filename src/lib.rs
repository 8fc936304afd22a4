//! Block Drop - a falling-block stacking game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, pieces, gravity, line clears)
//! - `platform`: Input mapping, frame driver and browser bindings
//! - `settings`: Rules and pacing, persisted in LocalStorage
//! - `highscores`: Top-10 leaderboard

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{GameSettings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Longest frame the driver will account for (tab switches, debugger stalls)
    pub const MAX_FRAME_MS: f32 = 1000.0;
    /// Maximum gravity steps per frame to prevent spiral of death
    pub const MAX_STEPS_PER_FRAME: u32 = 8;
    /// Frame delta the native demo pretends to run at
    pub const DEMO_FRAME_MS: f32 = 1000.0 / 60.0;
}
