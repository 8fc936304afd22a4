//! Browser entry points
//!
//! JS owns the canvas, the keydown listener and the requestAnimationFrame
//! loop; it forwards keys and frame deltas here and reads state back for drawing.

use wasm_bindgen::prelude::*;

use super::session::Session;
use crate::highscores::HighScores;
use crate::settings::GameSettings;
use crate::sim::GamePhase;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Block Drop (wasm) starting...");
}

#[wasm_bindgen]
pub struct BlockDrop {
    session: Session,
}

#[wasm_bindgen]
impl BlockDrop {
    /// Start a run with stored settings (defaults if missing or invalid)
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> BlockDrop {
        let seed = seed as u64;
        let session = match Session::with_settings(seed, GameSettings::load(), HighScores::load()) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Falling back to default settings: {}", e);
                let mut session = Session::new(seed);
                session.highscores = HighScores::load();
                session
            }
        };
        BlockDrop { session }
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        self.session.key_down(key)
    }

    /// Called from requestAnimationFrame with the frame delta in ms
    pub fn frame(&mut self, dt_ms: f32) -> u32 {
        self.session.frame(dt_ms)
    }

    pub fn restart(&mut self, seed: f64) {
        self.session.restart(seed as u64);
    }

    pub fn width(&self) -> usize {
        self.session.state.grid.width()
    }

    pub fn height(&self) -> usize {
        self.session.state.grid.height()
    }

    /// Row-major piece codes with the active piece painted in (0 = empty)
    pub fn cells(&self) -> Vec<u8> {
        self.session
            .state
            .composite()
            .rows()
            .iter()
            .flatten()
            .map(|c| c.map_or(0, |k| k.code()))
            .collect()
    }

    /// Landing row of the active piece, or -1
    #[wasm_bindgen(js_name = ghostRow)]
    pub fn ghost_row(&self) -> i32 {
        if !self.session.state.settings.show_ghost {
            return -1;
        }
        self.session.state.ghost_position().map_or(-1, |p| p.y)
    }

    pub fn score(&self) -> f64 {
        self.session.state.score as f64
    }

    pub fn lines(&self) -> u32 {
        self.session.state.lines
    }

    pub fn level(&self) -> u32 {
        self.session.state.level
    }

    /// "playing", "paused" or "over"
    pub fn phase(&self) -> String {
        match self.session.state.phase {
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "over",
        }
        .to_string()
    }

    /// Piece code of the preview piece
    #[wasm_bindgen(js_name = nextPiece)]
    pub fn next_piece(&self) -> u8 {
        self.session.state.next.code()
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = takeEvents)]
    pub fn take_events(&mut self) -> String {
        serde_json::to_string(&self.session.take_events()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = highScores)]
    pub fn high_scores(&self) -> String {
        serde_json::to_string(&self.session.highscores).unwrap_or_else(|_| "{}".to_string())
    }

    /// Full serialized state, for debugging or resuming
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.state).unwrap_or_default()
    }
}
