//! Game state and core simulation types
//!
//! Everything needed to reproduce a run lives here: the grid, the active and
//! next pieces, scoring, and the RNG stream position.

use glam::IVec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::piece::{PieceKind, Shape};
use crate::settings::{GameSettings, SettingsError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Piece falling, input accepted
    Playing,
    /// Gravity and input frozen
    Paused,
    /// Run ended; only restart leaves this phase
    GameOver,
}

/// Something the host may want to react to (sound, confetti, HUD pops)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PieceSpawned { kind: PieceKind },
    PieceLocked { kind: PieceKind },
    LinesCleared { count: u32 },
    LevelUp { level: u32 },
    GameOver { score: u64 },
}

/// The falling piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current orientation (rotations are applied to the matrix)
    pub shape: Shape,
    /// Grid position of the shape's top-left corner
    pub pos: IVec2,
}

impl ActivePiece {
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.shape.cells_at(self.pos)
    }
}

/// RNG state wrapper for serialization
///
/// The stream position counts 32-bit draws, so the generator can be rebuilt
/// exactly with `advance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.stream);
        rng
    }

    /// Draw a uniformly chosen piece kind and advance the stream
    pub fn next_kind(&mut self) -> PieceKind {
        let roll = self.to_rng().next_u32();
        self.stream += 1;
        PieceKind::ALL[roll as usize % PieceKind::ALL.len()]
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub settings: GameSettings,
    pub grid: Grid,
    /// `None` only after game over
    pub active: Option<ActivePiece>,
    /// Preview of the piece that spawns next
    pub next: PieceKind,
    pub score: u64,
    /// Total cleared rows this run
    pub lines: u32,
    pub level: u32,
    pub phase: GamePhase,
    /// Gravity steps taken
    pub time_ticks: u64,
    /// Pieces spawned this run (doubles as a piece serial number)
    pub pieces_spawned: u64,
    /// Pending events, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default settings
    pub fn new(seed: u64) -> Self {
        Self::build(seed, GameSettings::default())
    }

    /// Create a new game with validated custom settings
    pub fn with_settings(seed: u64, settings: GameSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(seed, settings))
    }

    fn build(seed: u64, settings: GameSettings) -> Self {
        let mut rng_state = RngState::new(seed);
        let next = rng_state.next_kind();
        let mut state = Self {
            seed,
            rng_state,
            grid: Grid::new(settings.width, settings.height),
            active: None,
            next,
            score: 0,
            lines: 0,
            level: settings.start_level,
            phase: GamePhase::Playing,
            time_ticks: 0,
            pieces_spawned: 0,
            events: Vec::new(),
            settings,
        };
        state.spawn();
        state
    }

    /// Reset grid, score and level, then spawn a fresh piece
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng_state = RngState::new(seed);
        self.grid = Grid::new(self.settings.width, self.settings.height);
        self.active = None;
        self.next = self.rng_state.next_kind();
        self.score = 0;
        self.lines = 0;
        self.level = self.settings.start_level;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.pieces_spawned = 0;
        self.events.clear();
        self.spawn();
        log::info!("Run started with seed {}", seed);
    }

    /// Top-center spawn position for a shape
    pub fn spawn_position(&self, shape: &Shape) -> IVec2 {
        IVec2::new(self.grid.width() as i32 / 2 - shape.width() / 2, 0)
    }

    /// Promote the preview piece to active. Ends the game if it cannot be placed.
    pub fn spawn(&mut self) -> bool {
        let kind = self.next;
        self.next = self.rng_state.next_kind();
        let shape = kind.shape();
        let pos = self.spawn_position(&shape);

        if self.grid.collides(&shape, pos) {
            self.active = None;
            self.end_game();
            return false;
        }

        self.pieces_spawned += 1;
        self.active = Some(ActivePiece { kind, shape, pos });
        self.events.push(GameEvent::PieceSpawned { kind });
        true
    }

    pub fn end_game(&mut self) {
        if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!(
                "Game over: score {} lines {} level {}",
                self.score,
                self.lines,
                self.level
            );
        }
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> f32 {
        self.settings.drop_interval_ms(self.level)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Grid with the active piece painted in, for rendering
    pub fn composite(&self) -> Grid {
        let mut grid = self.grid.clone();
        if let Some(piece) = &self.active {
            for cell in piece.cells() {
                grid.set(cell, Some(piece.kind));
            }
        }
        grid
    }
}
