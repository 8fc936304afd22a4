//! Piece movement, rotation and locking

use glam::IVec2;

use super::state::{GameEvent, GamePhase, GameState};

/// Result of a movement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Piece moved or rotated
    Moved,
    /// Target position collides; nothing changed
    Blocked,
    /// The piece was committed to the grid (and the next one spawned)
    Locked,
    /// No active piece or not in the Playing phase
    Inactive,
}

/// Row scoring: cleared rows × 100 × level
pub const LINE_SCORE: u64 = 100;

impl GameState {
    /// Shift the active piece. A blocked downward move locks the piece.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        if self.phase != GamePhase::Playing {
            return MoveOutcome::Inactive;
        }
        let Some(piece) = &self.active else {
            return MoveOutcome::Inactive;
        };

        let target = piece.pos + IVec2::new(dx, dy);
        if !self.grid.collides(&piece.shape, target) {
            if let Some(piece) = &mut self.active {
                piece.pos = target;
            }
            return MoveOutcome::Moved;
        }

        if dy > 0 {
            self.lock_piece();
            MoveOutcome::Locked
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Rotate 90° clockwise in place; rejected if the result collides
    pub fn rotate(&mut self) -> MoveOutcome {
        if self.phase != GamePhase::Playing {
            return MoveOutcome::Inactive;
        }
        let Some(piece) = &mut self.active else {
            return MoveOutcome::Inactive;
        };

        let rotated = piece.shape.rotated();
        if self.grid.collides(&rotated, piece.pos) {
            return MoveOutcome::Blocked;
        }
        piece.shape = rotated;
        MoveOutcome::Moved
    }

    /// Drop straight to the landing row and lock. Returns rows fallen.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let landing = self.ghost_position()?;
        let piece = self.active.as_mut()?;
        let fallen = (landing.y - piece.pos.y).max(0) as u32;
        piece.pos = landing;
        self.lock_piece();
        Some(fallen)
    }

    /// Where the active piece would land after a hard drop
    pub fn ghost_position(&self) -> Option<IVec2> {
        let piece = self.active.as_ref()?;
        if self.grid.collides(&piece.shape, piece.pos) {
            return None;
        }
        let mut pos = piece.pos;
        while !self.grid.collides(&piece.shape, pos + IVec2::Y) {
            pos += IVec2::Y;
        }
        Some(pos)
    }

    /// Commit the active piece to the grid, clear full rows, update score and
    /// level, then spawn the next piece.
    ///
    /// A piece with any cell above the visible grid ends the game without
    /// being written.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        if piece.cells().any(|c| c.y < 0) {
            self.end_game();
            return;
        }

        for cell in piece.cells() {
            self.grid.set(cell, Some(piece.kind));
        }
        self.events.push(GameEvent::PieceLocked { kind: piece.kind });

        let cleared = self.grid.clear_full_rows();
        if cleared > 0 {
            self.score += u64::from(cleared) * LINE_SCORE * u64::from(self.level);
            self.lines += cleared;
            self.events.push(GameEvent::LinesCleared { count: cleared });

            let level = self.settings.level_for_lines(self.lines);
            if level > self.level {
                self.level = level;
                self.events.push(GameEvent::LevelUp { level });
                log::info!(
                    "Level {} reached, drop interval {:.0}ms",
                    level,
                    self.drop_interval_ms()
                );
            }
        }

        self.spawn();
    }
}
