//! Idle/demo mode - a simple bot that plays the game
//!
//! For each new piece the bot scores every reachable orientation and column
//! by dropping it onto a copy of the grid, then steers toward the best one.

use glam::IVec2;

use super::grid::Grid;
use super::piece::Shape;
use super::state::GameState;
use super::tick::Command;

// Placement weights (lines are good, height, holes and bumpiness are bad)
const W_HEIGHT: f32 = -0.51;
const W_LINES: f32 = 0.76;
const W_HOLES: f32 = -0.36;
const W_BUMPY: f32 = -0.18;

/// Chosen landing spot for one piece
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Serial of the piece this plan belongs to
    pub piece: u64,
    pub shape: Shape,
    pub x: i32,
    pub score: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    plan: Option<Plan>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Next command that moves the active piece toward the planned placement
    pub fn next_command(&mut self, state: &GameState) -> Option<Command> {
        let piece = state.active.as_ref()?;
        if self.plan.as_ref().map(|p| p.piece) != Some(state.pieces_spawned) {
            self.plan = best_placement(state);
        }
        let plan = self.plan.as_ref()?;

        if piece.shape != plan.shape {
            let rotated = piece.shape.rotated();
            if state.grid.collides(&rotated, piece.pos) {
                // Can't get there from here; settle for what we have
                return Some(Command::HardDrop);
            }
            return Some(Command::Rotate);
        }

        let step = (plan.x - piece.pos.x).signum();
        if step != 0 {
            if state.grid.collides(&piece.shape, piece.pos + IVec2::new(step, 0)) {
                return Some(Command::HardDrop);
            }
            return Some(if step < 0 { Command::Left } else { Command::Right });
        }

        Some(Command::HardDrop)
    }
}

/// Score every orientation and column for the active piece
pub fn best_placement(state: &GameState) -> Option<Plan> {
    let piece = state.active.as_ref()?;
    let grid = &state.grid;

    let mut orientations: Vec<Shape> = Vec::with_capacity(4);
    let mut shape = piece.shape.clone();
    for _ in 0..4 {
        if !orientations.contains(&shape) {
            orientations.push(shape.clone());
        }
        shape = shape.rotated();
    }

    let mut best: Option<Plan> = None;
    for shape in orientations {
        let max_x = grid.width() as i32 - shape.width();
        for x in 0..=max_x {
            let start = IVec2::new(x, piece.pos.y);
            if grid.collides(&shape, start) {
                continue;
            }
            let score = evaluate(grid, &shape, start);
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(Plan {
                    piece: state.pieces_spawned,
                    shape: shape.clone(),
                    x,
                    score,
                });
            }
        }
    }

    if let Some(plan) = &best {
        log::trace!("Piece {} plan: x={} score={:.2}", plan.piece, plan.x, plan.score);
    }
    best
}

/// Drop `shape` from `start` onto a copy of the grid and score the result
fn evaluate(grid: &Grid, shape: &Shape, start: IVec2) -> f32 {
    let mut pos = start;
    while !grid.collides(shape, pos + IVec2::Y) {
        pos += IVec2::Y;
    }

    let mut after = grid.clone();
    for cell in shape.cells_at(pos) {
        after.set(cell, Some(super::piece::PieceKind::I));
    }
    let lines = after.clear_full_rows();

    let heights = after.column_heights();
    let aggregate: usize = heights.iter().sum();
    let bumpiness: usize = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();

    W_HEIGHT * aggregate as f32
        + W_LINES * lines as f32
        + W_HOLES * after.hole_count() as f32
        + W_BUMPY * bumpiness as f32
}
