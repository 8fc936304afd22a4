//! Piece kinds and shape matrices
//!
//! Shapes are small row-major occupancy matrices. Rotation is done on the
//! matrix itself (transpose then reverse each row), so there is no rotation
//! index and no wall-kick table.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Spawn orientation for this kind
    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            PieceKind::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        Shape::from_rows(rows)
    }

    /// Single-letter tag, used for text snapshots and the wasm cell export
    pub fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Stable 1-based code (0 is reserved for an empty cell)
    pub fn code(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// A rectangular occupancy matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|&c| c != 0).collect())
                .collect(),
        }
    }

    pub fn width(&self) -> i32 {
        self.rows.first().map_or(0, |r| r.len() as i32)
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Rotate 90° clockwise: transpose, then reverse each row
    pub fn rotated(&self) -> Shape {
        let h = self.rows.len();
        let w = self.rows.first().map_or(0, Vec::len);
        let mut rows = vec![vec![false; h]; w];
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                // transposed[x][y], then the row is reversed
                rows[x][h - 1 - y] = filled;
            }
        }
        Shape { rows }
    }

    /// Offsets of occupied cells relative to the shape's top-left corner
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(x, _)| IVec2::new(x as i32, y as i32))
        })
    }

    /// Occupied cells translated to a grid position
    pub fn cells_at(&self, pos: IVec2) -> impl Iterator<Item = IVec2> + '_ {
        self.cells().map(move |c| c + pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let shape = PieceKind::I.shape().rotated();
        assert_eq!(shape.width(), 1);
        assert_eq!(shape.height(), 4);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // 010      10
        // 111  ->  11
        //          10
        let shape = PieceKind::T.shape().rotated();
        assert_eq!(shape, Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]));
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            let original = kind.shape();
            let back = original.rotated().rotated().rotated().rotated();
            assert_eq!(back, original, "{kind:?}");
        }
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = PieceKind::O.shape();
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn test_codes_are_unique_and_nonzero() {
        let mut codes: Vec<u8> = PieceKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 7);
        assert!(!codes.contains(&0));
    }
}
