//! The playfield grid
//!
//! Row 0 is the top of the visible field; y grows downward.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::piece::{PieceKind, Shape};

/// A grid cell: empty, or tagged with the kind of piece that filled it
pub type Cell = Option<PieceKind>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major, `rows[y][x]`
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![None; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn in_bounds(&self, p: IVec2) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Cell at `p`, or `None` when out of bounds
    pub fn get(&self, p: IVec2) -> Cell {
        if self.in_bounds(p) {
            self.rows[p.y as usize][p.x as usize]
        } else {
            None
        }
    }

    pub fn is_filled(&self, p: IVec2) -> bool {
        self.get(p).is_some()
    }

    /// Set a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, p: IVec2, cell: Cell) {
        if self.in_bounds(p) {
            self.rows[p.y as usize][p.x as usize] = cell;
        }
    }

    /// True if `shape` placed at `pos` leaves the grid or overlaps a filled cell
    pub fn collides(&self, shape: &Shape, pos: IVec2) -> bool {
        shape
            .cells_at(pos)
            .any(|c| !self.in_bounds(c) || self.is_filled(c))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(Option::is_some)
    }

    /// Remove every full row, shifting rows above down and injecting empty
    /// rows at the top. Returns how many rows were removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let before = self.rows.len();
        self.rows.retain(|row| !row.iter().all(Option::is_some));
        let cleared = before - self.rows.len();
        for _ in 0..cleared {
            self.rows.insert(0, vec![None; self.width]);
        }
        cleared as u32
    }

    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }

    /// Height of each column (0 for an empty column)
    pub fn column_heights(&self) -> Vec<usize> {
        (0..self.width)
            .map(|x| {
                self.rows
                    .iter()
                    .position(|row| row[x].is_some())
                    .map_or(0, |top| self.height - top)
            })
            .collect()
    }

    /// Empty cells with a filled cell somewhere above them
    pub fn hole_count(&self) -> usize {
        let mut holes = 0;
        for x in 0..self.width {
            let mut covered = false;
            for row in &self.rows {
                match row[x] {
                    Some(_) => covered = true,
                    None if covered => holes += 1,
                    None => {}
                }
            }
        }
        holes
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            write!(f, "|")?;
            for cell in row {
                write!(f, "{}", cell.map_or('.', PieceKind::as_char))?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{}+", "-".repeat(self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fill_row(grid: &mut Grid, y: i32, kind: PieceKind) {
        for x in 0..grid.width() as i32 {
            grid.set(IVec2::new(x, y), Some(kind));
        }
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let grid = Grid::new(10, 20);
        let i = PieceKind::I.shape();
        assert!(!grid.collides(&i, IVec2::new(0, 0)));
        assert!(!grid.collides(&i, IVec2::new(6, 19)));
        assert!(grid.collides(&i, IVec2::new(-1, 0)));
        assert!(grid.collides(&i, IVec2::new(7, 0)));
        assert!(grid.collides(&i, IVec2::new(0, 20)));
        assert!(grid.collides(&i, IVec2::new(0, -1)));
    }

    #[test]
    fn test_collides_with_filled_cell() {
        let mut grid = Grid::new(10, 20);
        grid.set(IVec2::new(4, 10), Some(PieceKind::Z));
        let o = PieceKind::O.shape();
        assert!(grid.collides(&o, IVec2::new(3, 9)));
        assert!(grid.collides(&o, IVec2::new(4, 10)));
        assert!(!grid.collides(&o, IVec2::new(5, 9)));
    }

    #[test]
    fn test_clear_shifts_rows_down() {
        let mut grid = Grid::new(4, 4);
        grid.set(IVec2::new(1, 1), Some(PieceKind::T));
        fill_row(&mut grid, 2, PieceKind::I);
        grid.set(IVec2::new(0, 3), Some(PieceKind::L));

        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid.height(), 4);
        // the T cell moved from row 1 to row 2; the bottom row is untouched
        assert_eq!(grid.get(IVec2::new(1, 2)), Some(PieceKind::T));
        assert_eq!(grid.get(IVec2::new(0, 3)), Some(PieceKind::L));
        assert!(grid.rows()[0].iter().all(Option::is_none));
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut grid = Grid::new(3, 5);
        fill_row(&mut grid, 1, PieceKind::S);
        grid.set(IVec2::new(2, 2), Some(PieceKind::O));
        fill_row(&mut grid, 3, PieceKind::J);

        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(grid.get(IVec2::new(2, 4)), Some(PieceKind::O));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_column_heights_and_holes() {
        let mut grid = Grid::new(3, 4);
        grid.set(IVec2::new(0, 1), Some(PieceKind::I));
        grid.set(IVec2::new(2, 3), Some(PieceKind::I));
        assert_eq!(grid.column_heights(), vec![3, 0, 1]);
        assert_eq!(grid.hole_count(), 2);
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::new(3, 2);
        grid.set(IVec2::new(1, 1), Some(PieceKind::S));
        assert_eq!(grid.to_string(), "|...|\n|.S.|\n+---+");
    }

    proptest! {
        #[test]
        fn prop_row_cleared_iff_full(cells in proptest::collection::vec(any::<bool>(), 6 * 8)) {
            let mut grid = Grid::new(6, 8);
            for (i, &filled) in cells.iter().enumerate() {
                if filled {
                    grid.set(IVec2::new((i % 6) as i32, (i / 6) as i32), Some(PieceKind::T));
                }
            }
            let full_rows = (0..8).filter(|&y| grid.is_row_full(y)).count();
            let kept: Vec<Vec<Cell>> = grid
                .rows()
                .iter()
                .filter(|row| !row.iter().all(Option::is_some))
                .cloned()
                .collect();

            let cleared = grid.clear_full_rows();

            prop_assert_eq!(cleared as usize, full_rows);
            prop_assert_eq!(grid.height(), 8);
            prop_assert_eq!(grid.rows().len(), 8);
            // surviving rows keep their order at the bottom
            prop_assert_eq!(&grid.rows()[full_rows..], &kept[..]);
            prop_assert!(grid.rows()[..full_rows].iter().all(|r| r.iter().all(Option::is_none)));
        }
    }
}
