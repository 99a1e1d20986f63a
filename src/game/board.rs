use crate::error::GameError;

use super::position::{Position, MAX_COLUMNS, MAX_ROWS};

/// Grid of free/occupied cells. Cells are stored row-major in a flat vector so
/// cloning a board is a single copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Create an empty board. Both dimensions must be non-zero, the width
    /// must fit the column letters `A..Z` and the height at most [`MAX_ROWS`].
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        let invalid = GameError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width > MAX_COLUMNS || height > MAX_ROWS {
            return Err(invalid);
        }
        let cell_count = width.checked_mul(height).ok_or(invalid)?;
        Ok(Board {
            width,
            height,
            cells: vec![false; cell_count],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| !occupied).count()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn index(&self, pos: Position) -> Result<usize, GameError> {
        if !self.contains(pos) {
            return Err(GameError::OutOfBounds {
                position: (pos.row, pos.col),
                width: self.width,
                height: self.height,
            });
        }
        Ok(pos.row * self.width + pos.col)
    }

    /// Check whether a cell is free.
    pub fn is_free(&self, pos: Position) -> Result<bool, GameError> {
        let idx = self.index(pos)?;
        Ok(!self.cells[idx])
    }

    /// Mark a cell as occupied. Occupying a cell twice is rejected.
    pub fn occupy(&mut self, pos: Position) -> Result<(), GameError> {
        let idx = self.index(pos)?;
        if self.cells[idx] {
            return Err(GameError::CellOccupied(pos));
        }
        self.cells[idx] = true;
        Ok(())
    }

    /// Step from `pos` by `(drow, dcol)`, returning `None` when the step leaves
    /// the board.
    pub fn offset(&self, pos: Position, (drow, dcol): (isize, isize)) -> Option<Position> {
        let row = pos.row.checked_add_signed(drow)?;
        let col = pos.col.checked_add_signed(dcol)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    /// All free cells in row-major order.
    pub fn all_free_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &occupied)| !occupied)
            .map(|(idx, _)| Position::new(idx / self.width, idx % self.width))
            .collect()
    }

    /// Free-cell check for positions already known to be on the board.
    pub(crate) fn is_free_unchecked(&self, pos: Position) -> bool {
        !self.cells[pos.row * self.width + pos.col]
    }

    /// Occupy a cell already known to be on the board and free.
    pub(crate) fn occupy_unchecked(&mut self, pos: Position) {
        debug_assert!(self.is_free_unchecked(pos));
        self.cells[pos.row * self.width + pos.col] = true;
    }
}
