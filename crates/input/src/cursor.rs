//! Board cursor: the only pointing device the terminal has.
//!
//! The cursor addresses board *positions*. Confirming turns the position into
//! the identifier of the tile currently lying there, which is the one thing
//! the core accepts.

use crate::core::GameSnapshot;
use crate::map::Direction;
use crate::types::{GameAction, DEFAULT_COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    columns: u16,
    index: usize,
}

impl Default for BoardCursor {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS)
    }
}

impl BoardCursor {
    pub fn new(columns: u16) -> Self {
        Self {
            columns: columns.max(1),
            index: 0,
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Board position (index into the snapshot's tile list).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row(&self) -> usize {
        self.index / self.columns as usize
    }

    pub fn col(&self) -> usize {
        self.index % self.columns as usize
    }

    /// Move one step, wrapping around within the current row or column.
    ///
    /// `len` is the number of tiles on the board; a short last row is
    /// skipped when moving vertically through a column it does not reach.
    pub fn step(&mut self, dir: Direction, len: usize) {
        if len == 0 {
            self.index = 0;
            return;
        }
        self.clamp(len);

        let cols = self.columns as usize;
        let rows = len.div_ceil(cols);
        let row_width = |row: usize| cols.min(len - row * cols);
        let (mut row, mut col) = (self.row(), self.col());

        match dir {
            Direction::Left => {
                col = if col == 0 { row_width(row) - 1 } else { col - 1 };
            }
            Direction::Right => {
                col = if col + 1 >= row_width(row) { 0 } else { col + 1 };
            }
            Direction::Up => loop {
                row = if row == 0 { rows - 1 } else { row - 1 };
                if row * cols + col < len {
                    break;
                }
            },
            Direction::Down => loop {
                row = if row + 1 >= rows { 0 } else { row + 1 };
                if row * cols + col < len {
                    break;
                }
            },
        }

        self.index = row * cols + col;
    }

    /// Keep the cursor on the board after the board shrinks.
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }

    /// Select the tile under the cursor.
    pub fn confirm(&self, snap: &GameSnapshot) -> Option<GameAction> {
        snap.tiles
            .get(self.index)
            .map(|tile| GameAction::Select(tile.unique_id))
    }
}
