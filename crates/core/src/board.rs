//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that was locked there. Storage is a flat row-major array.
//! Coordinates: (x, y) where x is the column 0..9 (left to right) and y is the
//! row 0..19 (top to bottom).
//!
//! The board only changes through [`Board::commit`] (lock) and
//! [`Board::remove_rows`] (clear and reflow); a restart replaces it wholesale.

use std::fmt;

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_COLS as usize) * (BOARD_ROWS as usize);

const COLS: usize = BOARD_COLS as usize;
const ROWS: usize = BOARD_ROWS as usize;

/// Row indices, at most one entry per board row.
pub type RowSet = ArrayVec<usize, ROWS>;

/// Errors from [`Board::from_ascii`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("board has {0} rows, at most 20 allowed")]
    TooManyRows(usize),
    #[error("row {row} has {len} cells, expected 10")]
    RowWidth { row: usize, len: usize },
    #[error("unknown cell {ch:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, ch: char },
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_COLS as i8 || y < 0 || y >= BOARD_ROWS as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_COLS
    }

    pub fn height(&self) -> u8 {
        BOARD_ROWS
    }

    /// Get cell at position (x, y), `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// In bounds and empty.
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(Option::is_some)
    }

    /// Indices of every completely filled row, top to bottom.
    pub fn completed_rows(&self) -> RowSet {
        (0..ROWS).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Write every filled cell of `piece` into the board with the piece's tag.
    ///
    /// Cells that fall outside the grid (only possible above row 0 when a
    /// spawn overlaps at game over) are dropped.
    pub fn commit(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Return a board with `rows` removed and the same number of empty rows
    /// inserted at the top. Indices outside the board are ignored.
    pub fn remove_rows(&self, rows: &[usize]) -> Board {
        let mut out = Board::new();
        let mut write_y = ROWS;

        // Scan from bottom to top, packing surviving rows downwards.
        for read_y in (0..ROWS).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            let src = read_y * COLS;
            let dst = write_y * COLS;
            out.cells[dst..dst + COLS].copy_from_slice(&self.cells[src..src + COLS]);
        }

        out
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Copy into a fixed 2D grid (row-major).
    pub fn write_grid(&self, out: &mut [[Cell; COLS]; ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` is empty and a piece letter (`IJLOSTZ`, any case) is a locked cell.
    /// Fewer than 20 rows fill the bottom of the board.
    ///
    /// ```
    /// use rank_tetris_core::Board;
    ///
    /// let board = Board::from_ascii(&["IIII..OOOO"]).unwrap();
    /// assert!(board.is_occupied(0, 19));
    /// assert!(!board.is_occupied(4, 19));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Result<Board, BoardParseError> {
        if rows.len() > ROWS {
            return Err(BoardParseError::TooManyRows(rows.len()));
        }

        let mut board = Board::new();
        let offset = ROWS - rows.len();
        for (i, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != COLS {
                return Err(BoardParseError::RowWidth { row: i, len });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(PieceKind::from_char(other).ok_or(
                        BoardParseError::UnknownCell { row: i, col, ch },
                    )?),
                };
                board.cells[(offset + i) * COLS + col] = cell;
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let ch = cell.map(|k| k.as_char()).unwrap_or('.');
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
