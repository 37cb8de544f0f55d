//! Scoring module - line clearing and score table
//!
//! Both functions here are pure: identical inputs always give identical
//! outputs and nothing outside the return value is touched.

use crate::board::{Board, RowSet};
use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows in one lock.
///
/// `[0, 100, 300, 500, 800]` for 0..=4; counts beyond 4 cannot happen with
/// four-cell pieces and score nothing.
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Remove `rows` from `board` and pad the top with empty rows.
pub fn clear_rows(board: &Board, rows: &[usize]) -> Board {
    board.remove_rows(rows)
}

/// Outcome of clearing every completed row of a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearResult {
    pub board: Board,
    /// Cleared row indices in the pre-clear board, top to bottom
    pub rows: RowSet,
    pub points: u32,
}

impl ClearResult {
    pub fn lines(&self) -> usize {
        self.rows.len()
    }
}

/// Detect all completed rows, clear them and score them.
pub fn clear_completed(board: &Board) -> ClearResult {
    let rows = board.completed_rows();
    let cleared = if rows.is_empty() {
        board.clone()
    } else {
        clear_rows(board, &rows)
    };
    ClearResult {
        board: cleared,
        points: line_clear_score(rows.len()),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 800);
        assert_eq!(line_clear_score(5), 0);
    }

    #[test]
    fn test_nothing_to_clear_leaves_board_alone() {
        let board = Board::from_ascii(&["LLLLLLLLL."]).unwrap();
        let result = clear_completed(&board);
        assert_eq!(result.board, board);
        assert_eq!(result.lines(), 0);
        assert_eq!(result.points, 0);
    }

    #[test]
    fn test_split_clear_keeps_the_row_between() {
        let board = Board::from_ascii(&[
            "IIIIIIIIII",
            "J.........",
            "ZZZZZZZZZZ",
        ])
        .unwrap();
        let result = clear_completed(&board);
        assert_eq!(result.rows.as_slice(), &[17, 19]);
        assert_eq!(result.points, 300);
        assert!(result.board.is_occupied(0, 19));
        assert_eq!(result.board.filled_count(), 1);
    }

    #[test]
    fn test_clearing_is_deterministic() {
        let board = Board::from_ascii(&["SSSSSSSSSS", "T.T.T.T.T."]).unwrap();
        assert_eq!(clear_completed(&board), clear_completed(&board));
    }
}
