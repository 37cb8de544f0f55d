//! Collision module - the single legality predicate used by every transform
//!
//! A placement is legal when every filled cell lands inside the columns,
//! above the floor, and on an empty board cell. Cells above row 0 are only
//! checked against the side walls and the floor, never against the board, so
//! pieces may poke out of the top while spawning or rotating.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{BOARD_COLS, BOARD_ROWS};

/// Whether `piece`, shifted by (`dx`, `dy`), legally occupies `board`.
///
/// Pure: neither argument is modified.
pub fn is_valid_move(piece: &Piece, board: &Board, dx: i8, dy: i8) -> bool {
    piece.cells().all(|(x, y)| {
        let nx = x + dx;
        let ny = y + dy;
        if nx < 0 || nx >= BOARD_COLS as i8 || ny >= BOARD_ROWS as i8 {
            return false;
        }
        ny < 0 || !board.is_occupied(nx, ny)
    })
}

/// How many rows `piece` can fall before it would collide.
pub fn drop_distance(piece: &Piece, board: &Board) -> i8 {
    let mut distance = 0;
    while is_valid_move(piece, board, 0, distance + 1) {
        distance += 1;
    }
    distance
}

/// Landing projection of `piece`: same shape and column, lowest legal row.
pub fn ghost_of(piece: &Piece, board: &Board) -> Piece {
    piece.translated(0, drop_distance(piece, board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_spawn_is_valid_on_empty_board() {
        let board = Board::new();
        for kind in PieceKind::ALL {
            assert!(is_valid_move(&Piece::spawn(kind), &board, 0, 0));
        }
    }

    #[test]
    fn test_cells_above_the_board_ignore_occupancy_but_not_walls() {
        let board = Board::new();
        // I piece's filled row is grid row 1; anchor y = -1 puts it on row 0.
        let piece = Piece::at(PieceKind::I, 0, -1);
        assert!(is_valid_move(&piece, &board, 0, -1));
        assert!(!is_valid_move(&piece, &board, -1, -1));
    }

    #[test]
    fn test_floor_is_solid() {
        let board = Board::new();
        let piece = Piece::at(PieceKind::O, 0, 18);
        assert!(is_valid_move(&piece, &board, 0, 0));
        assert!(!is_valid_move(&piece, &board, 0, 1));
    }

    #[test]
    fn test_empty_grid_cells_may_hang_outside() {
        let board = Board::new();
        // I grid is 4 wide; its empty rows 2..3 sit below the floor here.
        let piece = Piece::at(PieceKind::I, 6, 18);
        assert!(is_valid_move(&piece, &board, 0, 0));
    }

    #[test]
    fn test_drop_distance_on_empty_board() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!(drop_distance(&piece, &board), 18);
        assert_eq!(ghost_of(&piece, &board).y, 18);
    }
}
