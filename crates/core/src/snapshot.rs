use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, Phase, Speed, BOARD_COLS, BOARD_ROWS, INITIAL_TIME_SECS};

/// Read-only view of a game for renderers and observers.
///
/// Reusable: [`GameState::snapshot_into`](crate::GameState::snapshot_into)
/// overwrites every field, so a front-end can keep one around per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub current: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: Option<PieceKind>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub time_left: u32,
    pub speed: Speed,
    pub player: String,
    pub game_id: u32,
}

impl GameSnapshot {
    /// Cell at (x, y) with the current piece drawn over the locked board.
    pub fn cell_with_current(&self, x: usize, y: usize) -> Cell {
        if let Some(piece) = self.current {
            if piece
                .cells()
                .any(|(cx, cy)| cx as isize == x as isize && cy as isize == y as isize)
            {
                return Some(piece.kind);
            }
        }
        self.board.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    /// Whether (x, y) is covered by the ghost projection.
    pub fn is_ghost_at(&self, x: usize, y: usize) -> bool {
        self.ghost.is_some_and(|ghost| {
            ghost
                .cells()
                .any(|(gx, gy)| gx as isize == x as isize && gy as isize == y as isize)
        })
    }

    /// Countdown formatted as `m:ss`.
    pub fn clock(&self) -> String {
        format!("{}:{:02}", self.time_left / 60, self.time_left % 60)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLS as usize]; BOARD_ROWS as usize],
            current: None,
            ghost: None,
            next: None,
            held: None,
            can_hold: true,
            phase: Phase::NotStarted,
            score: 0,
            high_score: 0,
            time_left: INITIAL_TIME_SECS,
            speed: Speed::default(),
            player: String::new(),
            game_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_format() {
        let mut snap = GameSnapshot::default();
        assert_eq!(snap.clock(), "2:00");
        snap.time_left = 65;
        assert_eq!(snap.clock(), "1:05");
        snap.time_left = 0;
        assert_eq!(snap.clock(), "0:00");
    }

    #[test]
    fn test_current_piece_overlays_board() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Some(PieceKind::Z);
        snap.current = Some(Piece::at(PieceKind::O, 4, 0));
        assert_eq!(snap.cell_with_current(4, 0), Some(PieceKind::O));
        assert_eq!(snap.cell_with_current(0, 19), Some(PieceKind::Z));
        assert_eq!(snap.cell_with_current(0, 0), None);
        assert_eq!(snap.cell_with_current(30, 0), None);
    }
}
