//! Pieces module - tetromino catalog, rotation and wall kicks
//!
//! Every kind has a canonical square shape grid (4x4 for I, 2x2 for O, 3x3 for
//! the rest). A piece is a grid plus a board-relative anchor, the top-left of
//! the grid. Rotation turns the grid 90° clockwise in place; when the rotated
//! grid does not fit, a fixed list of anchor nudges is tried in order.

use crate::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

/// Largest grid edge in the catalog (the I piece)
pub const MAX_GRID: usize = 4;

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// Anchor nudges tried after a rotation, in priority order:
/// unchanged, one column left, one column right, one row up.
pub const WALL_KICKS: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// Square boolean grid describing one rotation state of a piece.
///
/// `cells[row][col]`; only the top-left `size x size` region is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeGrid {
    size: u8,
    cells: [[bool; MAX_GRID]; MAX_GRID],
}

const fn grid(size: u8, rows: [[u8; MAX_GRID]; MAX_GRID]) -> ShapeGrid {
    let mut cells = [[false; MAX_GRID]; MAX_GRID];
    let mut r = 0;
    while r < MAX_GRID {
        let mut c = 0;
        while c < MAX_GRID {
            cells[r][c] = rows[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    ShapeGrid { size, cells }
}

const I_SHAPE: ShapeGrid = grid(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SHAPE: ShapeGrid = grid(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const L_SHAPE: ShapeGrid = grid(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_SHAPE: ShapeGrid = grid(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const S_SHAPE: ShapeGrid = grid(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const T_SHAPE: ShapeGrid = grid(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
const Z_SHAPE: ShapeGrid = grid(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);

/// Canonical (unrotated) shape of a kind.
pub fn canonical_shape(kind: PieceKind) -> ShapeGrid {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

impl ShapeGrid {
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the grid cell at (col, row) is filled. Out-of-grid is empty.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        let n = self.size as usize;
        col < n && row < n && self.cells[row][col]
    }

    /// Local (col, row) offsets of every filled cell, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Clockwise quarter turn: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> ShapeGrid {
        let n = self.size as usize;
        let mut cells = [[false; MAX_GRID]; MAX_GRID];
        for (row, out_row) in cells.iter_mut().enumerate().take(n) {
            for (col, out) in out_row.iter_mut().enumerate().take(n) {
                *out = self.cells[n - 1 - col][row];
            }
        }
        ShapeGrid {
            size: self.size,
            cells,
        }
    }
}

/// A piece on (or about to enter) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: ShapeGrid,
    /// Anchor column (left edge of the shape grid)
    pub x: i8,
    /// Anchor row (top edge of the shape grid)
    pub y: i8,
}

impl Piece {
    /// New piece in its canonical shape at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_POSITION.0, SPAWN_POSITION.1)
    }

    /// New piece in its canonical shape at an arbitrary anchor
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape: canonical_shape(kind),
            x,
            y,
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Board coordinates (x, y) of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same anchor, shape turned clockwise.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }
}

/// Try to rotate a piece, falling back through [`WALL_KICKS`].
///
/// `fits(candidate, dx, dy)` decides whether the rotated candidate is legal
/// at the given nudge. Returns the first accepted placement, or `None`.
pub fn try_rotate(piece: &Piece, fits: impl Fn(&Piece, i8, i8) -> bool) -> Option<Piece> {
    let rotated = piece.rotated();
    WALL_KICKS
        .iter()
        .find(|&&(dx, dy)| fits(&rotated, dx, dy))
        .map(|&(dx, dy)| rotated.translated(dx, dy))
}
