//! Piece catalog, legality predicate and wall-kick tests

use rank_tetris::core::{
    canonical_shape, is_valid_move, try_rotate, Board, GameOptions, GameState, Piece, PlayerName,
    Randomizer,
};
use rank_tetris::types::{Color, Direction, PieceKind};

#[test]
fn test_catalog_sizes_and_colors() {
    let expected = [
        (PieceKind::I, 4, Color::Cyan),
        (PieceKind::J, 3, Color::Blue),
        (PieceKind::L, 3, Color::Orange),
        (PieceKind::O, 2, Color::Yellow),
        (PieceKind::S, 3, Color::Green),
        (PieceKind::T, 3, Color::Purple),
        (PieceKind::Z, 3, Color::Red),
    ];
    for (kind, size, color) in expected {
        assert_eq!(canonical_shape(kind).size(), size, "{kind:?}");
        assert_eq!(kind.color(), color);
    }
}

#[test]
fn test_i_rotates_to_a_vertical_bar() {
    let vertical = canonical_shape(PieceKind::I).rotated_cw();
    let cells: Vec<_> = vertical.filled().collect();
    assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_validity_matches_definition() {
    let mut board = Board::new();
    board.set(3, 10, Some(PieceKind::Z));

    // Left wall
    let t = Piece::at(PieceKind::T, 0, 5);
    assert!(is_valid_move(&t, &board, 0, 0));
    assert!(!is_valid_move(&t, &board, -1, 0));

    // Right wall: T spans three columns from the anchor.
    let t = Piece::at(PieceKind::T, 7, 5);
    assert!(is_valid_move(&t, &board, 0, 0));
    assert!(!is_valid_move(&t, &board, 1, 0));

    // Floor
    let o = Piece::at(PieceKind::O, 4, 18);
    assert!(!is_valid_move(&o, &board, 0, 1));

    // Occupied cell
    let o = Piece::at(PieceKind::O, 2, 8);
    assert!(is_valid_move(&o, &board, 0, 0));
    assert!(!is_valid_move(&o, &board, 0, 1));

    // Above the top only walls and floor matter.
    let o = Piece::at(PieceKind::O, 3, -5);
    assert!(is_valid_move(&o, &board, 0, 0));
}

#[test]
fn test_validity_does_not_mutate_inputs() {
    let board = Board::from_ascii(&["IIIII....."]).unwrap();
    let piece = Piece::spawn(PieceKind::L);
    let (board_before, piece_before) = (board.clone(), piece);
    let _ = is_valid_move(&piece, &board, 3, 17);
    assert_eq!(board, board_before);
    assert_eq!(piece, piece_before);
}

#[test]
fn test_wall_kick_prefers_left_over_right_and_up() {
    let mut board = Board::new();
    board.set(5, 7, Some(PieceKind::Z));

    let piece = Piece::at(PieceKind::T, 4, 5);
    assert!(!is_valid_move(&piece.rotated(), &board, 0, 0));
    // All three nudges would work on their own.
    assert!(is_valid_move(&piece.rotated(), &board, -1, 0));
    assert!(is_valid_move(&piece.rotated(), &board, 1, 0));
    assert!(is_valid_move(&piece.rotated(), &board, 0, -1));

    let rotated = try_rotate(&piece, |p, dx, dy| is_valid_move(p, &board, dx, dy)).unwrap();
    assert_eq!((rotated.x, rotated.y), (3, 5));
}

#[test]
fn test_wall_kick_through_the_game() {
    let mut board = Board::new();
    board.set(5, 7, Some(PieceKind::Z));
    let options = GameOptions {
        randomizer: Randomizer::sequence(vec![PieceKind::T]),
        ..GameOptions::default()
    };
    let mut game = GameState::new(PlayerName::parse("kick").unwrap(), options).with_board(board);
    game.start();

    for _ in 0..5 {
        assert!(game.move_piece(Direction::Down));
    }
    assert!(game.rotate());
    let piece = game.current().unwrap();
    assert_eq!((piece.x, piece.y), (3, 5));
}

#[test]
fn test_rotation_fails_when_every_nudge_is_blocked() {
    // Vertical I against the right wall with the neighbouring column filled.
    let board = Board::from_ascii(&[
        "OOOOOOOO..",
        "OOOOOOOO..",
        "OOOOOOOO..",
        "OOOOOOOO..",
    ])
    .unwrap();
    let vertical = Piece::at(PieceKind::I, 6, 16).rotated();
    assert!(is_valid_move(&vertical, &board, 0, 0));
    assert!(try_rotate(&vertical, |p, dx, dy| is_valid_move(p, &board, dx, dy)).is_none());
}
