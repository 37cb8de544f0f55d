//! Leaderboard tests: handlers, file store and the reporter behind a session

use std::sync::Arc;

use rank_tetris::core::{Board, GameOptions, PlayerName, Randomizer};
use rank_tetris::engine::{GameSession, MemoryHighScore};
use rank_tetris::leaderboard::service::{query, submit};
use rank_tetris::leaderboard::{
    handle_get, handle_post, parse_entries, JsonFileLeaderboard, LeaderboardReporter,
    LeaderboardStore, MemoryLeaderboard,
};
use rank_tetris::types::{Direction, GameAction, PieceKind, LEADERBOARD_LIMIT};

#[test]
fn test_post_then_get_ranks_best_first() {
    let store = MemoryLeaderboard::new();
    for (name, score) in [("ana", 300), ("bo", 900), ("cy", 100), ("di", 900)] {
        let body = format!(r#"{{"name": "{name}", "score": {score}}}"#);
        assert_eq!(handle_post(&store, &body).status, 201);
    }

    let response = handle_get(&store);
    assert_eq!(response.status, 200);
    let entries = parse_entries(&response.body.to_string());
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["bo", "di", "ana", "cy"]);
}

#[test]
fn test_get_caps_at_ten() {
    let store = MemoryLeaderboard::new();
    for score in 0..15 {
        store.insert("p", f64::from(score)).unwrap();
    }
    let entries = parse_entries(&handle_get(&store).body.to_string());
    assert_eq!(entries.len(), LEADERBOARD_LIMIT);
    assert_eq!(entries[0].score, 14.0);
    assert_eq!(entries[9].score, 5.0);
}

#[test]
fn test_invalid_submissions_are_rejected() {
    let store = MemoryLeaderboard::new();
    for body in [
        r#"{"score": 10}"#,
        r#"{"name": "", "score": 10}"#,
        r#"{"name": 7, "score": 10}"#,
        r#"{"name": "ana"}"#,
        r#"{"name": "ana", "score": "ten"}"#,
        "not json",
    ] {
        let response = handle_post(&store, body);
        assert_eq!(response.status, 400, "{body}");
        assert!(response.error_message().is_some());
    }
    assert!(store.top(LEADERBOARD_LIMIT).unwrap().is_empty());
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.json");

    let store = JsonFileLeaderboard::new(&path);
    store.insert("ana", 120.0).unwrap();
    store.insert("bo", 80.0).unwrap();

    let reopened = JsonFileLeaderboard::new(&path);
    let top = reopened.top(LEADERBOARD_LIMIT).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "ana");
    assert_eq!(top[1].id, 2);
}

#[test]
fn test_async_handlers_on_a_runtime() {
    let store: Arc<dyn LeaderboardStore> = Arc::new(MemoryLeaderboard::new());

    let response = tokio_test::block_on(submit(
        store.clone(),
        r#"{"name": "ana", "score": 42}"#.to_string(),
    ));
    assert_eq!(response.status, 201);

    let response = tokio_test::block_on(query(store));
    let entries = parse_entries(&response.body.to_string());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].score, 42.0);
}

#[test]
fn test_finished_game_reaches_the_leaderboard() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileLeaderboard::new(dir.path().join("leaderboard.json")));
    let reporter = Arc::new(LeaderboardReporter::start(store).unwrap());

    let mut rows = vec![".........."; 2];
    rows.extend(std::iter::repeat("....OO....").take(17));
    rows.push("IIIIII....");
    let board = Board::from_ascii(&rows).unwrap();

    let options = GameOptions {
        randomizer: Randomizer::sequence(vec![PieceKind::I, PieceKind::O, PieceKind::O]),
        ..GameOptions::default()
    };
    let mut session = GameSession::new(
        PlayerName::parse("ana").unwrap(),
        options,
        Box::new(MemoryHighScore::new(0)),
    )
    .with_reporter(Box::new(reporter.clone()));
    let prepared = session.state().clone().with_board(board);
    *session.state_mut() = prepared;

    session.apply_action(GameAction::Start);
    session.state_mut().move_piece(Direction::Right);
    session.state_mut().move_piece(Direction::Right);
    session.apply_action(GameAction::HardDrop);
    session.apply_action(GameAction::HardDrop);
    assert!(session.state().is_over());

    let top = reporter.fetch_top();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "ana");
    assert_eq!(top[0].score, 100.0);
}

#[test]
fn test_broken_leaderboard_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.json");
    std::fs::write(&path, "{ not json").unwrap();

    let reporter = LeaderboardReporter::start(Arc::new(JsonFileLeaderboard::new(&path))).unwrap();
    assert!(reporter.fetch_top().is_empty());
}
