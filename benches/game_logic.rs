use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rank_tetris::core::{clear_completed, Board, GameOptions, GameState, PlayerName, Randomizer};
use rank_tetris::engine::{FrameClock, ManualClock, TimingController};
use rank_tetris::types::{Direction, PieceKind};

fn running_game() -> GameState {
    let options = GameOptions {
        randomizer: Randomizer::bag(12345),
        ..GameOptions::default()
    };
    let mut state = GameState::new(PlayerName::parse("bench").unwrap(), options);
    state.start();
    state
}

fn bench_frame(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut timing = TimingController::new();
    let mut state = running_game();
    timing.advance(clock.now(), &mut state);

    c.bench_function("frame_16ms", |b| {
        b.iter(|| {
            if state.is_over() {
                state.restart();
            }
            timing.advance(black_box(clock.advance_ms(16)), &mut state);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let board = Board::from_ascii(&["IIIIIIIIII"; 4]).unwrap();

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| clear_completed(black_box(&board)))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = running_game();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.is_over() {
                state.restart();
            }
            state.hard_drop();
            state.drain_events();
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = running_game();

    c.bench_function("move_sideways", |b| {
        b.iter(|| {
            state.move_piece(black_box(Direction::Right));
            state.move_piece(black_box(Direction::Left));
            state.drain_events();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let options = GameOptions {
        randomizer: Randomizer::sequence(vec![PieceKind::T]),
        ..GameOptions::default()
    };
    let mut state = GameState::new(PlayerName::parse("bench").unwrap(), options);
    state.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate();
            state.drain_events();
        })
    });
}

criterion_group!(
    benches,
    bench_frame,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
