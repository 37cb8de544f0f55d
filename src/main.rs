//! Terminal runner (default binary).
//!
//! Resolves the player name and runs one session in the alternate screen.
//! The leaderboard is shown beside the board, refreshed once per finished
//! game, and printed again on exit. Logs go to a file because the terminal
//! is in raw mode while playing.

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use rank_tetris::core::{GameSnapshot, PlayerName};
use rank_tetris::engine::{
    FileHighScore, Frame, FrameClock, GameConfig, GameSession, NoopReporter, ScoreReporter,
    SoundSink, SystemClock,
};
use rank_tetris::input::{map_key, should_quit};
use rank_tetris::leaderboard::{JsonFileLeaderboard, LeaderboardEntry, LeaderboardReporter};
use rank_tetris::term::{FrameBuffer, GameView, Hud, RankRow, TerminalRenderer, Viewport};
use rank_tetris::types::SoundCue;

/// Upper bound on the wait for input between two frames.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config.log_path)?;
    info!("starting rank-tetris");

    let player = resolve_player(config.player.as_deref())?;

    let leaderboard = if config.leaderboard_enabled {
        let store = Arc::new(JsonFileLeaderboard::new(&config.leaderboard_path));
        match LeaderboardReporter::start(store) {
            Ok(reporter) => Some(Arc::new(reporter)),
            Err(err) => {
                warn!("leaderboard unavailable: {err:#}");
                None
            }
        }
    } else {
        None
    };
    let reporter: Box<dyn ScoreReporter> = match &leaderboard {
        Some(reporter) => Box::new(reporter.clone()),
        None => Box::new(NoopReporter),
    };

    let mut session = GameSession::new(
        player,
        config.game_options(0),
        Box::new(FileHighScore::new(&config.highscore_path)),
    )
    .with_sound(Box::new(BellSound))
    .with_reporter(reporter)
    .with_muted(config.muted);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session, leaderboard.as_deref());
    session.cancel();
    // Always try to restore terminal state.
    let _ = term.leave();
    result?;

    if let Some(leaderboard) = leaderboard {
        print_leaderboard(&leaderboard.fetch_top())?;
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut GameSession,
    leaderboard: Option<&LeaderboardReporter>,
) -> Result<()> {
    let clock = SystemClock;
    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut ranking = leaderboard.map(fetch_ranking).unwrap_or_default();
    // Game whose final score is already in `ranking`.
    let mut ranked_game = None;

    loop {
        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = map_key(key, session.state().phase()) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if session.on_frame(clock.now()) == Frame::Cancelled {
            return Ok(());
        }

        let state = session.state();
        if state.is_over() && ranked_game != Some(state.game_id()) {
            ranked_game = Some(state.game_id());
            if let Some(leaderboard) = leaderboard {
                ranking = fetch_ranking(leaderboard);
            }
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snapshot);
        let hud = Hud {
            muted: session.is_muted(),
            ranking: &ranking,
        };
        view.render_into(&snapshot, hud, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;
    }
}

/// Top entries after pending reports have been written.
fn fetch_ranking(leaderboard: &LeaderboardReporter) -> Vec<RankRow> {
    leaderboard
        .fetch_top()
        .into_iter()
        .map(|entry| RankRow {
            name: entry.name,
            score: entry.score,
        })
        .collect()
}

/// Terminal bell on the cues worth hearing; movement stays silent.
struct BellSound;

impl SoundSink for BellSound {
    fn play(&mut self, cue: SoundCue) {
        if matches!(
            cue,
            SoundCue::ClearLine | SoundCue::ClearTetris | SoundCue::GameOver
        ) {
            let mut out = io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_module_path(false)
        .init();
    Ok(())
}

/// Name from the environment, or asked for on stdin until a non-empty one
/// is given.
fn resolve_player(preset: Option<&str>) -> Result<PlayerName> {
    if let Some(raw) = preset {
        if let Ok(name) = PlayerName::parse(raw) {
            return Ok(name);
        }
        warn!("ignoring blank TETRIS_PLAYER");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Player name: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            bail!("no player name given");
        };
        match PlayerName::parse(&line?) {
            Ok(name) => return Ok(name),
            Err(err) => println!("{err}"),
        }
    }
}

fn print_leaderboard(entries: &[LeaderboardEntry]) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "LEADERBOARD")?;
    if entries.is_empty() {
        writeln!(out, "  (no scores yet)")?;
    }
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(out, "{:>3}. {:<20} {:>8}", rank + 1, entry.name, entry.score)?;
    }
    Ok(())
}
