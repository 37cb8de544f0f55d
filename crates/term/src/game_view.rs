//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure (no I/O), so layouts can be unit-tested.

use crate::core::{canonical_shape, GameSnapshot};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Phase, PieceKind, BOARD_COLS, BOARD_ROWS, LEADERBOARD_LIMIT};

const WELL_BG: Rgb = Rgb::new(25, 25, 35);
const PANEL_W: u16 = 18;
const RANKING_W: u16 = 24;
const NAME_W: usize = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// One leaderboard line as the view shows it
#[derive(Debug, Clone, PartialEq)]
pub struct RankRow {
    pub name: String,
    pub score: f64,
}

/// Front-end state that is not part of the game itself
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hud<'a> {
    pub muted: bool,
    /// Best scores, best first. The column is hidden while empty.
    pub ranking: &'a [RankRow],
}

pub struct GameView {
    /// Terminal columns per board cell; 2 keeps cells roughly square.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Redraw `fb` from scratch for this snapshot.
    pub fn render_into(&self, snap: &GameSnapshot, hud: Hud<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height);

        let well_w = u16::from(BOARD_COLS) * self.cell_w + 2;
        let well_h = u16::from(BOARD_ROWS) + 2;
        let ranking_w = if hud.ranking.is_empty() { 0 } else { 2 + RANKING_W };
        let total_w = well_w + 2 + PANEL_W + ranking_w;
        let left = viewport.width.saturating_sub(total_w) / 2;
        let top = viewport.height.saturating_sub(well_h) / 2;

        let frame_style = Style::plain(Rgb::new(190, 190, 200), Rgb::BLACK);
        fb.fill(left + 1, top + 1, well_w - 2, well_h - 2, ' ', Style::plain(WELL_BG, WELL_BG));
        fb.outline(left, top, well_w, well_h, frame_style);

        for y in 0..usize::from(BOARD_ROWS) {
            for x in 0..usize::from(BOARD_COLS) {
                let (cx, cy) = (x as u16, y as u16);
                match snap.cell_with_current(x, y) {
                    Some(kind) => self.block(fb, left, top, cx, cy, kind),
                    None if snap.is_ghost_at(x, y) => self.ghost(fb, left, top, cx, cy),
                    None => {}
                }
            }
        }

        let panel_x = left + well_w + 2;
        self.panel(fb, snap, hud, panel_x, top);
        if !hud.ranking.is_empty() {
            self.ranking(fb, hud.ranking, &snap.player, panel_x + PANEL_W + 2, top);
        }

        match snap.phase {
            Phase::NotStarted => self.banner(fb, left, top, well_w, well_h, &["PRESS ENTER", "SPEED: 1-5"]),
            Phase::Paused => self.banner(fb, left, top, well_w, well_h, &["PAUSED"]),
            Phase::Over => self.banner(fb, left, top, well_w, well_h, &["GAME OVER", "ENTER: AGAIN"]),
            Phase::Running => {}
        }
    }

    pub fn render(&self, snap: &GameSnapshot, hud: Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn block(&self, fb: &mut FrameBuffer, left: u16, top: u16, x: u16, y: u16, kind: PieceKind) {
        let style = Style::plain(Rgb::of(kind.color()), WELL_BG).bold();
        fb.fill(left + 1 + x * self.cell_w, top + 1 + y, self.cell_w, 1, '█', style);
    }

    fn ghost(&self, fb: &mut FrameBuffer, left: u16, top: u16, x: u16, y: u16) {
        let style = Style::plain(Rgb::new(120, 120, 130), WELL_BG).dim();
        fb.fill(left + 1 + x * self.cell_w, top + 1 + y, self.cell_w, 1, '░', style);
    }

    fn panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: Hud<'_>, x: u16, top: u16) {
        let label = Style::default().bold();
        let value = Style::default();

        let rows: [(&str, String); 5] = [
            ("PLAYER", snap.player.clone()),
            ("SCORE", snap.score.to_string()),
            ("HIGH SCORE", snap.high_score.to_string()),
            ("TIME", snap.clock()),
            ("SPEED", snap.speed.to_string()),
        ];
        let mut y = top;
        for (name, text) in rows.iter() {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, text, value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        if let Some(kind) = snap.next {
            self.preview(fb, x, y + 1, kind, false);
        }
        y += 6;

        fb.put_str(x, y, "HOLD", label);
        if let Some(kind) = snap.held {
            self.preview(fb, x, y + 1, kind, !snap.can_hold);
        }
        y += 6;

        let sound = if hud.muted { "SOUND OFF (m)" } else { "SOUND ON (m)" };
        fb.put_str(x, y, sound, Style::default().dim());
    }

    /// Leaderboard column; the current player's rows are bold.
    fn ranking(&self, fb: &mut FrameBuffer, rows: &[RankRow], player: &str, x: u16, top: u16) {
        fb.put_str(x, top, "TOP 10", Style::default().bold());
        for (i, row) in rows.iter().take(LEADERBOARD_LIMIT).enumerate() {
            let name: String = row.name.chars().take(NAME_W).collect();
            let line = format!("{:>2}. {:<w$} {:>6}", i + 1, name, row.score, w = NAME_W);
            let style = if row.name == player {
                Style::default().bold()
            } else {
                Style::default()
            };
            fb.put_str(x, top + 2 + i as u16, &line, style);
        }
    }

    /// Canonical shape of `kind`, dimmed when it cannot be used right now.
    fn preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, dim: bool) {
        let mut style = Style::plain(Rgb::of(kind.color()), Rgb::BLACK);
        if dim {
            style = style.dim();
        }
        for (col, row) in canonical_shape(kind).filled() {
            let px = x + col as u16 * self.cell_w;
            fb.fill(px, y + row as u16, self.cell_w, 1, '█', style);
        }
    }

    fn banner(&self, fb: &mut FrameBuffer, left: u16, top: u16, w: u16, h: u16, lines: &[&str]) {
        let style = Style::plain(Rgb::WHITE, Rgb::BLACK).bold();
        let first = top + h / 2 - lines.len() as u16 / 2;
        for (i, line) in lines.iter().enumerate() {
            let y = first + i as u16;
            fb.fill(left + 1, y, w - 2, 1, ' ', style);
            fb.put_centered(left, w, y, line, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> (GameView, Viewport) {
        (GameView::default(), Viewport::new(80, 24))
    }

    #[test]
    fn test_idle_screen_asks_to_start() {
        let (view, vp) = view();
        let fb = view.render(&GameSnapshot::default(), Hud::default(), vp);
        assert!(fb.contains_text("PRESS ENTER"));
        assert!(fb.contains_text("TIME"));
        assert!(fb.contains_text("2:00"));
    }

    #[test]
    fn test_paused_and_over_banners() {
        let (view, vp) = view();
        let mut snap = GameSnapshot {
            phase: Phase::Paused,
            ..GameSnapshot::default()
        };
        assert!(view.render(&snap, Hud::default(), vp).contains_text("PAUSED"));
        snap.phase = Phase::Over;
        assert!(view.render(&snap, Hud::default(), vp).contains_text("GAME OVER"));
    }

    #[test]
    fn test_locked_cells_are_drawn() {
        let (view, vp) = view();
        let mut snap = GameSnapshot {
            phase: Phase::Running,
            ..GameSnapshot::default()
        };
        snap.board[19] = [Some(PieceKind::I); 10];
        let fb = view.render(&snap, Hud::default(), vp);
        assert!(fb.contains_text(&"█".repeat(20)));
    }

    #[test]
    fn test_mute_state_is_shown() {
        let (view, vp) = view();
        let fb = view.render(&GameSnapshot::default(), Hud {
                muted: true,
                ..Hud::default()
            }, vp);
        assert!(fb.contains_text("SOUND OFF"));
    }

    #[test]
    fn test_ranking_column_only_when_known() {
        let (view, vp) = view();
        let snap = GameSnapshot::default();
        assert!(!view.render(&snap, Hud::default(), vp).contains_text("TOP 10"));

        let rows = [RankRow {
            name: "a-very-long-player-name".to_string(),
            score: 1200.0,
        }];
        let hud = Hud {
            ranking: &rows,
            ..Hud::default()
        };
        let fb = view.render(&snap, hud, vp);
        assert!(fb.contains_text("TOP 10"));
        assert!(fb.contains_text(" 1. a-very-long-   1200"));
        assert!(!fb.contains_text("player-name"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let _ = view.render(&GameSnapshot::default(), Hud::default(), Viewport::new(5, 3));
    }
}
