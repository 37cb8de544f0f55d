//! TerminalRenderer: writes framebuffers to the real terminal.
//!
//! The first frame (and any frame after a resize or [`invalidate`]) is drawn
//! in full; later frames only rewrite the horizontal spans that changed.
//!
//! [`invalidate`]: TerminalRenderer::invalidate

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

/// A run of changed glyphs on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct TerminalRenderer {
    out: io::Stdout,
    previous: Option<FrameBuffer>,
    active: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            previous: None,
            active: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.out.flush()?;
        self.active = true;
        self.previous = None;
        Ok(())
    }

    /// Undo [`enter`](Self::enter). Safe to call more than once.
    pub fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        let spans = match &self.previous {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                changed_spans(prev, frame)
            }
            _ => {
                self.out.queue(terminal::Clear(terminal::ClearType::All))?;
                full_spans(frame)
            }
        };

        let mut style: Option<Style> = None;
        for span in spans {
            self.out.queue(cursor::MoveTo(span.x, span.y))?;
            for x in span.x..span.x + span.len {
                let glyph = frame.get(x, span.y).unwrap_or_default();
                if style != Some(glyph.style) {
                    self.queue_style(glyph.style)?;
                    style = Some(glyph.style);
                }
                self.out.queue(Print(glyph.ch))?;
            }
        }
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        self.out.flush()?;

        match &mut self.previous {
            Some(prev) => prev.clone_from(frame),
            None => self.previous = Some(frame.clone()),
        }
        Ok(())
    }

    fn queue_style(&mut self, style: Style) -> Result<()> {
        self.out
            .queue(SetAttribute(Attribute::Reset))?
            .queue(SetForegroundColor(term_color(style.fg)))?
            .queue(SetBackgroundColor(term_color(style.bg)))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

fn term_color(rgb: Rgb) -> TermColor {
    TermColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn full_spans(frame: &FrameBuffer) -> Vec<Span> {
    (0..frame.height())
        .map(|y| Span {
            x: 0,
            y,
            len: frame.width(),
        })
        .collect()
}

/// Maximal runs of glyphs that differ between two same-sized frames.
pub fn changed_spans(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Span> {
    let mut spans = Vec::new();
    for y in 0..next.height() {
        let mut start: Option<u16> = None;
        for x in 0..next.width() {
            let differs = prev.get(x, y) != next.get(x, y);
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    spans.push(Span { x: s, y, len: x - s });
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            spans.push(Span {
                x: s,
                y,
                len: next.width() - s,
            });
        }
    }
    spans
}
