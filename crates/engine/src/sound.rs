//! Sound cue sinks
//!
//! Cues are fire-and-forget. A sink must return promptly and never report
//! failure back to the game.

use std::sync::{Arc, Mutex};

use rank_tetris_types::SoundCue;

pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Records cues in order; clones share one log.
#[derive(Debug, Clone, Default)]
pub struct SoundLog {
    cues: Arc<Mutex<Vec<SoundCue>>>,
}

impl SoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<SoundCue> {
        self.cues.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl SoundSink for SoundLog {
    fn play(&mut self, cue: SoundCue) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
    }
}
