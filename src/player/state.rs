//! Player state management
//!
//! Contains the `PlaybackState` snapshot collaborators read, and the
//! per-tick snapshot the controller diffs against.

use serde::Serialize;

use super::error::PlaybackError;

/// Public playback snapshot.
///
/// Only [`PlaybackController`](super::PlaybackController) mutates it;
/// collaborators receive it by reference or clone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    // === Playback timing ===
    /// Whether the resource is confirmed playing
    pub is_playing: bool,
    /// Last observed playback clock time in seconds
    pub current_time: f64,
    /// Media duration in seconds (0 until metadata resolves)
    pub duration: f64,
    /// Playback speed multiplier (1.0 = normal)
    pub playback_rate: f64,

    // === Sync position ===
    /// Highlighted sentence, `None` in gaps or out of range
    pub current_sentence: Option<usize>,
    /// Highlighted word, `None` when not yet determined
    pub current_word: Option<usize>,

    // === Resource ===
    /// Whether metadata has resolved
    pub is_loaded: bool,
    /// Last captured fault
    pub error: Option<PlaybackError>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            playback_rate: 1.0,
            current_sentence: None,
            current_word: None,
            is_loaded: false,
            error: None,
        }
    }
}

impl PlaybackState {
    /// Fresh state for a newly opened session, keeping the chosen rate.
    pub fn for_session(playback_rate: f64) -> Self {
        Self {
            playback_rate,
            ..Self::default()
        }
    }

    /// Clamp a seek target into `[0, duration]`.
    pub fn clamp_time(&self, time: f64) -> f64 {
        if time.is_nan() {
            return 0.0;
        }
        time.max(0.0).min(self.duration.max(0.0))
    }

    /// Playback progress in `[0, 1]`, or 0 with an unknown duration.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Rewind clock and sync position, keeping resource fields.
    pub(crate) fn rewind(&mut self) {
        self.current_time = 0.0;
        self.current_sentence = None;
        self.current_word = None;
    }
}

/// Values compared between consecutive ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TickSnapshot {
    pub time: f64,
    pub sentence: Option<usize>,
    pub word: Option<usize>,
}

impl TickSnapshot {
    pub fn of(state: &PlaybackState) -> Self {
        Self {
            time: state.current_time,
            sentence: state.current_sentence,
            word: state.current_word,
        }
    }
}

/// Format a duration in seconds to MM:SS format.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}
