//! Position resolution: audio clock time → sentence/word indices.
//!
//! Everything here is pure. The stateful side (retaining a word through
//! gaps, diffing against the previous tick) belongs to
//! [`crate::player::PlaybackController`].

mod resolver;

use serde::{Deserialize, Serialize};

pub use resolver::{nearest_word, resolve, Position};

/// Default distance (seconds) within which an intra-sentence gap snaps to the nearest word.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.3;

/// Default lead (seconds) subtracted from a word's start when seeking to it.
pub const DEFAULT_SEEK_LEAD_IN: f64 = 0.05;

/// Tunable heuristics for sync.
///
/// Neither default has been tuned against real content; treat them as
/// starting points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum gap distance resolved to the nearest word
    pub snap_threshold: f64,
    /// Lead subtracted from a word's start time in `seek_to_word`
    pub seek_lead_in: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            seek_lead_in: DEFAULT_SEEK_LEAD_IN,
        }
    }
}
