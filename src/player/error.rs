//! Playback error taxonomy.
//!
//! `PlaybackError` is what collaborators see in [`PlaybackState::error`]; it is
//! recorded, never returned. The other types are returned to callers of the
//! control surface and never stored.
//!
//! [`PlaybackState::error`]: super::PlaybackState::error

use serde::Serialize;

/// Runtime fault captured into the playback state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "reason")]
pub enum PlaybackError {
    /// The resource failed to load or its metadata could not be read.
    /// Cleared by a new `load`.
    #[error("Failed to load audio: {0}")]
    LoadFailure(String),

    /// The platform declined to start playback. Cleared by the next `play`.
    #[error("Playback was rejected: {0}")]
    PlaybackRejected(String),
}

/// Errors raised by an [`AudioResource`](super::AudioResource) synchronously.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    #[error("Audio source not found: {0}")]
    NotFound(String),

    #[error("Unsupported audio source: {0}")]
    Unsupported(String),
}

/// Sentence or word index passed to a seek helper is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSeekTarget {
    #[error("No time index is loaded")]
    NoSession,

    #[error("Sentence {sentence} is out of range ({len} sentences)")]
    Sentence { sentence: usize, len: usize },

    #[error("Word {word} of sentence {sentence} is out of range ({len} words)")]
    Word {
        sentence: usize,
        word: usize,
        len: usize,
    },
}

/// Playback rate must be finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Playback rate must be a positive number (got {0})")]
pub struct InvalidPlaybackRate(pub f64);
