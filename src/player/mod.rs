//! Read-along playback
//!
//! Maps a continuously advancing audio clock onto the sentence/word
//! positions of a [`TimeIndex`](crate::timeindex::TimeIndex).
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: PlaybackState snapshot and the per-tick diff snapshot
//! - `controller`: PlaybackController, the sole owner and mutator of state
//! - `scheduler`: frame-aligned tick sources (host-driven and wall-clock paced)
//! - `audio`: the AudioResource seam and a silent wall-clock implementation
//! - `observer`: change notification contract
//! - `error`: error taxonomy
//!
//! # Usage
//!
//! ```
//! use readalong::player::{ClockAudio, FrameScheduler, PlaybackController};
//! use readalong::sync::SyncConfig;
//! use readalong::timeindex::{Sentence, TimeIndex, Word};
//!
//! let index = TimeIndex::new(vec![Sentence::new(
//!     "Hello world",
//!     0.0,
//!     2.5,
//!     vec![Word::new("Hello", 0.0, 1.0), Word::new("world", 1.5, 2.5)],
//! )]);
//!
//! let mut player = PlaybackController::new(
//!     ClockAudio::new(2.5),
//!     FrameScheduler::new(),
//!     SyncConfig::default(),
//! );
//! player.load("lesson-1", index);
//! player.pump(); // metadata
//! player.seek_to_word(0, 1).unwrap();
//! assert_eq!(player.state().current_word, Some(1));
//! ```

mod audio;
mod controller;
mod error;
mod observer;
mod scheduler;
pub mod state;

pub use audio::{AudioEvent, AudioResource, ClockAudio};
pub use controller::PlaybackController;
pub use error::{AudioError, InvalidPlaybackRate, InvalidSeekTarget, PlaybackError};
pub use observer::{Callbacks, EventLog, PlaybackObserver, SyncEvent};
pub use scheduler::{FrameScheduler, IntervalScheduler, Scheduler, TickHandle};
pub use state::{format_duration, PlaybackState};
