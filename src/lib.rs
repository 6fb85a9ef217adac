//! readalong - audio/text synchronization engine
//!
//! Maps a continuously advancing audio playback clock onto a discrete
//! position in a sentence → word timestamp index, for read-along
//! highlighting, word-level seeking and resumable playback.
//!
//! - [`timeindex`]: the immutable Sentence/Word timestamp structure
//! - [`sync`]: pure position resolution with gap snapping
//! - [`player`]: the playback controller, its scheduler and resource seams
//! - [`config`]: TOML configuration

pub mod cli;
pub mod config;
pub mod player;
pub mod sync;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod timeindex;

pub use config::Config;
pub use player::{PlaybackController, PlaybackState};
pub use sync::{resolve, Position, SyncConfig};
pub use timeindex::{Sentence, TimeIndex, ValidationMode, Word};
