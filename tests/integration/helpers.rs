//! Shared fixtures for integration tests

use std::path::PathBuf;

use readalong::player::{FrameScheduler, PlaybackController};
use readalong::testing::FakeAudio;
use readalong::{SyncConfig, TimeIndex, ValidationMode};
use tempfile::TempDir;

pub type TestPlayer = PlaybackController<FakeAudio, FrameScheduler>;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Copy a fixture into a fresh temp dir.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::copy(fixtures_dir().join(name), &path).expect("copy fixture");
    (temp_dir, path)
}

pub fn load_fixture(name: &str) -> TimeIndex {
    TimeIndex::parse(fixtures_dir().join(name), ValidationMode::Trust).expect("load fixture")
}

/// A player with `name` loaded and metadata resolved.
pub fn loaded_player(name: &str, duration: f64) -> TestPlayer {
    let mut player = PlaybackController::new(
        FakeAudio::new(duration),
        FrameScheduler::new(),
        SyncConfig::default(),
    );
    player.load(name, load_fixture(name));
    player.pump();
    player
}

/// Advance the fake clock to `time` and run one frame.
pub fn frame_at(player: &mut TestPlayer, time: f64) -> (Option<usize>, Option<usize>) {
    player.audio_mut().set_clock(time);
    player.pump();
    (
        player.state().current_sentence,
        player.state().current_word,
    )
}
