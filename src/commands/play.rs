//! Terminal read-along against a silent wall clock

use std::cell::Cell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::json;

use readalong::player::{
    format_duration, Callbacks, ClockAudio, IntervalScheduler, PlaybackController,
    PlaybackError, PlaybackObserver, PlaybackState,
};
use readalong::{Config, TimeIndex};

/// Shortest sleep between frames, so the loop never spins.
const MIN_FRAME_SLEEP: Duration = Duration::from_millis(1);

/// Prints sentences and words as they become highlighted.
///
/// Index callbacks arrive before the matching `on_change`, so they are
/// stashed and printed together with the clock time from the new state.
struct ReadAlongPrinter {
    index: TimeIndex,
    json: bool,
    sentence: Option<usize>,
    pending_sentence: Option<usize>,
    pending_word: Option<usize>,
}

impl ReadAlongPrinter {
    fn new(index: TimeIndex, json: bool) -> Self {
        Self {
            index,
            json,
            sentence: None,
            pending_sentence: None,
            pending_word: None,
        }
    }

    fn print_text(&mut self, state: &PlaybackState) {
        let mut out = io::stdout().lock();
        if let Some(s) = self.pending_sentence.take() {
            self.sentence = Some(s);
            if let Some(sentence) = self.index.sentence(s) {
                let _ = write!(
                    out,
                    "\n[{}] {}\n    ",
                    format_duration(state.current_time),
                    sentence.text
                );
            }
        }
        if let (Some(s), Some(w)) = (self.sentence, self.pending_word.take()) {
            if let Some(word) = self.index.word(s, w) {
                let _ = write!(out, "{} ", word.text);
            }
        }
        let _ = out.flush();
    }

    fn print_json(&mut self, state: &PlaybackState) {
        if let Some(s) = self.pending_sentence.take() {
            println!(
                "{}",
                json!({"event": "sentence", "index": s, "time": state.current_time})
            );
        }
        if let Some(w) = self.pending_word.take() {
            println!(
                "{}",
                json!({
                    "event": "word",
                    "sentence": state.current_sentence,
                    "index": w,
                    "time": state.current_time
                })
            );
        }
    }
}

impl PlaybackObserver for ReadAlongPrinter {
    fn on_change(&mut self, state: &PlaybackState) {
        if self.pending_sentence.is_none() && self.pending_word.is_none() {
            return;
        }
        if self.json {
            self.print_json(state);
        } else {
            self.print_text(state);
        }
    }

    fn on_sentence_change(&mut self, index: usize) {
        self.pending_sentence = Some(index);
    }

    fn on_word_change(&mut self, index: usize) {
        self.pending_word = Some(index);
    }

    fn on_ended(&mut self) {
        if self.json {
            println!("{}", json!({"event": "ended"}));
        } else {
            println!();
        }
    }
}

#[cfg(not(tarpaulin_include))]
pub fn handle(
    path: &Path,
    start: f64,
    rate: Option<f64>,
    duration: Option<f64>,
    strict: bool,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let index = super::load_index(path, strict, &config)?;
    if index.is_empty() {
        bail!("{} contains no sentences", path.display());
    }

    let duration = duration.unwrap_or_else(|| index.duration_hint());
    let rate = rate.unwrap_or(config.player.playback_rate);

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let ended = Rc::new(Cell::new(false));
    let ended_flag = Rc::clone(&ended);

    let mut player = PlaybackController::new(
        ClockAudio::new(duration),
        IntervalScheduler::new(config.player.frame_interval()),
        config.sync,
    );
    player.subscribe(ReadAlongPrinter::new(index.clone(), json));
    player.subscribe(Callbacks::new().on_ended(move || ended_flag.set(true)));

    player.load(&path.display().to_string(), index);
    player.pump();
    if let Some(err) = &player.state().error {
        bail!("{}", err);
    }

    player.set_playback_rate(rate)?;
    player.seek_to(start);
    player.play();

    while running.load(Ordering::SeqCst) && !ended.get() {
        player.pump();
        if let Some(err @ PlaybackError::PlaybackRejected(_)) = &player.state().error {
            bail!("{}", err);
        }
        std::thread::sleep(
            player
                .scheduler()
                .time_until_next_frame()
                .max(MIN_FRAME_SLEEP),
        );
    }

    let stopped_at = player.state().current_time;
    player.close_session();
    if !ended.get() {
        eprintln!("\nStopped at {}", format_duration(stopped_at));
    }
    Ok(())
}
