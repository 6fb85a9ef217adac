//! Playback controller: owns the session, the resource, and the sync loop.
//!
//! Every transition is synchronous. The only deferred outcomes are the
//! resource's own (metadata, play acceptance, end of media); they are
//! drained from the resource in [`PlaybackController::pump`], which the host
//! calls once per display frame.

use tracing::{debug, trace, warn};

use crate::sync::{self, Position, SyncConfig};
use crate::timeindex::{Sentence, TimeIndex, Word};

use super::audio::{AudioEvent, AudioResource};
use super::error::{InvalidPlaybackRate, InvalidSeekTarget, PlaybackError};
use super::observer::PlaybackObserver;
use super::scheduler::{Scheduler, TickHandle};
use super::state::{PlaybackState, TickSnapshot};

/// Drives read-along sync for one audio resource at a time.
pub struct PlaybackController<A: AudioResource, S: Scheduler> {
    audio: A,
    scheduler: S,
    config: SyncConfig,

    // === Session ===
    source: Option<String>,
    index: Option<TimeIndex>,
    state: PlaybackState,

    // === Loop ownership ===
    /// The one outstanding tick request, present only while playing
    tick_handle: Option<TickHandle>,
    /// `play` requests the resource has not answered yet
    pending_plays: usize,
    /// The latest `play` request still stands (no `pause` since)
    play_wanted: bool,
    /// Ticks run since creation (for diagnostics)
    ticks: u64,

    observers: Vec<Box<dyn PlaybackObserver>>,
}

impl<A: AudioResource, S: Scheduler> PlaybackController<A, S> {
    pub fn new(audio: A, scheduler: S, config: SyncConfig) -> Self {
        Self {
            audio,
            scheduler,
            config,
            source: None,
            index: None,
            state: PlaybackState::default(),
            tick_handle: None,
            pending_plays: 0,
            play_wanted: false,
            ticks: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer for change notifications.
    pub fn subscribe(&mut self, observer: impl PlaybackObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn time_index(&self) -> Option<&TimeIndex> {
        self.index.as_ref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_session_open(&self) -> bool {
        self.index.is_some()
    }

    /// Whether a tick chain is currently scheduled.
    pub fn is_loop_running(&self) -> bool {
        self.tick_handle.is_some()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The sentence record for the highlighted sentence.
    pub fn current_sentence(&self) -> Option<&Sentence> {
        self.index.as_ref()?.sentence(self.state.current_sentence?)
    }

    /// The word record for the highlighted word.
    pub fn current_word(&self) -> Option<&Word> {
        self.index
            .as_ref()?
            .word(self.state.current_sentence?, self.state.current_word?)
    }

    // === Session lifecycle ===

    /// Open a session for `source` synchronized against `index`.
    ///
    /// Any previous session is closed first. The state resets to its initial
    /// values; `is_loaded` flips once the resource reports its metadata.
    pub fn load(&mut self, source: &str, index: TimeIndex) {
        self.close_session();

        debug!(
            source,
            sentences = index.len(),
            words = index.word_count(),
            "opening playback session"
        );
        self.source = Some(source.to_string());
        self.index = Some(index);
        self.state = PlaybackState::for_session(self.state.playback_rate);

        match self.audio.load(source) {
            Ok(()) => self.audio.set_playback_rate(self.state.playback_rate),
            Err(e) => {
                warn!(source, error = %e, "audio source failed to load");
                self.state.error = Some(PlaybackError::LoadFailure(e.to_string()));
            }
        }
        self.notify_change();
    }

    /// Unbind the resource and discard the session.
    ///
    /// The tick chain is cancelled before the resource is released, so no
    /// tick can observe a discarded session.
    pub fn close_session(&mut self) {
        if self.index.is_none() && self.source.is_none() {
            return;
        }
        debug!(source = ?self.source, ticks = self.ticks, "closing playback session");

        self.stop_loop();
        self.pending_plays = 0;
        self.play_wanted = false;
        self.audio.pause();
        self.audio.unload();
        self.source = None;
        self.index = None;
        self.state = PlaybackState::for_session(self.state.playback_rate);
    }

    // === Transport ===

    /// Request playback. No-op while playing or while a request is pending.
    ///
    /// Only the answer to the latest request is applied; answers to requests
    /// superseded by `pause` and a newer `play` are discarded.
    pub fn play(&mut self) {
        if self.state.is_playing || self.play_wanted {
            trace!("play ignored: already playing");
            return;
        }
        if self.index.is_none() {
            debug!("play ignored: no session");
            return;
        }
        if matches!(self.state.error, Some(PlaybackError::LoadFailure(_))) {
            debug!("play ignored: resource failed to load");
            return;
        }

        self.pending_plays += 1;
        self.play_wanted = true;
        self.audio.play();
    }

    /// Stop playback and the tick chain. Idempotent.
    pub fn pause(&mut self) {
        let was_wanted = std::mem::take(&mut self.play_wanted);
        if !self.state.is_playing && !was_wanted && self.tick_handle.is_none() {
            return;
        }

        self.audio.pause();
        self.stop_loop();
        if self.state.is_playing {
            self.state.is_playing = false;
            debug!(time = self.state.current_time, "paused");
            self.notify_change();
        }
    }

    pub fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move the clock to `time`, clamped to `[0, duration]`.
    ///
    /// The position is resolved afresh; a word retained through a gap before
    /// the seek is not carried over.
    pub fn seek_to(&mut self, time: f64) {
        if self.index.is_none() {
            debug!(time, "seek ignored: no session");
            return;
        }

        let target = self.state.clamp_time(time);
        self.audio.set_current_time(target);
        let position = self.resolve(target);
        trace!(requested = time, target, ?position, "seek");
        self.apply(target, position.sentence, position.word);
    }

    /// Seek to just before the start of a word.
    pub fn seek_to_word(&mut self, sentence: usize, word: usize) -> Result<(), InvalidSeekTarget> {
        let start = self.word_start(sentence, word).map_err(rejected_seek)?;
        self.seek_to(start - self.config.seek_lead_in);
        Ok(())
    }

    /// Seek to the start of a sentence.
    pub fn seek_to_sentence(&mut self, sentence: usize) -> Result<(), InvalidSeekTarget> {
        let start = self.sentence_start(sentence).map_err(rejected_seek)?;
        self.seek_to(start);
        Ok(())
    }

    /// Seek to the sentence after the current one (or after the current time
    /// when sitting in a gap).
    pub fn seek_to_next_sentence(&mut self) -> Result<(), InvalidSeekTarget> {
        let index = self.session_index().map_err(rejected_seek)?;
        let target = match self.state.current_sentence {
            Some(i) => i + 1,
            None => index
                .sentences()
                .iter()
                .position(|s| s.start_time > self.state.current_time)
                .unwrap_or(index.len()),
        };
        self.seek_to_sentence(target)
    }

    /// Seek to the sentence before the current one. From the first sentence
    /// (or before it) this restarts the first sentence.
    pub fn seek_to_previous_sentence(&mut self) -> Result<(), InvalidSeekTarget> {
        let index = self.session_index().map_err(rejected_seek)?;
        let target = match self.state.current_sentence {
            Some(i) => i.saturating_sub(1),
            None => index
                .sentences()
                .iter()
                .rposition(|s| s.end_time < self.state.current_time)
                .unwrap_or(0),
        };
        self.seek_to_sentence(target)
    }

    /// Change the playback speed. Indices are unaffected.
    pub fn set_playback_rate(&mut self, rate: f64) -> Result<(), InvalidPlaybackRate> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(InvalidPlaybackRate(rate));
        }
        if self.index.is_some() {
            self.audio.set_playback_rate(rate);
        }
        if self.state.playback_rate != rate {
            self.state.playback_rate = rate;
            self.notify_change();
        }
        Ok(())
    }

    /// Stop, rewind to 0 and clear the sync position. The session stays open.
    pub fn reset(&mut self) {
        self.pause();
        if self.index.is_some() {
            self.audio.set_current_time(0.0);
        }

        let before = TickSnapshot::of(&self.state);
        self.state.rewind();
        if TickSnapshot::of(&self.state) != before {
            self.notify_change();
        }
    }

    // === Frame callback ===

    /// Run due ticks, then apply the resource's deferred outcomes.
    ///
    /// Call once per host frame.
    pub fn pump(&mut self) {
        for handle in self.scheduler.take_due() {
            if self.tick_handle == Some(handle) {
                self.tick_handle = None;
                self.tick();
            } else {
                trace!(?handle, "ignoring stale tick");
            }
        }

        while let Some(event) = self.audio.poll_event() {
            self.handle_audio_event(event);
        }
    }

    fn tick(&mut self) {
        if !self.state.is_playing {
            return;
        }
        self.ticks += 1;

        let time = self.audio.current_time();
        let position = self.resolve(time);
        let word = match position {
            Position {
                sentence: Some(s),
                word: None,
            } if self.state.current_sentence == Some(s) => self.state.current_word,
            _ => position.word,
        };
        self.apply(time, position.sentence, word);

        if self.state.is_playing {
            self.start_loop();
        }
    }

    fn handle_audio_event(&mut self, event: AudioEvent) {
        if self.index.is_none() {
            trace!(?event, "ignoring audio event without a session");
            return;
        }

        match event {
            AudioEvent::MetadataLoaded { duration } => {
                debug!(duration, "audio metadata loaded");
                self.state.duration = duration.max(0.0);
                self.state.is_loaded = true;
                self.notify_change();
            }
            AudioEvent::LoadFailed(reason) => {
                warn!(%reason, "audio failed to load");
                self.stop_loop();
                self.play_wanted = false;
                self.state.is_playing = false;
                self.state.is_loaded = false;
                self.state.error = Some(PlaybackError::LoadFailure(reason));
                self.notify_change();
            }
            AudioEvent::PlayStarted => {
                if !self.take_play_answer() {
                    return;
                }
                if !self.play_wanted {
                    // Paused before the resource answered
                    self.audio.pause();
                    return;
                }
                self.play_wanted = false;
                debug!(time = self.state.current_time, "playback started");
                self.state.is_playing = true;
                self.state.error = None;
                self.start_loop();
                self.notify_change();
            }
            AudioEvent::PlayRejected(reason) => {
                if !self.take_play_answer() || !std::mem::take(&mut self.play_wanted) {
                    return;
                }
                warn!(%reason, "playback rejected");
                self.state.is_playing = false;
                self.state.error = Some(PlaybackError::PlaybackRejected(reason));
                self.notify_change();
            }
            AudioEvent::Ended => {
                debug!(ticks = self.ticks, "playback ended");
                self.stop_loop();
                self.play_wanted = false;
                self.state.is_playing = false;
                self.state.rewind();
                self.audio.set_current_time(0.0);
                for observer in self.observers.iter_mut() {
                    observer.on_ended();
                }
                self.notify_change();
            }
        }
    }

    // === Internals ===

    fn session_index(&self) -> Result<&TimeIndex, InvalidSeekTarget> {
        self.index.as_ref().ok_or(InvalidSeekTarget::NoSession)
    }

    fn sentence_start(&self, sentence: usize) -> Result<f64, InvalidSeekTarget> {
        let index = self.session_index()?;
        index
            .sentence(sentence)
            .map(|s| s.start_time)
            .ok_or(InvalidSeekTarget::Sentence {
                sentence,
                len: index.len(),
            })
    }

    fn word_start(&self, sentence: usize, word: usize) -> Result<f64, InvalidSeekTarget> {
        let index = self.session_index()?;
        let s = index.sentence(sentence).ok_or(InvalidSeekTarget::Sentence {
            sentence,
            len: index.len(),
        })?;
        s.words
            .get(word)
            .map(|w| w.start)
            .ok_or(InvalidSeekTarget::Word {
                sentence,
                word,
                len: s.words.len(),
            })
    }

    /// Account for one play answer. True when it answers the latest request.
    fn take_play_answer(&mut self) -> bool {
        match self.pending_plays {
            0 => {
                trace!("ignoring unsolicited play answer");
                false
            }
            n => {
                self.pending_plays = n - 1;
                if self.pending_plays > 0 {
                    trace!(pending = self.pending_plays, "ignoring superseded play answer");
                }
                self.pending_plays == 0
            }
        }
    }

    fn resolve(&self, time: f64) -> Position {
        match &self.index {
            Some(index) => sync::resolve(index, time, self.config.snap_threshold),
            None => Position::NONE,
        }
    }

    /// Store a new clock/position and notify on what changed.
    fn apply(&mut self, time: f64, sentence: Option<usize>, word: Option<usize>) {
        let previous = TickSnapshot::of(&self.state);
        let next = TickSnapshot {
            time,
            sentence,
            word,
        };
        if previous == next {
            return;
        }

        self.state.current_time = time;
        self.state.current_sentence = sentence;
        self.state.current_word = word;

        if sentence != previous.sentence {
            if let Some(index) = sentence {
                for observer in self.observers.iter_mut() {
                    observer.on_sentence_change(index);
                }
            }
        }
        if word != previous.word {
            if let Some(index) = word {
                for observer in self.observers.iter_mut() {
                    observer.on_word_change(index);
                }
            }
        }
        self.notify_change();
    }

    fn start_loop(&mut self) {
        if self.tick_handle.is_none() {
            self.tick_handle = Some(self.scheduler.request_tick());
        }
    }

    fn stop_loop(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel_tick(handle);
        }
    }

    fn notify_change(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.on_change(&self.state);
        }
    }
}

fn rejected_seek(err: InvalidSeekTarget) -> InvalidSeekTarget {
    debug!(error = %err, "seek rejected");
    err
}

impl<A: AudioResource, S: Scheduler> Drop for PlaybackController<A, S> {
    fn drop(&mut self) {
        self.stop_loop();
        self.audio.pause();
    }
}
