//! Audio resource abstraction.
//!
//! The engine never decodes audio. It needs a clock it can read and move,
//! a way to start and stop it, and a queue of deferred outcomes
//! (metadata, play acceptance, end of media).

use std::collections::VecDeque;
use std::time::Instant;

use super::error::AudioError;

/// Deferred outcome reported by an audio resource.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// Metadata resolved; duration is known
    MetadataLoaded { duration: f64 },
    /// The resource could not be loaded
    LoadFailed(String),
    /// A `play` request was accepted
    PlayStarted,
    /// A `play` request was declined (autoplay policy, device busy, ...)
    PlayRejected(String),
    /// Playback reached the end of the media
    Ended,
}

/// A playable resource exclusively owned by one controller.
pub trait AudioResource {
    /// Bind a new source. Returns an error only for failures detectable
    /// up front; later failures arrive as [`AudioEvent::LoadFailed`].
    fn load(&mut self, source: &str) -> Result<(), AudioError>;

    /// Release the current source and discard its pending outcomes.
    fn unload(&mut self);

    /// Current playback clock in seconds.
    fn current_time(&self) -> f64;

    /// Move the playback clock.
    fn set_current_time(&mut self, time: f64);

    /// Request playback. The outcome arrives as `PlayStarted` or
    /// `PlayRejected`, one per request, in request order.
    fn play(&mut self);

    fn pause(&mut self);

    fn set_playback_rate(&mut self, rate: f64);

    /// Next pending deferred outcome, if any.
    fn poll_event(&mut self) -> Option<AudioEvent>;
}

/// Silent media of a fixed duration driven by the wall clock.
///
/// Useful for read-along previews without an audio backend: time advances
/// from the instant `play` is accepted, scaled by the playback rate.
#[derive(Debug)]
pub struct ClockAudio {
    duration: f64,
    /// Wall clock time when playback started/resumed
    started_at: Option<Instant>,
    /// Media time at `started_at` (or the paused position)
    time_offset: f64,
    rate: f64,
    loaded: bool,
    ended: bool,
    events: VecDeque<AudioEvent>,
}

impl ClockAudio {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            started_at: None,
            time_offset: 0.0,
            rate: 1.0,
            loaded: false,
            ended: false,
            events: VecDeque::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Fold elapsed wall time into the offset and restart the clock.
    fn rebase(&mut self) {
        self.time_offset = self.current_time();
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }
}

impl AudioResource for ClockAudio {
    fn load(&mut self, source: &str) -> Result<(), AudioError> {
        if source.trim().is_empty() {
            return Err(AudioError::NotFound(source.to_string()));
        }
        // Remote sources need a real backend
        if let Some((scheme, _)) = source.split_once("://") {
            if !scheme.eq_ignore_ascii_case("file") {
                return Err(AudioError::Unsupported(source.to_string()));
            }
        }
        self.started_at = None;
        self.time_offset = 0.0;
        self.ended = false;
        self.loaded = true;
        self.events.clear();
        self.events.push_back(AudioEvent::MetadataLoaded {
            duration: self.duration,
        });
        Ok(())
    }

    fn unload(&mut self) {
        self.started_at = None;
        self.time_offset = 0.0;
        self.loaded = false;
        self.events.clear();
    }

    fn current_time(&self) -> f64 {
        let elapsed = self
            .started_at
            .map(|start| start.elapsed().as_secs_f64() * self.rate)
            .unwrap_or(0.0);
        (self.time_offset + elapsed).min(self.duration)
    }

    fn set_current_time(&mut self, time: f64) {
        self.time_offset = time.clamp(0.0, self.duration);
        self.ended = false;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    fn play(&mut self) {
        if !self.loaded {
            self.events
                .push_back(AudioEvent::PlayRejected("no source loaded".to_string()));
            return;
        }
        if self.started_at.is_none() {
            if self.ended || self.time_offset >= self.duration {
                self.time_offset = 0.0;
                self.ended = false;
            }
            self.started_at = Some(Instant::now());
        }
        self.events.push_back(AudioEvent::PlayStarted);
    }

    fn pause(&mut self) {
        self.time_offset = self.current_time();
        self.started_at = None;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rebase();
        self.rate = rate;
    }

    fn poll_event(&mut self) -> Option<AudioEvent> {
        if self.started_at.is_some() && !self.ended && self.current_time() >= self.duration {
            self.pause();
            self.ended = true;
            self.events.push_back(AudioEvent::Ended);
        }
        self.events.pop_front()
    }
}
