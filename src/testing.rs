//! Deterministic test doubles.
//!
//! `FakeAudio` is an [`AudioResource`] whose clock only moves when told to,
//! so sync behaviour can be checked tick by tick without wall-clock timing.
//! Pair it with [`FrameScheduler`](crate::player::FrameScheduler), where every
//! `pump` is one frame. [`Shared`] keeps a handle on a resource or scheduler
//! after the controller takes ownership of it.
//!
//! Built for this crate's own tests and behind the `testing` feature.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::player::{AudioError, AudioEvent, AudioResource, Scheduler, TickHandle};

/// Manually driven audio resource.
#[derive(Debug)]
pub struct FakeAudio {
    duration: f64,
    clock: f64,
    rate: f64,
    playing: bool,
    source: Option<String>,
    fail_next_load: Option<String>,
    reject_next_play: Option<String>,
    play_requests: usize,
    events: VecDeque<AudioEvent>,
}

impl FakeAudio {
    /// Media of `duration` seconds; metadata reports it on load.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            clock: 0.0,
            rate: 1.0,
            playing: false,
            source: None,
            fail_next_load: None,
            reject_next_play: None,
            play_requests: 0,
            events: VecDeque::new(),
        }
    }

    /// Move the playback clock as if audio had played up to `time`.
    pub fn set_clock(&mut self, time: f64) {
        self.clock = time;
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Play through to the end of the media.
    pub fn finish(&mut self) {
        self.clock = self.duration;
        self.playing = false;
        self.events.push_back(AudioEvent::Ended);
    }

    /// Make the next successful `load` report a deferred failure.
    pub fn fail_next_load(&mut self, reason: &str) {
        self.fail_next_load = Some(reason.to_string());
    }

    /// Make the next `play` request be declined.
    pub fn reject_next_play(&mut self, reason: &str) {
        self.reject_next_play = Some(reason.to_string());
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn play_requests(&self) -> usize {
        self.play_requests
    }

    pub fn loaded_source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl AudioResource for FakeAudio {
    fn load(&mut self, source: &str) -> Result<(), AudioError> {
        if source.is_empty() {
            return Err(AudioError::NotFound(source.to_string()));
        }
        self.source = Some(source.to_string());
        self.clock = 0.0;
        self.playing = false;
        match self.fail_next_load.take() {
            Some(reason) => self.events.push_back(AudioEvent::LoadFailed(reason)),
            None => self.events.push_back(AudioEvent::MetadataLoaded {
                duration: self.duration,
            }),
        }
        Ok(())
    }

    fn unload(&mut self) {
        self.source = None;
        self.playing = false;
        self.events.clear();
    }

    fn current_time(&self) -> f64 {
        self.clock
    }

    fn set_current_time(&mut self, time: f64) {
        self.clock = time;
    }

    fn play(&mut self) {
        self.play_requests += 1;
        match self.reject_next_play.take() {
            Some(reason) => self.events.push_back(AudioEvent::PlayRejected(reason)),
            None => {
                self.playing = true;
                self.events.push_back(AudioEvent::PlayStarted);
            }
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn poll_event(&mut self) -> Option<AudioEvent> {
        self.events.pop_front()
    }
}

/// A resource or scheduler that stays inspectable after being handed to a
/// controller, including after the controller is dropped.
#[derive(Debug, Default)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(inner: T) -> Self {
        Self(Rc::new(RefCell::new(inner)))
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: AudioResource> AudioResource for Shared<T> {
    fn load(&mut self, source: &str) -> Result<(), AudioError> {
        self.0.borrow_mut().load(source)
    }

    fn unload(&mut self) {
        self.0.borrow_mut().unload();
    }

    fn current_time(&self) -> f64 {
        self.0.borrow().current_time()
    }

    fn set_current_time(&mut self, time: f64) {
        self.0.borrow_mut().set_current_time(time);
    }

    fn play(&mut self) {
        self.0.borrow_mut().play();
    }

    fn pause(&mut self) {
        self.0.borrow_mut().pause();
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.0.borrow_mut().set_playback_rate(rate);
    }

    fn poll_event(&mut self) -> Option<AudioEvent> {
        self.0.borrow_mut().poll_event()
    }
}

impl<T: Scheduler> Scheduler for Shared<T> {
    fn request_tick(&mut self) -> TickHandle {
        self.0.borrow_mut().request_tick()
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.0.borrow_mut().cancel_tick(handle);
    }

    fn take_due(&mut self) -> Vec<TickHandle> {
        self.0.borrow_mut().take_due()
    }

    fn pending(&self) -> usize {
        self.0.borrow().pending()
    }
}
