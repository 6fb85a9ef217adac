//! Change notification contract.

use std::cell::RefCell;
use std::rc::Rc;

use super::state::PlaybackState;

/// Receives playback notifications.
///
/// All methods default to no-ops so implementors only override what they need.
/// Index callbacks fire only when the index actually changed to a known value.
pub trait PlaybackObserver {
    /// Any field of the public state changed.
    fn on_change(&mut self, _state: &PlaybackState) {}

    fn on_sentence_change(&mut self, _index: usize) {}

    fn on_word_change(&mut self, _index: usize) {}

    /// Media played through to the end.
    fn on_ended(&mut self) {}
}

type IndexCallback = Box<dyn FnMut(usize)>;

/// Observer built from optional closures.
///
/// ```
/// use readalong::player::Callbacks;
///
/// let callbacks = Callbacks::new()
///     .on_sentence_change(|i| println!("sentence {}", i))
///     .on_ended(|| println!("done"));
/// ```
#[derive(Default)]
pub struct Callbacks {
    sentence: Option<IndexCallback>,
    word: Option<IndexCallback>,
    ended: Option<Box<dyn FnMut()>>,
    change: Option<Box<dyn FnMut(&PlaybackState)>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_sentence_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.sentence = Some(Box::new(f));
        self
    }

    pub fn on_word_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.word = Some(Box::new(f));
        self
    }

    pub fn on_ended(mut self, f: impl FnMut() + 'static) -> Self {
        self.ended = Some(Box::new(f));
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&PlaybackState) + 'static) -> Self {
        self.change = Some(Box::new(f));
        self
    }
}

impl PlaybackObserver for Callbacks {
    fn on_change(&mut self, state: &PlaybackState) {
        if let Some(f) = self.change.as_mut() {
            f(state);
        }
    }

    fn on_sentence_change(&mut self, index: usize) {
        if let Some(f) = self.sentence.as_mut() {
            f(index);
        }
    }

    fn on_word_change(&mut self, index: usize) {
        if let Some(f) = self.word.as_mut() {
            f(index);
        }
    }

    fn on_ended(&mut self) {
        if let Some(f) = self.ended.as_mut() {
            f();
        }
    }
}

/// A notification as recorded by [`EventLog`].
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    SentenceChanged(usize),
    WordChanged(usize),
    Ended,
}

/// Observer that appends notifications to a shared log.
///
/// Clones share the same log, so one clone can be registered with the
/// controller while another is read.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SyncEvent>>>,
    changes: Rc<RefCell<usize>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the recorded index/end notifications.
    pub fn drain(&self) -> Vec<SyncEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.borrow().clone()
    }

    /// Number of `on_change` notifications seen.
    pub fn change_count(&self) -> usize {
        *self.changes.borrow()
    }
}

impl PlaybackObserver for EventLog {
    fn on_change(&mut self, _state: &PlaybackState) {
        *self.changes.borrow_mut() += 1;
    }

    fn on_sentence_change(&mut self, index: usize) {
        self.events
            .borrow_mut()
            .push(SyncEvent::SentenceChanged(index));
    }

    fn on_word_change(&mut self, index: usize) {
        self.events.borrow_mut().push(SyncEvent::WordChanged(index));
    }

    fn on_ended(&mut self) {
        self.events.borrow_mut().push(SyncEvent::Ended);
    }
}
