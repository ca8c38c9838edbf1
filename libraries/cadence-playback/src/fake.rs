//! Scriptable in-memory media resource
//!
//! Records everything the controller asks of it and lets a test decide when
//! and how each request settles. Handles are cheap clones sharing one
//! resource, so a test keeps one and hands the other to the controller.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::resource::{EventSink, LoadGeneration, MediaEvent, MediaResource, Subscription};

/// In-memory [`MediaResource`] for tests and headless hosts
#[derive(Debug, Clone, Default)]
pub struct FakeMediaResource {
    inner: Rc<RefCell<FakeInner>>,
}

#[derive(Debug)]
struct FakeInner {
    sink: Option<EventSink>,
    generation: LoadGeneration,
    sources: Vec<String>,
    volume: f64,
    position: f64,
    duration: f64,
    play_calls: usize,
    pause_calls: usize,
    // Generation each outstanding play() request was made under
    pending_plays: VecDeque<LoadGeneration>,
}

impl Default for FakeInner {
    fn default() -> Self {
        Self {
            sink: None,
            generation: LoadGeneration::default(),
            sources: Vec::new(),
            volume: 1.0,
            position: 0.0,
            duration: 0.0,
            play_calls: 0,
            pause_calls: 0,
            pending_plays: VecDeque::new(),
        }
    }
}

impl FakeMediaResource {
    /// Create an idle resource with no source
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&self, generation: LoadGeneration, event: MediaEvent) {
        let sink = self.inner.borrow().sink.clone();
        if let Some(sink) = sink {
            sink.emit(generation, event);
        }
    }

    // ===== Scripting =====

    /// Report `event` for the current source
    pub fn fire(&self, event: MediaEvent) {
        let generation = self.inner.borrow().generation;
        self.emit(generation, event);
    }

    /// Report `event` tagged with an explicit generation
    pub fn fire_for(&self, generation: LoadGeneration, event: MediaEvent) {
        self.emit(generation, event);
    }

    /// Settle the oldest outstanding `play()` successfully
    ///
    /// The outcome carries the generation the request was made under.
    /// Returns false if nothing was pending.
    pub fn resolve_next_play(&self) -> bool {
        let Some(generation) = self.inner.borrow_mut().pending_plays.pop_front() else {
            return false;
        };
        self.emit(generation, MediaEvent::Started);
        self.emit(generation, MediaEvent::PlayResolved);
        true
    }

    /// Refuse the oldest outstanding `play()`
    pub fn reject_next_play(&self, reason: &str) -> bool {
        let Some(generation) = self.inner.borrow_mut().pending_plays.pop_front() else {
            return false;
        };
        self.emit(generation, MediaEvent::PlayRejected(reason.to_string()));
        true
    }

    /// Metadata arrives and the source becomes playable
    pub fn finish_loading(&self, duration: f64) {
        self.inner.borrow_mut().duration = duration;
        self.fire(MediaEvent::DurationKnown(duration));
        self.fire(MediaEvent::ReadyToPlay);
    }

    /// The current source fails to load
    pub fn fail_load(&self, message: &str) {
        self.fire(MediaEvent::LoadFailed(message.to_string()));
    }

    /// Playback reaches `seconds`
    pub fn advance_to(&self, seconds: f64) {
        self.inner.borrow_mut().position = seconds;
        self.fire(MediaEvent::PositionAdvanced(seconds));
    }

    /// A pending position change completes
    pub fn complete_seek(&self) {
        self.fire(MediaEvent::Seeked);
    }

    /// Playback runs off the end of the track
    pub fn end(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.position = inner.duration;
        }
        self.fire(MediaEvent::Paused);
        self.fire(MediaEvent::Ended);
    }

    // ===== Inspection =====

    /// Most recently assigned source
    pub fn source(&self) -> Option<String> {
        self.inner.borrow().sources.last().cloned()
    }

    /// Every source assigned so far, oldest first
    pub fn sources(&self) -> Vec<String> {
        self.inner.borrow().sources.clone()
    }

    /// Generation of the current source
    pub fn generation(&self) -> LoadGeneration {
        self.inner.borrow().generation
    }

    /// Last applied output level
    pub fn volume(&self) -> f64 {
        self.inner.borrow().volume
    }

    /// Playhead position
    pub fn position(&self) -> f64 {
        self.inner.borrow().position
    }

    /// Number of `play()` requests received
    pub fn play_calls(&self) -> usize {
        self.inner.borrow().play_calls
    }

    /// Number of `pause()` requests received
    pub fn pause_calls(&self) -> usize {
        self.inner.borrow().pause_calls
    }

    /// Number of `play()` requests not yet settled
    pub fn pending_play_count(&self) -> usize {
        self.inner.borrow().pending_plays.len()
    }

    /// Whether a subscription is currently attached
    pub fn has_subscriber(&self) -> bool {
        self.inner.borrow().sink.is_some()
    }
}

impl MediaResource for FakeMediaResource {
    fn set_source(&mut self, url: &str, generation: LoadGeneration) {
        let mut inner = self.inner.borrow_mut();
        inner.sources.push(url.to_string());
        inner.generation = generation;
        inner.position = 0.0;
        inner.duration = 0.0;
    }

    fn play(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.play_calls += 1;
        let generation = inner.generation;
        inner.pending_plays.push_back(generation);
    }

    fn pause(&mut self) {
        self.inner.borrow_mut().pause_calls += 1;
        self.fire(MediaEvent::Paused);
    }

    fn set_position(&mut self, seconds: f64) {
        self.inner.borrow_mut().position = seconds;
    }

    fn set_volume(&mut self, level: f64) {
        self.inner.borrow_mut().volume = level;
    }

    fn subscribe(&mut self, sink: EventSink) -> Subscription {
        self.inner.borrow_mut().sink = Some(sink);

        let weak: Weak<RefCell<FakeInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().sink = None;
            }
        })
    }

    fn current_position(&self) -> f64 {
        self.inner.borrow().position
    }

    fn current_duration(&self) -> f64 {
        self.inner.borrow().duration
    }
}
