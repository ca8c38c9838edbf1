//! Media resource abstraction
//!
//! The controller never touches a platform audio element directly. It talks
//! to a [`MediaResource`], which reports what happened through an
//! [`EventSink`]. Every report carries the [`LoadGeneration`] of the source
//! it belongs to, so the controller can recognise results that arrive after
//! the source was superseded.

use cadence_core::TrackId;
use crossbeam_channel::Sender;

/// Identifies one source assignment
///
/// Incremented by the controller on every `load_track`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    /// Generation following this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Something the media resource observed
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback started
    Started,
    /// Playback paused (including the implicit pause at end of track)
    Paused,
    /// Metadata loaded, duration in seconds
    DurationKnown(f64),
    /// Playback position advanced, in seconds
    PositionAdvanced(f64),
    /// A position change requested by `set_position` completed
    Seeked,
    /// Enough data is buffered to start playing
    ReadyToPlay,
    /// Reached the end of the track
    Ended,
    /// Hard load or decode failure
    LoadFailed(String),
    /// A `play()` request succeeded
    PlayResolved,
    /// A `play()` request was refused (autoplay policy, network)
    PlayRejected(String),
}

/// An event tagged with the source assignment it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedEvent {
    /// Generation that was current when the resource produced the event
    pub generation: LoadGeneration,
    /// What happened
    pub event: MediaEvent,
}

/// Sending half handed to a resource by `subscribe`
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<TaggedEvent>,
}

impl EventSink {
    /// Wrap a channel sender
    pub fn new(tx: Sender<TaggedEvent>) -> Self {
        Self { tx }
    }

    /// Queue an event for the controller
    ///
    /// Returns false once the controller is gone.
    pub fn emit(&self, generation: LoadGeneration, event: MediaEvent) -> bool {
        self.tx.send(TaggedEvent { generation, event }).is_ok()
    }
}

/// Guard for a resource event subscription
///
/// Dropping it detaches the listeners that feed the [`EventSink`].
#[must_use = "dropping a Subscription detaches the resource listeners"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Subscription that runs `release` when dropped
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Subscription with nothing to release
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Platform media element capability
///
/// `play` is fire-and-forget: its outcome is reported later as
/// [`MediaEvent::PlayResolved`] or [`MediaEvent::PlayRejected`], tagged with
/// the generation passed to the most recent `set_source`.
pub trait MediaResource {
    /// Assign a new source; subsequent events carry `generation`
    fn set_source(&mut self, url: &str, generation: LoadGeneration);

    /// Request playback start or resume
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead, in seconds
    fn set_position(&mut self, seconds: f64);

    /// Apply an output level (0.0-1.0)
    fn set_volume(&mut self, level: f64);

    /// Start delivering events into `sink`
    fn subscribe(&mut self, sink: EventSink) -> Subscription;

    /// Playhead as reported by the element, in seconds
    fn current_position(&self) -> f64;

    /// Duration as reported by the element, in seconds (0 if unknown)
    fn current_duration(&self) -> f64;
}

/// Resolves a track to its stream URL
pub trait TrackSourceResolver {
    /// Stream URL for `track_id`, if the track is known
    fn resolve_stream_url(&self, track_id: &TrackId) -> Option<String>;
}

impl<F> TrackSourceResolver for F
where
    F: Fn(&TrackId) -> Option<String>,
{
    fn resolve_stream_url(&self, track_id: &TrackId) -> Option<String> {
        self(track_id)
    }
}
