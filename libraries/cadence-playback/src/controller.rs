//! Playback controller for the player bar
//!
//! Owns the single media resource, applies transport requests to it and
//! folds the events it reports back into [`PlaybackState`].

use cadence_core::TrackId;
use crossbeam_channel::Receiver;
use tracing::{debug, warn};

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::resource::{
    EventSink, LoadGeneration, MediaEvent, MediaResource, Subscription, TaggedEvent,
    TrackSourceResolver,
};
use crate::types::{PlaybackConfig, PlaybackState};
use crate::volume::Volume;

type EndedCallback = Box<dyn FnMut(&TrackId)>;

/// Player-bar playback controller
///
/// Single-threaded. Requests to the resource are fire-and-forget; their
/// outcomes are queued by the resource and applied by
/// [`process_events`](Self::process_events). Each `load_track` starts a new
/// [`LoadGeneration`] and anything reported for an older one is discarded.
///
/// Dropping the controller releases the resource subscription.
pub struct PlaybackController<R: MediaResource> {
    resource: R,
    state: PlaybackState,
    volume: Volume,

    // Source assignment that events must match
    generation: LoadGeneration,

    // Optimistic seek awaiting the resource's confirmation
    seeking: bool,

    events: Receiver<TaggedEvent>,
    _subscription: Subscription,

    on_ended: Option<EndedCallback>,
    pending_events: Vec<PlaybackEvent>,
}

impl<R: MediaResource> PlaybackController<R> {
    /// Subscribe to `resource` and apply the configured volume
    pub fn new(mut resource: R, config: PlaybackConfig) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let subscription = resource.subscribe(EventSink::new(tx));

        let volume = Volume::new(config.initial_volume);
        resource.set_volume(volume.gain());

        Self {
            resource,
            state: PlaybackState::new(volume.level()),
            volume,
            generation: LoadGeneration::default(),
            seeking: false,
            events: rx,
            _subscription: subscription,
            on_ended: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Transport =====

    /// Assign a new source and start playing it
    ///
    /// Anything still in flight for the previous source is superseded. If
    /// the resource refuses to autoplay, the track stays loaded and paused.
    pub fn load_track(&mut self, track_id: TrackId, source_url: &str) -> Result<()> {
        if source_url.trim().is_empty() {
            return Err(PlaybackError::InvalidSource(track_id));
        }

        let before = self.state.clone();
        let previous_track_id = self.state.current_track_id.replace(track_id.clone());

        self.generation = self.generation.next();
        self.seeking = false;
        self.state.is_playing = false;
        self.state.is_loading = true;
        self.state.position_seconds = 0.0;
        self.state.duration_seconds = 0.0;
        self.state.load_error = None;

        debug!(
            track_id = %track_id,
            generation = self.generation.value(),
            url = %source_url,
            "Loading track"
        );

        self.resource.set_source(source_url, self.generation);
        self.resource.play();

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
        self.emit_if_changed(&before);

        Ok(())
    }

    /// Resolve the stream URL for `track_id` and load it
    pub fn load_from_resolver<S>(&mut self, track_id: TrackId, resolver: &S) -> Result<()>
    where
        S: TrackSourceResolver + ?Sized,
    {
        match resolver.resolve_stream_url(&track_id) {
            Some(url) => self.load_track(track_id, &url),
            None => Err(PlaybackError::UnresolvedTrack(track_id)),
        }
    }

    /// Request playback resume
    ///
    /// `is_playing` follows once the resource reports the outcome.
    pub fn play(&mut self) -> Result<()> {
        if !self.state.has_track() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        self.resource.play();
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) {
        let before = self.state.clone();

        self.resource.pause();
        self.state.is_playing = false;

        self.emit_if_changed(&before);
    }

    /// Move the playhead, clamped to `[0, duration]`
    pub fn seek(&mut self, target_seconds: f64) -> Result<()> {
        if !self.state.has_track() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if !target_seconds.is_finite() {
            return Err(PlaybackError::InvalidSeekPosition(target_seconds));
        }

        let before = self.state.clone();
        let position = target_seconds.clamp(0.0, self.state.duration_seconds);

        self.resource.set_position(position);
        self.state.position_seconds = position;
        // Media without metadata never confirms a seek
        self.seeking = self.state.duration_seconds > 0.0;

        self.emit_if_changed(&before);
        Ok(())
    }

    // ===== Volume =====

    /// Store a new volume level (clamped to 0.0-1.0)
    ///
    /// A level above zero also clears mute. Non-finite input is ignored.
    pub fn set_volume(&mut self, level: f64) {
        if !level.is_finite() {
            warn!(level, "Ignoring non-finite volume");
            return;
        }

        let before = self.state.clone();
        if self.volume.set_level(level) > 0.0 {
            self.volume.unmute();
        }
        self.apply_volume(&before);
    }

    /// Toggle the mute override
    pub fn toggle_mute(&mut self) {
        let before = self.state.clone();
        self.volume.toggle_mute();
        self.apply_volume(&before);
    }

    fn apply_volume(&mut self, before: &PlaybackState) {
        self.resource.set_volume(self.volume.gain());
        self.state.volume = self.volume.level();
        self.state.is_muted = self.volume.is_muted();

        if self.state.volume != before.volume || self.state.is_muted != before.is_muted {
            self.pending_events.push(PlaybackEvent::VolumeChanged {
                level: self.state.volume,
                is_muted: self.state.is_muted,
            });
        }
        self.emit_if_changed(before);
    }

    // ===== Resource events =====

    /// Register the end-of-track policy
    ///
    /// Called once per "ended" report for the current track. The controller
    /// never chooses the next track itself.
    pub fn on_ended(&mut self, callback: impl FnMut(&TrackId) + 'static) {
        self.on_ended = Some(Box::new(callback));
    }

    /// Apply everything the resource reported since the last call
    ///
    /// Returns the number of events applied; stale ones are not counted.
    pub fn process_events(&mut self) -> usize {
        let before = self.state.clone();
        let mut applied = 0;

        while let Ok(TaggedEvent { generation, event }) = self.events.try_recv() {
            if generation != self.generation || !self.state.has_track() {
                debug!(
                    event_generation = generation.value(),
                    current_generation = self.generation.value(),
                    event = ?event,
                    "Discarding stale media event"
                );
                continue;
            }

            self.apply(event);
            applied += 1;
        }

        self.emit_if_changed(&before);
        applied
    }

    fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Started | MediaEvent::PlayResolved => {
                self.state.is_playing = true;
            }
            MediaEvent::Paused => {
                self.state.is_playing = false;
            }
            MediaEvent::DurationKnown(duration) => {
                if duration.is_finite() && duration >= 0.0 {
                    self.state.duration_seconds = duration;
                    self.state.position_seconds = self.state.position_seconds.min(duration);
                    self.clear_unconfirmed_seek();
                } else {
                    debug!(duration, "Ignoring unusable duration");
                }
            }
            MediaEvent::PositionAdvanced(position) => {
                if !self.seeking && position.is_finite() {
                    self.state.position_seconds = self.clamp_position(position);
                }
            }
            MediaEvent::Seeked => {
                self.seeking = false;
            }
            MediaEvent::ReadyToPlay => {
                self.clear_unconfirmed_seek();
                self.state.is_loading = false;
            }
            MediaEvent::Ended => self.handle_ended(),
            MediaEvent::LoadFailed(message) => self.handle_load_failed(message),
            MediaEvent::PlayRejected(reason) => {
                self.state.is_playing = false;
                if let Some(track_id) = self.state.current_track_id.clone() {
                    debug!(track_id = %track_id, reason = %reason, "Play request rejected");
                    self.pending_events
                        .push(PlaybackEvent::AutoplayBlocked { track_id, reason });
                }
            }
        }
    }

    /// A seek issued while still loading may never see `Seeked`
    fn clear_unconfirmed_seek(&mut self) {
        if self.state.is_loading && self.seeking {
            debug!("Dropping seek issued before the media was ready");
            self.seeking = false;
        }
    }

    fn handle_ended(&mut self) {
        self.state.is_playing = false;
        self.seeking = false;

        let Some(track_id) = self.state.current_track_id.clone() else {
            return;
        };

        debug!(track_id = %track_id, "Track ended");
        self.pending_events.push(PlaybackEvent::TrackEnded {
            track_id: track_id.clone(),
        });

        if let Some(callback) = self.on_ended.as_mut() {
            callback(&track_id);
        }
    }

    fn handle_load_failed(&mut self, message: String) {
        self.state.is_playing = false;
        self.state.is_loading = false;
        self.state.load_error = Some(message.clone());

        if let Some(track_id) = self.state.current_track_id.clone() {
            warn!(track_id = %track_id, error = %message, "Failed to load track");
            self.pending_events
                .push(PlaybackEvent::LoadFailed { track_id, message });
        }
    }

    /// Re-read position and duration from the resource
    pub fn sync_from_resource(&mut self) {
        if !self.state.has_track() {
            return;
        }

        let before = self.state.clone();

        let duration = self.resource.current_duration();
        if duration.is_finite() && duration >= 0.0 {
            self.state.duration_seconds = duration;
        }
        let position = self.resource.current_position();
        if position.is_finite() {
            self.state.position_seconds = self.clamp_position(position);
        }

        self.emit_if_changed(&before);
    }

    fn clamp_position(&self, position: f64) -> f64 {
        let position = position.max(0.0);
        if self.state.duration_seconds > 0.0 {
            position.min(self.state.duration_seconds)
        } else {
            position
        }
    }

    // ===== State =====

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> PlaybackState {
        self.state.clone()
    }

    /// Currently loaded track
    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.state.current_track_id.as_ref()
    }

    /// Generation of the current source assignment
    pub fn generation(&self) -> LoadGeneration {
        self.generation
    }

    /// Whether an optimistic seek is awaiting confirmation
    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    /// The underlying media resource
    pub fn resource(&self) -> &R {
        &self.resource
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events queued since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_if_changed(&mut self, before: &PlaybackState) {
        if self.state != *before {
            self.pending_events.push(PlaybackEvent::StateChanged {
                state: self.state.clone(),
            });
        }
    }
}

impl<R: MediaResource + std::fmt::Debug> std::fmt::Debug for PlaybackController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("resource", &self.resource)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("seeking", &self.seeking)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeMediaResource;

    fn controller() -> (PlaybackController<FakeMediaResource>, FakeMediaResource) {
        let fake = FakeMediaResource::new();
        let controller = PlaybackController::new(fake.clone(), PlaybackConfig::default());
        (controller, fake)
    }

    #[test]
    fn starts_empty_at_configured_volume() {
        let fake = FakeMediaResource::new();
        let controller = PlaybackController::new(
            fake.clone(),
            PlaybackConfig {
                initial_volume: 0.4,
            },
        );

        assert_eq!(controller.state().current_track_id, None);
        assert_eq!(controller.state().volume, 0.4);
        assert_eq!(fake.volume(), 0.4);
        assert!(fake.has_subscriber());
    }

    #[test]
    fn load_track_requests_autoplay() {
        let (mut controller, fake) = controller();

        controller
            .load_track(TrackId::new("t1"), "http://host/media/audio/t1.mp3")
            .unwrap();

        assert_eq!(fake.source().as_deref(), Some("http://host/media/audio/t1.mp3"));
        assert_eq!(fake.play_calls(), 1);
        assert!(controller.state().is_loading);
        assert!(!controller.state().is_playing);
    }

    #[test]
    fn empty_source_is_rejected() {
        let (mut controller, fake) = controller();

        let err = controller.load_track(TrackId::new("t1"), "  ").unwrap_err();

        assert_eq!(err, PlaybackError::InvalidSource(TrackId::new("t1")));
        assert!(fake.sources().is_empty());
        assert_eq!(controller.state().current_track_id, None);
    }

    #[test]
    fn stale_generation_is_not_counted() {
        let (mut controller, fake) = controller();
        controller.load_track(TrackId::new("a"), "http://host/a").unwrap();
        let first = controller.generation();
        controller.load_track(TrackId::new("b"), "http://host/b").unwrap();

        fake.fire_for(first, MediaEvent::Started);
        fake.fire(MediaEvent::ReadyToPlay);

        assert_eq!(controller.process_events(), 1);
        assert!(!controller.state().is_playing);
        assert!(!controller.state().is_loading);
    }

    #[test]
    fn seek_clears_after_confirmation() {
        let (mut controller, fake) = controller();
        controller.load_track(TrackId::new("t1"), "http://host/t1").unwrap();
        fake.finish_loading(120.0);
        controller.process_events();

        controller.seek(60.0).unwrap();
        assert!(controller.is_seeking());

        fake.advance_to(10.0);
        controller.process_events();
        assert_eq!(controller.state().position_seconds, 60.0);

        fake.complete_seek();
        fake.advance_to(61.0);
        controller.process_events();
        assert!(!controller.is_seeking());
        assert_eq!(controller.state().position_seconds, 61.0);
    }
}
