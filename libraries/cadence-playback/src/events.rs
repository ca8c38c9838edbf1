//! Playback Events
//!
//! Notifications queued by the controller for the host UI. Hosts call
//! [`crate::PlaybackController::drain_events`] after each batch of
//! operations or event pumps and re-render from them.

use cadence_core::TrackId;
use serde::{Deserialize, Serialize};

use crate::types::PlaybackState;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Any observable field of the state changed
    StateChanged {
        /// State after the change
        state: PlaybackState,
    },

    /// A new source was assigned
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Track finished playing naturally (reached end)
    TrackEnded {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// The resource refused to start playback; the track stays paused
    AutoplayBlocked {
        /// ID of the track that stayed paused
        track_id: TrackId,
        /// Reason reported by the resource
        reason: String,
    },

    /// The source could not be loaded
    LoadFailed {
        /// ID of the failed track
        track_id: TrackId,
        /// Error message
        message: String,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Stored level (0.0-1.0)
        level: f64,
        /// Whether audio is muted
        is_muted: bool,
    },
}
