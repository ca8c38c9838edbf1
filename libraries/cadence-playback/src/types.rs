//! Core types for playback control

use cadence_core::TrackId;
use serde::{Deserialize, Serialize};

/// Player-bar state
///
/// Owned by [`crate::PlaybackController`]; hosts only ever see it through
/// `state()` or an owned `snapshot()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Track whose source is currently assigned to the media resource
    pub current_track_id: Option<TrackId>,

    /// Whether the resource reports active playback
    pub is_playing: bool,

    /// True between source assignment and "ready to play"
    pub is_loading: bool,

    /// Current position in seconds
    pub position_seconds: f64,

    /// Track duration in seconds (0 until metadata loads)
    pub duration_seconds: f64,

    /// Stored volume (0.0-1.0), unaffected by mute
    pub volume: f64,

    /// Transient mute override
    pub is_muted: bool,

    /// Hard load failure reported for the current track
    pub load_error: Option<String>,
}

impl PlaybackState {
    /// Initial state: nothing loaded
    pub fn new(volume: f64) -> Self {
        Self {
            current_track_id: None,
            is_playing: false,
            is_loading: false,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            volume,
            is_muted: false,
            load_error: None,
        }
    }

    /// Check if a track is loaded
    pub fn has_track(&self) -> bool {
        self.current_track_id.is_some()
    }

    /// Check if the current track failed to load
    pub fn has_failed(&self) -> bool {
        self.load_error.is_some()
    }

    /// Progress through the track (0.0-100.0)
    pub fn progress_percent(&self) -> f64 {
        if self.duration_seconds <= 0.0 {
            return 0.0;
        }
        (self.position_seconds / self.duration_seconds * 100.0).clamp(0.0, 100.0)
    }

    /// Level actually applied to the resource
    pub fn effective_volume(&self) -> f64 {
        if self.is_muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Icon for the volume button
    pub fn volume_icon(&self) -> VolumeIcon {
        if self.is_muted || self.volume == 0.0 {
            VolumeIcon::Muted
        } else if self.volume < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }

    /// What the play/pause button shows
    pub fn transport_button(&self) -> TransportButton {
        if self.is_loading {
            TransportButton::Loading
        } else if self.is_playing {
            TransportButton::Pause
        } else {
            TransportButton::Play
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Volume button icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeIcon {
    /// Muted or level 0
    Muted,

    /// Level below one half
    Low,

    /// Level at or above one half
    High,
}

/// Play/pause button rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportButton {
    /// Spinner while the source loads
    Loading,

    /// Pause icon while playing
    Pause,

    /// Play icon otherwise
    Play,
}

/// Playback configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Volume applied on mount (0.0-1.0)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,
}

fn default_initial_volume() -> f64 {
    1.0
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
        }
    }
}
