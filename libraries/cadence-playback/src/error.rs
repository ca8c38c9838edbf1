//! Error types for playback control
//!
//! Only host-side contract violations are errors. Autoplay refusals, load
//! failures and stale results are state, not errors.

use cadence_core::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, PartialEq)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Seek target is not a finite number of seconds
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Source URL is empty
    #[error("Invalid source for track {0}: stream URL is empty")]
    InvalidSource(TrackId),

    /// Resolver had no stream URL for the track
    #[error("No stream URL for track {0}")]
    UnresolvedTrack(TrackId),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
