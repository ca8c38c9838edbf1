//! Cadence - Playback Control
//!
//! Platform-agnostic playback control for the Cadence player bar.
//!
//! This crate provides:
//! - `PlaybackController`: owns one media resource, turns transport
//!   requests into resource calls and resource events into state
//! - Autoplay recovery (a refused `play()` leaves the track loaded and paused)
//! - Stale-result protection via load generations
//! - Volume with a transient mute override
//! - Player-bar display helpers and host-side track navigation
//!
//! # Architecture
//!
//! `cadence-playback` does not know about browsers:
//! - The media element is reached through the `MediaResource` trait
//! - Stream URLs come from a `TrackSourceResolver`
//! - `FakeMediaResource` is a scriptable in-memory resource
//! - With the `wasm` feature, `wasm::HtmlAudioResource` drives an `<audio>`
//!   element and `wasm::WasmPlaybackController` exposes it to JavaScript
//!
//! # Example
//!
//! ```rust
//! use cadence_core::TrackId;
//! use cadence_playback::{FakeMediaResource, PlaybackConfig, PlaybackController};
//!
//! let audio = FakeMediaResource::new();
//! let mut controller = PlaybackController::new(audio.clone(), PlaybackConfig::default());
//!
//! controller
//!     .load_track(TrackId::new("5f0c"), "http://localhost:8081/media/audio/5f0c.mp3")
//!     .unwrap();
//!
//! // The browser refuses to autoplay
//! audio.reject_next_play("NotAllowedError");
//! controller.process_events();
//!
//! assert!(!controller.state().is_playing);
//! assert_eq!(controller.state().current_track_id, Some(TrackId::new("5f0c")));
//! ```

mod controller;
mod error;
mod events;
mod fake;
mod navigator;
mod resource;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use fake::FakeMediaResource;
pub use navigator::TrackNavigator;
pub use resource::{
    EventSink, LoadGeneration, MediaEvent, MediaResource, Subscription, TaggedEvent,
    TrackSourceResolver,
};
pub use types::{PlaybackConfig, PlaybackState, TransportButton, VolumeIcon};
pub use volume::Volume;
