//! Cadence Core
//!
//! Platform-agnostic domain types and helpers shared by the Cadence crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `User`, and their identifiers
//! - **Token display**: decoding JWT claims for showing who is signed in
//! - **Validation**: form and query checks applied before calling the API
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{format_duration, Song, TrackId};
//!
//! let song = Song {
//!     id: TrackId::new("5f0c"),
//!     title: "Blue in Green".to_string(),
//!     artist: "Miles Davis".to_string(),
//!     album: Some("Kind of Blue".to_string()),
//!     genre: "Jazz".to_string(),
//!     duration_seconds: 337,
//!     audio_path: "storage/audio/5f0c_blue_in_green.mp3".to_string(),
//!     cover_path: None,
//! };
//!
//! assert_eq!(format_duration(f64::from(song.duration_seconds)), "5:37");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod jwt;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use format::{format_duration, truncate_text};
pub use jwt::TokenClaims;
pub use types::{Playlist, PlaylistId, Role, Song, TrackId, User, UserId};
