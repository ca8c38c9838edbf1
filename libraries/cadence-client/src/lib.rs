//! Cadence API Client
//!
//! HTTP client library for the Cadence music streaming API.
//!
//! # Features
//!
//! - **Authentication**: Login with email/password; the user is read from
//!   the token claims for display
//! - **Songs**: Catalogue listing, search by artist/title/genre, admin delete
//! - **Playlists**: Create, list, add and remove songs
//! - **Streaming**: Stream and cover URLs, and a `StreamResolver` for the
//!   playback controller
//!
//! Credentials are never stored by the client: every authenticated call
//! takes an explicit `AuthContext`. An `ApiError::Unauthorized` means the
//! host should drop its session.
//!
//! # Example
//!
//! ```ignore
//! use cadence_client::{CadenceClient, ClientConfig};
//! use cadence_playback::{FakeMediaResource, PlaybackConfig, PlaybackController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CadenceClient::new(ClientConfig::load()?)?;
//!
//!     let songs = client.all_songs().await;
//!     let resolver = client.resolver(&songs);
//!
//!     let mut player = PlaybackController::new(FakeMediaResource::new(), PlaybackConfig::default());
//!     if let Some(song) = songs.first() {
//!         player.load_from_resolver(song.id.clone(), &resolver)?;
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod http;
mod playlists;
mod resolver;
mod songs;
mod types;
mod urls;

// Re-export main types
pub use auth::{AuthClient, AuthContext};
pub use client::CadenceClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use playlists::PlaylistsClient;
pub use resolver::StreamResolver;
pub use songs::SongsClient;
pub use types::{SearchField, Session};
pub use urls::{cover_url, stream_url};
