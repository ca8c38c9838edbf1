//! Main Cadence API client.

use cadence_core::{Playlist, PlaylistId, Song, TrackId};
use reqwest::Client;
use tracing::debug;

use crate::auth::{AuthClient, AuthContext};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::playlists::PlaylistsClient;
use crate::resolver::StreamResolver;
use crate::songs::SongsClient;
use crate::types::{SearchField, Session};
use crate::urls;

/// Main client for the Cadence API.
///
/// Holds no credentials. Authenticated calls take an [`AuthContext`]
/// explicitly, usually obtained from [`Session::auth`].
///
/// # Example
///
/// ```ignore
/// use cadence_client::{CadenceClient, ClientConfig, SearchField};
///
/// let client = CadenceClient::new(ClientConfig::load()?)?;
///
/// let session = client.login("ada@example.com", "hunter22").await?;
/// let auth = session.auth();
///
/// let songs = client.search(&auth, SearchField::Artist, "Miles").await?;
/// let resolver = client.resolver(&songs);
/// ```
#[derive(Debug, Clone)]
pub struct CadenceClient {
    http: Client,
    base_url: String,
}

impl CadenceClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        // Normalize URL
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("Cadence/{} (Web)", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Request)?;

        debug!(base_url = %base_url, timeout_ms = config.timeout_ms, "Created API client");

        Ok(Self { http, base_url })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the auth client for direct use.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    /// Get the songs client for direct use.
    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(&self.http, &self.base_url)
    }

    /// Get the playlists client for direct use.
    pub fn playlists_client(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(&self.http, &self.base_url)
    }

    // ===== Auth =====

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        self.auth().login(email, password).await
    }

    // ===== Songs =====

    /// Get all active songs (empty on failure).
    pub async fn all_songs(&self) -> Vec<Song> {
        self.songs().all_songs().await
    }

    /// Get a song by ID.
    pub async fn song(&self, auth: &AuthContext, id: &TrackId) -> Result<Song> {
        self.songs().song(auth, id).await
    }

    /// Search songs by artist, title or genre.
    pub async fn search(
        &self,
        auth: &AuthContext,
        field: SearchField,
        query: &str,
    ) -> Result<Vec<Song>> {
        self.songs().search(auth, field, query).await
    }

    /// Delete a song (admin only).
    pub async fn delete_song(&self, auth: &AuthContext, id: &TrackId) -> Result<()> {
        self.songs().delete_song(auth, id).await
    }

    // ===== Playlists =====

    /// Create a playlist.
    pub async fn create_playlist(&self, auth: &AuthContext, name: &str) -> Result<Playlist> {
        self.playlists_client().create_playlist(auth, name).await
    }

    /// Get the user's playlists.
    pub async fn playlists(&self, auth: &AuthContext) -> Result<Vec<Playlist>> {
        self.playlists_client().playlists(auth).await
    }

    /// Get a playlist by ID.
    pub async fn playlist(&self, auth: &AuthContext, id: &PlaylistId) -> Result<Playlist> {
        self.playlists_client().playlist(auth, id).await
    }

    /// Add a song to a playlist.
    pub async fn add_song(
        &self,
        auth: &AuthContext,
        playlist_id: &PlaylistId,
        song_id: &TrackId,
    ) -> Result<()> {
        self.playlists_client()
            .add_song(auth, playlist_id, song_id)
            .await
    }

    /// Remove a song from a playlist.
    pub async fn remove_song(
        &self,
        auth: &AuthContext,
        playlist_id: &PlaylistId,
        song_id: &TrackId,
    ) -> Result<()> {
        self.playlists_client()
            .remove_song(auth, playlist_id, song_id)
            .await
    }

    // ===== Media URLs =====

    /// Stream URL for a song's audio path (empty when it has no file name).
    pub fn stream_url(&self, audio_path: &str) -> String {
        urls::stream_url(&self.base_url, audio_path)
    }

    /// Cover image URL for a song's cover path.
    pub fn cover_url(&self, cover_path: Option<&str>) -> Option<String> {
        urls::cover_url(&self.base_url, cover_path)
    }

    /// Resolver over `songs` for the playback controller.
    pub fn resolver<'s>(&self, songs: impl IntoIterator<Item = &'s Song>) -> StreamResolver {
        StreamResolver::new(self.base_url.clone(), songs)
    }
}
