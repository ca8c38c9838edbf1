//! Playlist operations for the Cadence API.

use cadence_core::{validation, Playlist, PlaylistId, TrackId};
use reqwest::Client;
use tracing::{debug, info};

use crate::auth::AuthContext;
use crate::error::Result;
use crate::http::{fetch, send};

/// Playlist client for the Cadence API.
///
/// Every call acts on the playlists of the user behind `auth`.
pub struct PlaylistsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Create a playlist; the name is trimmed and validated first.
    pub async fn create_playlist(&self, auth: &AuthContext, name: &str) -> Result<Playlist> {
        let name = validation::validate_playlist_name(name)?;
        let url = format!("{}/api/playlists", self.base_url);
        debug!(url = %url, name = %name, "Creating playlist");

        let playlist: Playlist = fetch(
            self.http
                .post(&url)
                .query(&[("name", name.as_str())])
                .json(&serde_json::json!({}))
                .bearer_auth(auth.token()),
            "playlist",
        )
        .await?;

        info!(playlist_id = %playlist.id, name = %playlist.name, "Playlist created");
        Ok(playlist)
    }

    /// Get the user's playlists.
    pub async fn playlists(&self, auth: &AuthContext) -> Result<Vec<Playlist>> {
        let url = format!("{}/api/playlists", self.base_url);
        debug!(url = %url, "Fetching playlists");

        fetch(self.http.get(&url).bearer_auth(auth.token()), "playlists").await
    }

    /// Get a playlist by ID.
    pub async fn playlist(&self, auth: &AuthContext, id: &PlaylistId) -> Result<Playlist> {
        let url = format!("{}/api/playlists/{}", self.base_url, id);
        debug!(url = %url, "Fetching playlist");

        fetch(self.http.get(&url).bearer_auth(auth.token()), "playlist").await
    }

    /// Add a song to a playlist.
    pub async fn add_song(
        &self,
        auth: &AuthContext,
        playlist_id: &PlaylistId,
        song_id: &TrackId,
    ) -> Result<()> {
        let url = self.song_url(playlist_id, song_id);
        debug!(url = %url, "Adding song to playlist");

        send(self.http.post(&url).bearer_auth(auth.token())).await?;
        Ok(())
    }

    /// Remove a song from a playlist.
    pub async fn remove_song(
        &self,
        auth: &AuthContext,
        playlist_id: &PlaylistId,
        song_id: &TrackId,
    ) -> Result<()> {
        let url = self.song_url(playlist_id, song_id);
        debug!(url = %url, "Removing song from playlist");

        send(self.http.delete(&url).bearer_auth(auth.token())).await?;
        Ok(())
    }

    fn song_url(&self, playlist_id: &PlaylistId, song_id: &TrackId) -> String {
        format!(
            "{}/api/playlists/{}/songs/{}",
            self.base_url, playlist_id, song_id
        )
    }
}
