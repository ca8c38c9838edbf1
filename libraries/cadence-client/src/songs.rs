//! Song catalogue operations for the Cadence API.

use cadence_core::{validation, Song, TrackId};
use reqwest::Client;
use tracing::{debug, warn};

use crate::auth::AuthContext;
use crate::error::Result;
use crate::http::{fetch, send};
use crate::types::SearchField;

/// Song client for the Cadence API.
pub struct SongsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get all active songs.
    ///
    /// Public endpoint. Any failure is logged and yields an empty list so the
    /// home page can still render.
    pub async fn all_songs(&self) -> Vec<Song> {
        let url = format!("{}/api/songs", self.base_url);
        debug!(url = %url, "Fetching all songs");

        match fetch::<Vec<Song>>(self.http.get(&url), "song list").await {
            Ok(songs) => {
                debug!(count = songs.len(), "Fetched songs");
                songs
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch songs");
                Vec::new()
            }
        }
    }

    /// Get a song by ID.
    pub async fn song(&self, auth: &AuthContext, id: &TrackId) -> Result<Song> {
        let url = format!("{}/api/songs/{}", self.base_url, id);
        debug!(url = %url, "Fetching song");

        fetch(self.http.get(&url).bearer_auth(auth.token()), "song").await
    }

    /// Search songs by artist, title or genre.
    ///
    /// The query is trimmed and validated before anything is sent.
    pub async fn search(
        &self,
        auth: &AuthContext,
        field: SearchField,
        query: &str,
    ) -> Result<Vec<Song>> {
        let query = validation::validate_search_query(query)?;
        let url = format!("{}/api/songs/search/{}", self.base_url, field);
        debug!(url = %url, field = %field, query = %query, "Searching songs");

        let songs: Vec<Song> = fetch(
            self.http
                .get(&url)
                .query(&[(field.as_str(), query.as_str())])
                .bearer_auth(auth.token()),
            "search results",
        )
        .await?;

        debug!(count = songs.len(), "Search complete");
        Ok(songs)
    }

    /// Delete a song (admin only).
    pub async fn delete_song(&self, auth: &AuthContext, id: &TrackId) -> Result<()> {
        let url = format!("{}/api/admin/songs/{}", self.base_url, id);
        debug!(url = %url, "Deleting song");

        send(self.http.delete(&url).bearer_auth(auth.token())).await?;
        Ok(())
    }
}
