/// Playlist domain type
use crate::types::{PlaylistId, Song, TrackId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A user's playlist with its songs in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Creation timestamp (server local time, no offset)
    pub created_at: NaiveDateTime,

    /// Songs in playlist order
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Playlist {
    /// Check if a song is in this playlist
    pub fn has_song(&self, song_id: &TrackId) -> bool {
        self.songs.iter().any(|song| &song.id == song_id)
    }

    /// Track IDs in playlist order
    pub fn track_ids(&self) -> Vec<TrackId> {
        self.songs.iter().map(|song| song.id.clone()).collect()
    }

    /// Sum of catalogue durations in seconds
    pub fn total_duration_seconds(&self) -> u64 {
        self.songs
            .iter()
            .map(|song| u64::from(song.duration_seconds))
            .sum()
    }
}
