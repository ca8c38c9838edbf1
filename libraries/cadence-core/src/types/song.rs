/// Song domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A song as listed by the catalogue API
///
/// `audio_path` and `cover_path` are server-side storage paths; turning them
/// into fetchable URLs is the API client's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: TrackId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Genre label
    pub genre: String,

    /// Catalogue duration in whole seconds
    pub duration_seconds: u32,

    /// Storage path of the audio file, e.g. `storage/audio/<uuid>_name.mp3`
    pub audio_path: String,

    /// Storage path of the cover art (optional)
    pub cover_path: Option<String>,
}

impl Song {
    /// Line shown under the title: "Artist" or "Artist - Album"
    pub fn subtitle(&self) -> String {
        match self.album.as_deref() {
            Some(album) if !album.is_empty() => format!("{} - {}", self.artist, album),
            _ => self.artist.clone(),
        }
    }
}
