//! Stream URL resolution for the playback controller.

use cadence_core::{Song, TrackId};
use cadence_playback::TrackSourceResolver;
use std::collections::HashMap;

use crate::urls::stream_url;

/// Resolves track IDs to stream URLs from a known song list.
///
/// Built from whatever the current page has loaded (home, search results,
/// a playlist) and handed to `PlaybackController::load_from_resolver`.
#[derive(Debug, Clone, Default)]
pub struct StreamResolver {
    base_url: String,
    audio_paths: HashMap<TrackId, String>,
}

impl StreamResolver {
    /// Create a resolver for `base_url` knowing `songs`
    pub fn new<'s>(base_url: impl Into<String>, songs: impl IntoIterator<Item = &'s Song>) -> Self {
        let mut resolver = Self {
            base_url: base_url.into(),
            audio_paths: HashMap::new(),
        };
        resolver.extend(songs);
        resolver
    }

    /// Learn more songs (later entries replace earlier ones)
    pub fn extend<'s>(&mut self, songs: impl IntoIterator<Item = &'s Song>) {
        for song in songs {
            self.audio_paths
                .insert(song.id.clone(), song.audio_path.clone());
        }
    }

    /// Number of known songs
    pub fn len(&self) -> usize {
        self.audio_paths.len()
    }

    /// Check if no songs are known
    pub fn is_empty(&self) -> bool {
        self.audio_paths.is_empty()
    }
}

impl TrackSourceResolver for StreamResolver {
    fn resolve_stream_url(&self, track_id: &TrackId) -> Option<String> {
        let path = self.audio_paths.get(track_id)?;
        let url = stream_url(&self.base_url, path);
        (!url.is_empty()).then_some(url)
    }
}
