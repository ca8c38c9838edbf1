//! Host-side track navigation
//!
//! The controller has no notion of ordering. Hosts that advance on
//! end-of-track keep the visible list here and ask it for neighbours.

use cadence_core::TrackId;

/// Ordered list of tracks for next/previous lookup (no wrap-around)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackNavigator {
    tracks: Vec<TrackId>,
}

impl TrackNavigator {
    /// Create from tracks in display order
    pub fn new(tracks: Vec<TrackId>) -> Self {
        Self { tracks }
    }

    /// Replace the list, e.g. after a search or playlist switch
    pub fn set_tracks(&mut self, tracks: Vec<TrackId>) {
        self.tracks = tracks;
    }

    /// Tracks in display order
    pub fn tracks(&self) -> &[TrackId] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t == id)
    }

    /// Track after `id`, or `None` at the end or if `id` is unknown
    pub fn next_after(&self, id: &TrackId) -> Option<&TrackId> {
        let index = self.position(id)?;
        self.tracks.get(index + 1)
    }

    /// Track before `id`, or `None` at the start or if `id` is unknown
    pub fn previous_before(&self, id: &TrackId) -> Option<&TrackId> {
        let index = self.position(id)?;
        index.checked_sub(1).and_then(|i| self.tracks.get(i))
    }
}

impl FromIterator<TrackId> for TrackNavigator {
    fn from_iter<I: IntoIterator<Item = TrackId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
