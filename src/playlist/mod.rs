//! Playlist management for the background music player.
//!
//! The playlist is an ordered, non-empty sequence of tracks fixed at
//! startup. Track navigation wraps modularly in both directions.

use serde::{Deserialize, Serialize};

// ============================================================================
// Track
// ============================================================================

/// A single playable audio item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Source locator (`embedded:` id, file path or URL), resolved by the
    /// audio sink
    pub url: String,
}

impl Track {
    /// Creates a new track.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            url: url.into(),
        }
    }
}

// ============================================================================
// Playlist
// ============================================================================

/// An ordered, non-empty list of tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Creates a playlist from the given tracks.
    ///
    /// Returns an error if the track list is empty; every player operation
    /// assumes at least one track.
    pub fn new(tracks: Vec<Track>) -> Result<Self, String> {
        if tracks.is_empty() {
            return Err("プレイリストは空にできません".to_string());
        }
        Ok(Self { tracks })
    }

    /// Returns the bundled lofi playlist.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            tracks: vec![
                Track::new("Coding Night", "LoFi Dreamer", "embedded:coding-night"),
                Track::new("Lofi Beats", "arbrasbeats", "embedded:lofi-beats"),
                Track::new(
                    "Happy Thoughtful Song",
                    "SUNRIZISH",
                    "embedded:happy-thoughtful",
                ),
                Track::new(
                    "Good Night - Lofi Cozy Chill",
                    "FASSounds",
                    "embedded:good-night",
                ),
                Track::new("Lofi Beats", "arbrasbeats", "embedded:lofi-beats"),
                Track::new(
                    "Happy Thoughtful Song",
                    "SUNRIZISH",
                    "embedded:happy-thoughtful",
                ),
            ],
        }
    }

    /// Returns the number of tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; playlists are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns the track at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds. Indices produced by
    /// `next_index`/`prev_index` are always valid.
    #[must_use]
    pub fn track(&self, index: usize) -> &Track {
        &self.tracks[index]
    }

    /// Returns the index following `index`, wrapping to 0 at the end.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Returns the index preceding `index`, wrapping to the last track at 0.
    #[must_use]
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }

    /// Returns all tracks in order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::bundled()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tracks() -> Playlist {
        Playlist::new(vec![
            Track::new("A", "a", "a.mp3"),
            Track::new("B", "b", "b.mp3"),
            Track::new("C", "c", "c.mp3"),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        let result = Playlist::new(Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_bundled_is_non_empty() {
        let playlist = Playlist::bundled();
        assert!(!playlist.is_empty());
        assert_eq!(playlist.len(), 6);
        assert_eq!(playlist.track(0).title, "Coding Night");
        assert_eq!(playlist.track(0).artist, "LoFi Dreamer");
    }

    #[test]
    fn test_bundled_locators_resolve_to_embedded_tracks() {
        use crate::audio::{find_embedded_track, EMBEDDED_SCHEME};

        for track in Playlist::bundled().tracks() {
            let id = track
                .url
                .strip_prefix(EMBEDDED_SCHEME)
                .unwrap_or_else(|| panic!("'{}' is not an embedded locator", track.url));
            assert!(
                find_embedded_track(id).is_some(),
                "no embedded track for '{}'",
                track.url
            );
        }
    }

    #[test]
    fn test_next_index_wraps() {
        let playlist = three_tracks();
        assert_eq!(playlist.next_index(0), 1);
        assert_eq!(playlist.next_index(1), 2);
        assert_eq!(playlist.next_index(2), 0);
    }

    #[test]
    fn test_prev_index_wraps() {
        let playlist = three_tracks();
        assert_eq!(playlist.prev_index(0), 2);
        assert_eq!(playlist.prev_index(2), 1);
        assert_eq!(playlist.prev_index(1), 0);
    }

    #[test]
    fn test_next_then_prev_is_identity() {
        let playlist = three_tracks();
        for index in 0..playlist.len() {
            assert_eq!(playlist.prev_index(playlist.next_index(index)), index);
        }
    }

    #[test]
    fn test_single_track_wraps_to_itself() {
        let playlist = Playlist::new(vec![Track::new("Solo", "s", "solo.mp3")]).unwrap();
        assert_eq!(playlist.next_index(0), 0);
        assert_eq!(playlist.prev_index(0), 0);
    }

    #[test]
    fn test_track_serialize() {
        let track = Track::new("Coding Night", "LoFi Dreamer", "x.mp3");
        let json = serde_json::to_string(&track).unwrap();
        assert!(json.contains("\"title\":\"Coding Night\""));

        let deserialized: Track = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, track);
    }
}
