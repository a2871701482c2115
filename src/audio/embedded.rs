//! Embedded track data.
//!
//! This module describes the audio that is compiled into the binary, so
//! the bundled playlist plays without any external files or network
//! access. Each entry is a mellow three-note chord that the rodio sink
//! synthesizes at load time; the `embedded:` locator scheme selects an
//! entry by id.

/// Locator prefix for embedded tracks (e.g. `embedded:coding-night`).
pub const EMBEDDED_SCHEME: &str = "embedded:";

/// A synthesized track compiled into the binary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbeddedTrack {
    /// Stable identifier, referenced by `embedded:` locators
    pub id: &'static str,
    /// Chord frequencies in Hz (root, third, fifth)
    pub chord: [f32; 3],
    /// Track length in seconds
    pub seconds: u64,
}

/// The embedded tracks backing the bundled playlist.
pub const EMBEDDED_TRACKS: &[EmbeddedTrack] = &[
    EmbeddedTrack {
        id: "coding-night",
        chord: [220.00, 261.63, 329.63], // A minor
        seconds: 150,
    },
    EmbeddedTrack {
        id: "lofi-beats",
        chord: [174.61, 220.00, 261.63], // F major
        seconds: 120,
    },
    EmbeddedTrack {
        id: "happy-thoughtful",
        chord: [196.00, 246.94, 293.66], // G major
        seconds: 135,
    },
    EmbeddedTrack {
        id: "good-night",
        chord: [146.83, 174.61, 220.00], // D minor
        seconds: 180,
    },
];

/// Looks up an embedded track by id.
#[must_use]
pub fn find_embedded_track(id: &str) -> Option<&'static EmbeddedTrack> {
    EMBEDDED_TRACKS.iter().find(|t| t.id == id)
}

/// Returns the locator for an embedded track id.
#[must_use]
pub fn embedded_locator(id: &str) -> String {
    format!("{}{}", EMBEDDED_SCHEME, id)
}
