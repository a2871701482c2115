//! Lofidoro Library
//!
//! This library provides the core functionality for the lofidoro CLI,
//! a combined focus timer and lofi music player. It includes:
//! - Timer engine for work/break countdown cycles
//! - Playback engine driving a fixed lofi playlist
//! - Audio output abstractions with rodio-backed implementations
//! - Gradient theme selection (presets and custom stops)
//! - CLI argument parsing and terminal display utilities
//! - The interactive application loop tying everything together

pub mod app;
pub mod audio;
pub mod cli;
pub mod engine;
pub mod playlist;
pub mod theme;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    PlaybackState, StatusSnapshot, TimerPhase, TimerSettings, TimerState, DEFAULT_VOLUME,
};

// Re-export engine types
pub use engine::{PlaybackEngine, PlayerEvent, TimerEngine, TimerEvent};

// Re-export audio types
pub use audio::{
    embedded_locator, find_embedded_track, try_create_cue_player, try_create_sink, AudioError,
    AudioSink, CuePlayer, EmbeddedTrack, MockAudioSink, MockCuePlayer, NotificationCue,
    RodioAudioSink, RodioCuePlayer,
};

// Re-export playlist and theme types
pub use playlist::{Playlist, Track};
pub use theme::{find_preset, ColorStops, GradientPreset, GradientStop, ThemeMode, ThemeState};

// Re-export the application loop
pub use app::{App, Command};
