//! Playback engine for the background music player.
//!
//! This module provides the playlist state machine:
//! - Play/pause toggle against the injected audio sink
//! - Modular next/previous track navigation
//! - Automatic advance when a track finishes naturally
//! - Volume control and a fixed-default mute toggle
//!
//! The engine never performs I/O itself; it issues commands to an
//! [`AudioSink`] and tolerates load failures as non-fatal. A track that
//! fails to load leaves `playing` potentially stale until the next user
//! action, by design.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::warn;

use crate::audio::AudioSink;
use crate::playlist::{Playlist, Track};
use crate::types::{PlaybackState, DEFAULT_VOLUME};

// ============================================================================
// PlayerEvent
// ============================================================================

/// Player events emitted for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The current track changed (manual navigation or auto-advance)
    TrackChanged {
        /// New playlist index
        index: usize,
    },
    /// Playback started or resumed
    Playing,
    /// Playback paused
    Paused,
    /// Volume changed (including mute toggles)
    VolumeChanged {
        /// New volume in [0.0, 1.0]
        volume: f32,
    },
}

// ============================================================================
// PlaybackEngine
// ============================================================================

/// State machine driving the playlist and the audio sink.
pub struct PlaybackEngine {
    /// The fixed, non-empty playlist
    playlist: Playlist,
    /// Current playback state
    state: PlaybackState,
    /// Injected audio output
    sink: Arc<dyn AudioSink>,
    /// Whether the current track loaded successfully
    loaded: bool,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<PlayerEvent>,
}

impl PlaybackEngine {
    /// Creates a new PlaybackEngine at track 0, paused, at the default volume.
    ///
    /// The first track is loaded eagerly so a later `play` starts
    /// immediately; a load failure is logged and tolerated.
    pub fn new(
        playlist: Playlist,
        sink: Arc<dyn AudioSink>,
        event_tx: mpsc::UnboundedSender<PlayerEvent>,
    ) -> Self {
        let state = PlaybackState::default();
        sink.set_volume(state.volume);

        let mut engine = Self {
            playlist,
            state,
            sink,
            loaded: false,
            event_tx,
        };
        engine.load_current();
        engine
    }

    /// Starts playback of the current track. No-op if already playing.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn play(&mut self) -> Result<()> {
        if self.state.playing {
            return Ok(());
        }

        self.state.playing = true;
        self.sink.play();

        self.event_tx
            .send(PlayerEvent::Playing)
            .context("Failed to send playing event")?;

        Ok(())
    }

    /// Pauses playback. No-op if already paused.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn pause(&mut self) -> Result<()> {
        if !self.state.playing {
            return Ok(());
        }

        self.state.playing = false;
        self.sink.pause();

        self.event_tx
            .send(PlayerEvent::Paused)
            .context("Failed to send paused event")?;

        Ok(())
    }

    /// Toggles between playing and paused.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn toggle(&mut self) -> Result<()> {
        if self.state.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Advances to the next track, wrapping to the first at the end.
    ///
    /// If playback was active it continues on the new track.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn next(&mut self) -> Result<()> {
        let index = self.playlist.next_index(self.state.current_index);
        self.change_track(index)
    }

    /// Goes back to the previous track, wrapping to the last at index 0.
    ///
    /// Same load/continue semantics as [`next`](Self::next).
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn previous(&mut self) -> Result<()> {
        let index = self.playlist.prev_index(self.state.current_index);
        self.change_track(index)
    }

    /// Handles the current track finishing naturally.
    ///
    /// Behaves identically to [`next`](Self::next) invoked while playing.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn on_track_ended(&mut self) -> Result<()> {
        self.next()
    }

    /// Sets the volume, clamped into [0.0, 1.0], applied immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        self.sink.set_volume(volume);

        self.event_tx
            .send(PlayerEvent::VolumeChanged { volume })
            .context("Failed to send volume changed event")?;

        Ok(())
    }

    /// Toggles mute.
    ///
    /// A non-zero volume drops to 0.0; a zero volume restores the fixed
    /// default (0.5). The pre-mute volume is not remembered; toggling mute
    /// twice from 0.7 ends at 0.5, not 0.7. Kept as documented behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn toggle_mute(&mut self) -> Result<()> {
        if self.state.volume > 0.0 {
            self.set_volume(0.0)
        } else {
            self.set_volume(DEFAULT_VOLUME)
        }
    }

    /// Returns a reference to the current playback state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Returns the current track.
    pub fn current_track(&self) -> &Track {
        self.playlist.track(self.state.current_index)
    }

    /// Returns the playlist.
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Returns true if a playing track has finished in the sink.
    ///
    /// Polled by the application on its 1-second tick to drive
    /// [`on_track_ended`](Self::on_track_ended). A track whose load failed
    /// never reports an end; the sink may still hold the previous track.
    pub fn track_has_ended(&self) -> bool {
        self.state.playing && self.loaded && self.sink.has_ended()
    }

    fn change_track(&mut self, index: usize) -> Result<()> {
        self.state.current_index = index;
        self.load_current();

        if self.state.playing {
            self.sink.play();
        }

        self.event_tx
            .send(PlayerEvent::TrackChanged { index })
            .context("Failed to send track changed event")?;

        Ok(())
    }

    /// Loads the current track into the sink, starting from the beginning.
    ///
    /// A failed load is logged and tolerated: `playing` may be stale until
    /// the next user action reconciles it. `loaded` is cleared on failure
    /// so end-of-track detection ignores whatever the sink still holds.
    fn load_current(&mut self) {
        let track = self.playlist.track(self.state.current_index);
        match self.sink.load(&track.url) {
            Ok(()) => {
                self.sink.rewind();
                self.loaded = true;
            }
            Err(e) => {
                self.loaded = false;
                warn!("Failed to load track '{}': {}", track.title, e);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
