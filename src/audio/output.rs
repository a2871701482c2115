//! Rodio-backed audio output.
//!
//! This module implements the [`AudioSink`] and [`CuePlayer`] collaborators
//! on top of rodio v0.20. Music tracks come from two locator schemes:
//! `embedded:` ids resolve to compiled-in synthesized tracks, anything else
//! is opened as a local file. Unreachable locators are reported as
//! `SourceUnavailable` and tolerated by the caller. Notification cues are
//! synthesized sine tones, so no audio assets need to ship with the binary.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::embedded::{find_embedded_track, EmbeddedTrack, EMBEDDED_SCHEME};
use super::error::AudioError;
use super::{AudioSink, CuePlayer, NotificationCue};

/// Amplitude applied to embedded synthesized tracks.
const TRACK_AMPLITUDE: f32 = 0.15;

/// Builds the rodio source for an embedded track: a soft sustained chord.
fn embedded_source(track: &EmbeddedTrack) -> impl Source<Item = f32> + Send {
    let [root, third, fifth] = track.chord;
    SineWave::new(root)
        .mix(SineWave::new(third))
        .mix(SineWave::new(fifth))
        .take_duration(Duration::from_secs(track.seconds))
        .amplify(TRACK_AMPLITUDE)
}

// ============================================================================
// RodioAudioSink
// ============================================================================

/// Music output backed by a rodio sink.
///
/// Playback is non-blocking. Loading a track replaces the previous sink,
/// which stops any prior playback and drops its queue.
pub struct RodioAudioSink {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Sink holding the currently loaded track, if any.
    sink: Mutex<Option<Sink>>,
    /// Last volume applied, re-applied to freshly created sinks.
    volume: Mutex<f32>,
}

impl RodioAudioSink {
    /// Creates a new music sink.
    ///
    /// # Errors
    ///
    /// Returns `AudioError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(initial_volume: f32) -> Result<Self, AudioError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: Mutex::new(None),
            volume: Mutex::new(initial_volume.clamp(0.0, 1.0)),
        })
    }

    fn open_decoder(locator: &str) -> Result<Decoder<BufReader<File>>, AudioError> {
        let path = Path::new(locator);
        let file = File::open(path)
            .map_err(|e| AudioError::SourceUnavailable(format!("{}: {}", locator, e)))?;

        Decoder::new(BufReader::new(file)).map_err(|e| AudioError::DecodeError(e.to_string()))
    }

    fn new_paused_sink(&self) -> Result<Sink, AudioError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::StreamError(e.to_string()))?;
        sink.set_volume(*self.volume.lock().unwrap());
        sink.pause();
        Ok(sink)
    }
}

impl AudioSink for RodioAudioSink {
    fn load(&self, locator: &str) -> Result<(), AudioError> {
        let sink = match locator.strip_prefix(EMBEDDED_SCHEME) {
            Some(id) => {
                let track = find_embedded_track(id)
                    .ok_or_else(|| AudioError::SourceUnavailable(locator.to_string()))?;
                let sink = self.new_paused_sink()?;
                sink.append(embedded_source(track));
                sink
            }
            None => {
                let decoder = Self::open_decoder(locator)?;
                let sink = self.new_paused_sink()?;
                sink.append(decoder);
                sink
            }
        };

        debug!("Loaded track: {}", locator);

        // Replaces and drops the previous sink, stopping its playback.
        *self.sink.lock().unwrap() = Some(sink);
        Ok(())
    }

    fn play(&self) {
        if let Some(sink) = self.sink.lock().unwrap().as_ref() {
            sink.play();
            debug!("Playback started");
        }
    }

    fn pause(&self) {
        if let Some(sink) = self.sink.lock().unwrap().as_ref() {
            sink.pause();
            debug!("Playback paused");
        }
    }

    fn rewind(&self) {
        if let Some(sink) = self.sink.lock().unwrap().as_ref() {
            if let Err(e) = sink.try_seek(Duration::ZERO) {
                debug!("Seek to start not supported: {:?}", e);
            }
        }
    }

    fn set_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        *self.volume.lock().unwrap() = volume;
        if let Some(sink) = self.sink.lock().unwrap().as_ref() {
            sink.set_volume(volume);
        }
    }

    fn has_ended(&self) -> bool {
        self.sink
            .lock()
            .unwrap()
            .as_ref()
            .map(|sink| sink.empty())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for RodioAudioSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudioSink")
            .field("volume", &*self.volume.lock().unwrap())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// RodioCuePlayer
// ============================================================================

/// Notification cue frequency and length for the start cue.
const START_CUE: (f32, u64) = (880.0, 200);

/// Notification cue frequency and length for the end-of-interval cue.
const INTERVAL_END_CUE: (f32, u64) = (660.0, 450);

/// Amplitude applied to cue tones.
const CUE_AMPLITUDE: f32 = 0.3;

/// Cue player that synthesizes short sine tones through rodio.
pub struct RodioCuePlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether cue playback is disabled.
    disabled: AtomicBool,
}

impl RodioCuePlayer {
    /// Creates a new cue player.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all cue playback is silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `AudioError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, AudioError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::DeviceNotAvailable(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play_cue(&self, cue: NotificationCue) -> Result<(), AudioError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Cue playback disabled, skipping");
            return Ok(());
        }

        let (frequency, millis) = match cue {
            NotificationCue::Start => START_CUE,
            NotificationCue::IntervalEnd => INTERVAL_END_CUE,
        };

        let tone = SineWave::new(frequency)
            .take_duration(Duration::from_millis(millis))
            .amplify(CUE_AMPLITUDE);

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::StreamError(e.to_string()))?;

        sink.append(tone);
        sink.detach(); // fire-and-forget, cue finishes in the background

        debug!("Cue playback started: {:?}", cue);
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Cue playback enabled");
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Cue playback disabled");
    }
}

impl std::fmt::Debug for RodioCuePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioCuePlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Creation helpers
// ============================================================================

/// Creates a music sink, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and the caller is
/// expected to fall back to a silent sink.
#[must_use]
pub fn try_create_sink(initial_volume: f32) -> Option<Arc<RodioAudioSink>> {
    match RodioAudioSink::new(initial_volume) {
        Ok(sink) => Some(Arc::new(sink)),
        Err(e) => {
            warn!("Audio not available, music output disabled: {}", e);
            None
        }
    }
}

/// Creates a cue player, returning None if audio is unavailable.
#[must_use]
pub fn try_create_cue_player(disabled: bool) -> Option<Arc<RodioCuePlayer>> {
    match RodioCuePlayer::new(disabled) {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, cues disabled: {}", e);
            None
        }
    }
}
