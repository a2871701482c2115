//! Audio output boundary for lofidoro.
//!
//! The engines never touch audio hardware directly. They issue commands to
//! two collaborators defined here:
//!
//! - [`AudioSink`]: the music output. Accepts a source locator, supports
//!   play/pause, restart-from-beginning, volume in [0.0, 1.0], and reports
//!   when a track has finished playing naturally.
//! - [`CuePlayer`]: fire-and-forget playback of short notification cues
//!   (timer start, end of interval), independent of the music playlist.
//!
//! Rodio-backed implementations live in [`output`]; [`embedded`] describes
//! the compiled-in tracks behind `embedded:` locators. `MockAudioSink` and
//! `MockCuePlayer` record commands for tests and serve as the silent
//! fallback when no audio device is available.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

mod embedded;
mod error;
mod output;

pub use embedded::{
    embedded_locator, find_embedded_track, EmbeddedTrack, EMBEDDED_SCHEME, EMBEDDED_TRACKS,
};
pub use error::AudioError;
pub use output::{try_create_cue_player, try_create_sink, RodioAudioSink, RodioCuePlayer};

// ============================================================================
// NotificationCue
// ============================================================================

/// A short fixed audio cue, independent of the music playlist.
///
/// Timer transitions declare the cue they want played as an output value;
/// the caller executes it against a [`CuePlayer`]. This keeps the state
/// transitions testable without an audio subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCue {
    /// Played when a fresh countdown is started.
    Start,
    /// Played when a work or break interval reaches zero.
    IntervalEnd,
}

// ============================================================================
// AudioSink
// ============================================================================

/// Music output collaborator.
///
/// All methods are non-blocking. Implementations must tolerate calls in any
/// order; commands issued before a successful `load` are no-ops.
pub trait AudioSink {
    /// Loads the track at the given source locator, paused at the beginning.
    ///
    /// Replaces any previously loaded track.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be opened or decoded. The
    /// caller treats this as non-fatal.
    fn load(&self, locator: &str) -> Result<(), AudioError>;

    /// Starts or resumes playback of the loaded track.
    fn play(&self);

    /// Pauses playback.
    fn pause(&self);

    /// Rewinds the loaded track to the beginning.
    fn rewind(&self);

    /// Sets the output volume. Values are expected in [0.0, 1.0].
    fn set_volume(&self, volume: f32);

    /// Returns true if the loaded track has finished playing naturally.
    ///
    /// Returns false when no track is loaded.
    fn has_ended(&self) -> bool;
}

// ============================================================================
// CuePlayer
// ============================================================================

/// Notification cue collaborator.
pub trait CuePlayer {
    /// Plays a notification cue, fire-and-forget.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails. Callers log and continue.
    fn play_cue(&self, cue: NotificationCue) -> Result<(), AudioError>;

    /// Returns true if cue playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables cue playback.
    fn enable(&self);

    /// Disables cue playback.
    fn disable(&self);
}

// ============================================================================
// Mock implementations
// ============================================================================

/// A command recorded by [`MockAudioSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCommand {
    /// Load of the given source locator
    Load(String),
    /// Play command
    Play,
    /// Pause command
    Pause,
    /// Rewind command
    Rewind,
    /// Volume change
    SetVolume(f32),
}

/// Mock audio sink for testing and silent fallback.
///
/// Records every command it receives; `has_ended` and load failure are
/// controllable from tests.
#[derive(Debug, Default)]
pub struct MockAudioSink {
    commands: Mutex<Vec<SinkCommand>>,
    ended: AtomicBool,
    fail_load: AtomicBool,
}

impl MockAudioSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `load` calls fail.
    pub fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    /// Simulates the loaded track finishing naturally.
    pub fn set_ended(&self, ended: bool) {
        self.ended.store(ended, Ordering::SeqCst);
    }

    /// Returns all recorded commands in order.
    #[must_use]
    pub fn commands(&self) -> Vec<SinkCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// Returns the locators of all successful load commands, in order.
    #[must_use]
    pub fn loaded_locators(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                SinkCommand::Load(locator) => Some(locator.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clears the recorded commands.
    pub fn clear_commands(&self) {
        self.commands.lock().unwrap().clear();
    }

    fn record(&self, command: SinkCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

impl AudioSink for MockAudioSink {
    fn load(&self, locator: &str) -> Result<(), AudioError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(AudioError::SourceUnavailable(locator.to_string()));
        }
        self.ended.store(false, Ordering::SeqCst);
        self.record(SinkCommand::Load(locator.to_string()));
        Ok(())
    }

    fn play(&self) {
        self.record(SinkCommand::Play);
    }

    fn pause(&self) {
        self.record(SinkCommand::Pause);
    }

    fn rewind(&self) {
        self.record(SinkCommand::Rewind);
    }

    fn set_volume(&self, volume: f32) {
        self.record(SinkCommand::SetVolume(volume));
    }

    fn has_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }
}

/// Mock cue player for testing and silent fallback.
#[derive(Debug, Default)]
pub struct MockCuePlayer {
    cues: Mutex<Vec<NotificationCue>>,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl MockCuePlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `play_cue` calls fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Returns all cues played so far, in order.
    #[must_use]
    pub fn played_cues(&self) -> Vec<NotificationCue> {
        self.cues.lock().unwrap().clone()
    }

    /// Clears the recorded cues.
    pub fn clear_cues(&self) {
        self.cues.lock().unwrap().clear();
    }
}

impl CuePlayer for MockCuePlayer {
    fn play_cue(&self, cue: NotificationCue) -> Result<(), AudioError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(AudioError::PlaybackError("mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.cues.lock().unwrap().push(cue);
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sink_records_commands_in_order() {
        let sink = MockAudioSink::new();

        sink.load("a.mp3").unwrap();
        sink.play();
        sink.set_volume(0.5);
        sink.pause();
        sink.rewind();

        assert_eq!(
            sink.commands(),
            vec![
                SinkCommand::Load("a.mp3".to_string()),
                SinkCommand::Play,
                SinkCommand::SetVolume(0.5),
                SinkCommand::Pause,
                SinkCommand::Rewind,
            ]
        );
    }

    #[test]
    fn test_mock_sink_fail_load() {
        let sink = MockAudioSink::new();
        sink.set_fail_load(true);

        let result = sink.load("broken.mp3");
        assert!(result.is_err());
        assert!(sink.loaded_locators().is_empty());
    }

    #[test]
    fn test_mock_sink_load_clears_ended() {
        let sink = MockAudioSink::new();
        sink.set_ended(true);
        assert!(sink.has_ended());

        sink.load("next.mp3").unwrap();
        assert!(!sink.has_ended());
    }

    #[test]
    fn test_mock_cue_player_records_cues() {
        let player = MockCuePlayer::new();

        player.play_cue(NotificationCue::Start).unwrap();
        player.play_cue(NotificationCue::IntervalEnd).unwrap();

        assert_eq!(
            player.played_cues(),
            vec![NotificationCue::Start, NotificationCue::IntervalEnd]
        );
    }

    #[test]
    fn test_mock_cue_player_disabled_skips() {
        let player = MockCuePlayer::new();
        player.disable();
        assert!(player.is_disabled());

        player.play_cue(NotificationCue::Start).unwrap();
        assert!(player.played_cues().is_empty());

        player.enable();
        player.play_cue(NotificationCue::Start).unwrap();
        assert_eq!(player.played_cues().len(), 1);
    }

    #[test]
    fn test_mock_cue_player_failure() {
        let player = MockCuePlayer::new();
        player.set_should_fail(true);

        let result = player.play_cue(NotificationCue::IntervalEnd);
        assert!(result.is_err());
    }
}
