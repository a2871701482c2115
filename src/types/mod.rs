//! Core data types for lofidoro.
//!
//! This module defines the data structures shared across the application:
//! - Timer phase, settings and state
//! - Playback state for the music player
//! - Status snapshot serialization

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents which half of the focus cycle is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Focused work interval
    Work,
    /// Break interval
    Break,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Work => "work",
            TimerPhase::Break => "break",
        }
    }

    /// Returns the opposite phase.
    #[must_use]
    pub fn flipped(&self) -> Self {
        match self {
            TimerPhase::Work => TimerPhase::Break,
            TimerPhase::Break => TimerPhase::Work,
        }
    }
}

impl Default for TimerPhase {
    fn default() -> Self {
        TimerPhase::Work
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// Minimum and maximum work duration in minutes.
pub const WORK_MINUTES_RANGE: (u32, u32) = (1, 60);

/// Minimum and maximum break duration in minutes.
pub const BREAK_MINUTES_RANGE: (u32, u32) = (1, 30);

/// User-configurable durations for the focus timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Work duration in minutes (1-60)
    pub work_minutes: u32,
    /// Break duration in minutes (1-30)
    pub break_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl TimerSettings {
    /// Creates settings with the given durations.
    #[must_use]
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_minutes,
            break_minutes,
        }
    }

    /// Validates the settings.
    ///
    /// Returns an error message if a duration is out of range.
    pub fn validate(&self) -> Result<(), String> {
        let (work_min, work_max) = WORK_MINUTES_RANGE;
        if self.work_minutes < work_min || self.work_minutes > work_max {
            return Err(format!(
                "作業時間は{}-{}分の範囲で指定してください",
                work_min, work_max
            ));
        }
        let (break_min, break_max) = BREAK_MINUTES_RANGE;
        if self.break_minutes < break_min || self.break_minutes > break_max {
            return Err(format!(
                "休憩時間は{}-{}分の範囲で指定してください",
                break_min, break_max
            ));
        }
        Ok(())
    }

    /// Returns a copy with both durations clamped into their valid ranges.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            work_minutes: self
                .work_minutes
                .clamp(WORK_MINUTES_RANGE.0, WORK_MINUTES_RANGE.1),
            break_minutes: self
                .break_minutes
                .clamp(BREAK_MINUTES_RANGE.0, BREAK_MINUTES_RANGE.1),
        }
    }

    /// Returns the full duration of the given phase in seconds.
    #[must_use]
    pub fn duration_for(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::Work => self.work_minutes * 60,
            TimerPhase::Break => self.break_minutes * 60,
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the focus timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Remaining seconds in the current phase
    pub remaining_seconds: u32,
    /// Whether the countdown is running
    pub running: bool,
    /// Configured durations
    pub settings: TimerSettings,
}

impl TimerState {
    /// Creates a new TimerState at a fresh work interval, not running.
    pub fn new(settings: TimerSettings) -> Self {
        let settings = settings.clamped();
        Self {
            phase: TimerPhase::Work,
            remaining_seconds: settings.duration_for(TimerPhase::Work),
            running: false,
            settings,
        }
    }

    /// Returns the full duration of the current phase in seconds.
    #[must_use]
    pub fn full_duration(&self) -> u32 {
        self.settings.duration_for(self.phase)
    }

    /// Returns true if the timer sits at a fresh, unstarted countdown.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.remaining_seconds == self.full_duration()
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the countdown has reached 0 (including the case
    /// where it was already 0 before the call).
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }
        self.remaining_seconds == 0
    }

    /// Flips to the opposite phase with its full duration and stops running.
    pub fn flip_phase(&mut self) {
        self.phase = self.phase.flipped();
        self.remaining_seconds = self.full_duration();
        self.running = false;
    }

    /// Restores the full duration of the current phase and stops running.
    ///
    /// The phase is not changed.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.full_duration();
        self.running = false;
    }

    /// Replaces the configured durations.
    ///
    /// An in-progress countdown is left as-is; new durations only take
    /// effect on the next reset or phase flip. remaining_seconds may
    /// therefore temporarily exceed the new duration.
    pub fn update_settings(&mut self, settings: TimerSettings) {
        self.settings = settings.clamped();
    }
}

// ============================================================================
// PlaybackState
// ============================================================================

/// Default playback volume, also used as the mute-toggle restore value.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Represents the current state of the music player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Index of the current track in the playlist
    pub current_index: usize,
    /// Whether music is playing
    pub playing: bool,
    /// Playback volume in [0.0, 1.0]
    pub volume: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_index: 0,
            playing: false,
            volume: DEFAULT_VOLUME,
        }
    }
}

// ============================================================================
// StatusSnapshot
// ============================================================================

/// Serializable snapshot of the whole application state.
///
/// Emitted by the `status json` command for machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Timer state
    pub timer: TimerState,
    /// Playback state
    pub playback: PlaybackState,
    /// Title of the current track
    #[serde(rename = "trackTitle")]
    pub track_title: String,
    /// Artist of the current track
    #[serde(rename = "trackArtist")]
    pub track_artist: String,
}

// ============================================================================
// Tests
// ============================================================================
