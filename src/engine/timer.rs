//! Timer engine for the focus countdown.
//!
//! This module provides the work/break state machine:
//! - Countdown decrement at 1-second granularity
//! - Phase flip with notification cue when the countdown reaches zero
//! - Start/pause toggle, manual reset, settings updates
//!
//! Transitions are pure state mutations; the sounds they require are
//! declared as returned [`NotificationCue`] values that the caller plays.
//! State changes are reported to the UI through an event channel.

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::audio::NotificationCue;
use crate::types::{TimerPhase, TimerSettings, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events emitted for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed while running
    Tick {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// Countdown started or resumed
    Started {
        /// Current phase
        phase: TimerPhase,
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Countdown paused
    Paused {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// An interval reached zero and the phase flipped
    PhaseCompleted {
        /// The phase that is now pending, not running
        new_phase: TimerPhase,
        /// Full duration of the new phase in seconds
        remaining_seconds: u32,
    },
    /// Countdown reset to the full duration of the current phase
    Reset {
        /// Restored remaining seconds
        remaining_seconds: u32,
    },
    /// Durations changed
    SettingsUpdated {
        /// The new (clamped) settings
        settings: TimerSettings,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// State machine driving the work/break countdown.
///
/// The engine owns no scheduler: the application calls [`tick`](Self::tick)
/// once per elapsed second while the timer is running, so it stays testable
/// without wall-clock time.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new TimerEngine at a fresh work interval.
    pub fn new(settings: TimerSettings, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(settings),
            event_tx,
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Must be called once per elapsed second while running; calls while
    /// not running are ignored. When the decrement reaches zero (or the
    /// countdown was already at zero), the phase flips to its full duration,
    /// the countdown stops, and the end-of-interval cue is returned for the
    /// caller to play. The engine never auto-continues into the next phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn tick(&mut self) -> Result<Option<NotificationCue>> {
        if !self.state.running {
            return Ok(None);
        }

        let completed = self.state.tick();

        if completed {
            self.state.flip_phase();

            self.event_tx
                .send(TimerEvent::PhaseCompleted {
                    new_phase: self.state.phase,
                    remaining_seconds: self.state.remaining_seconds,
                })
                .context("Failed to send phase completed event")?;

            return Ok(Some(NotificationCue::IntervalEnd));
        }

        self.event_tx
            .send(TimerEvent::Tick {
                remaining_seconds: self.state.remaining_seconds,
            })
            .context("Failed to send tick event")?;

        Ok(None)
    }

    /// Toggles between running and paused.
    ///
    /// Starting from a fresh, unstarted countdown returns the start cue;
    /// resuming a partial countdown is silent.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn toggle_running(&mut self) -> Result<Option<NotificationCue>> {
        let cue = if !self.state.running && self.state.is_fresh() {
            Some(NotificationCue::Start)
        } else {
            None
        };

        self.state.running = !self.state.running;

        if self.state.running {
            self.event_tx
                .send(TimerEvent::Started {
                    phase: self.state.phase,
                    remaining_seconds: self.state.remaining_seconds,
                })
                .context("Failed to send started event")?;
        } else {
            self.event_tx
                .send(TimerEvent::Paused {
                    remaining_seconds: self.state.remaining_seconds,
                })
                .context("Failed to send paused event")?;
        }

        Ok(cue)
    }

    /// Resets the countdown to the full duration of the current phase.
    ///
    /// The phase is kept; the countdown stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn reset(&mut self) -> Result<()> {
        self.state.reset();

        self.event_tx
            .send(TimerEvent::Reset {
                remaining_seconds: self.state.remaining_seconds,
            })
            .context("Failed to send reset event")?;

        Ok(())
    }

    /// Replaces the configured durations.
    ///
    /// An in-progress countdown is not rescaled; the new durations apply
    /// from the next reset or phase flip.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn update_settings(&mut self, settings: TimerSettings) -> Result<()> {
        self.state.update_settings(settings);

        self.event_tx
            .send(TimerEvent::SettingsUpdated {
                settings: self.state.settings,
            })
            .context("Failed to send settings updated event")?;

        Ok(())
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

// ============================================================================
// Tests
// ============================================================================
