//! Top-level view model and interactive loop.
//!
//! The [`App`] owns the three state holders (timer, playback, theme) for
//! the lifetime of the process and wires them to their collaborators:
//! a 1-second ticker, the audio sink, the cue player and stdin commands.
//!
//! Everything runs on one logical thread: a single `select!` loop
//! serializes ticker ticks, user commands and engine events, so no tick
//! can overlap another and the engines need no locking. Dropping the App
//! drops the ticker and both event channels, so nothing fires after
//! teardown.

use std::ops::ControlFlow;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

use crate::audio::{AudioSink, CuePlayer, NotificationCue};
use crate::cli::Display;
use crate::engine::{PlaybackEngine, PlayerEvent, TimerEngine, TimerEvent};
use crate::playlist::Playlist;
use crate::theme::{GradientStop, ThemeState};
use crate::types::{StatusSnapshot, TimerSettings, BREAK_MINUTES_RANGE, WORK_MINUTES_RANGE};

// ============================================================================
// Command
// ============================================================================

/// A parsed interactive command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start or pause the countdown
    ToggleTimer,
    /// Reset the countdown
    ResetTimer,
    /// Change the work duration in minutes
    SetWork(u32),
    /// Change the break duration in minutes
    SetBreak(u32),
    /// Play or pause the music
    TogglePlay,
    /// Skip to the next track
    NextTrack,
    /// Go back to the previous track
    PrevTrack,
    /// Set the music volume in percent
    SetVolume(u32),
    /// Toggle mute
    ToggleMute,
    /// Select a gradient preset by id
    SelectTheme(String),
    /// List the available presets
    ListThemes,
    /// Enable or disable the custom gradient
    CustomTheme(bool),
    /// Change one custom gradient stop
    SetStop(GradientStop, String),
    /// Show the current status
    Status,
    /// Show the current status as JSON
    StatusJson,
    /// Show the command help
    Help,
    /// Exit the application
    Quit,
}

impl Command {
    /// Parses one line of user input.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message for unknown commands and invalid
    /// arguments. Numeric bounds are enforced here so the engines only
    /// see validated input.
    pub fn parse(input: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = input.split_whitespace().collect();

        match tokens.as_slice() {
            ["start" | "s"] => Ok(Self::ToggleTimer),
            ["reset" | "r"] => Ok(Self::ResetTimer),
            ["work", minutes] => {
                let minutes = parse_minutes(minutes, WORK_MINUTES_RANGE, "作業時間")?;
                Ok(Self::SetWork(minutes))
            }
            ["break", minutes] => {
                let minutes = parse_minutes(minutes, BREAK_MINUTES_RANGE, "休憩時間")?;
                Ok(Self::SetBreak(minutes))
            }
            ["play" | "p"] => Ok(Self::TogglePlay),
            ["next" | "n"] => Ok(Self::NextTrack),
            ["prev" | "b"] => Ok(Self::PrevTrack),
            ["vol", percent] => {
                let percent: u32 = percent
                    .parse()
                    .map_err(|_| "音量は0-100の数値で指定してください".to_string())?;
                if percent > 100 {
                    return Err("音量は0-100の範囲で指定してください".to_string());
                }
                Ok(Self::SetVolume(percent))
            }
            ["mute" | "m"] => Ok(Self::ToggleMute),
            ["theme", id] => Ok(Self::SelectTheme((*id).to_string())),
            ["themes"] => Ok(Self::ListThemes),
            ["custom", "on"] => Ok(Self::CustomTheme(true)),
            ["custom", "off"] => Ok(Self::CustomTheme(false)),
            ["stop", which, color] => {
                let stop = match *which {
                    "from" => GradientStop::From,
                    "via" => GradientStop::Via,
                    "to" => GradientStop::To,
                    _ => {
                        return Err(
                            "位置は from / via / to のいずれかを指定してください".to_string()
                        )
                    }
                };
                Ok(Self::SetStop(stop, (*color).to_string()))
            }
            ["status"] => Ok(Self::Status),
            ["status", "json"] => Ok(Self::StatusJson),
            ["help" | "h"] => Ok(Self::Help),
            ["quit" | "q" | "exit"] => Ok(Self::Quit),
            _ => Err(format!(
                "不明なコマンドです: '{}' (helpで一覧を表示)",
                input.trim()
            )),
        }
    }
}

fn parse_minutes(token: &str, range: (u32, u32), label: &str) -> Result<u32, String> {
    let minutes: u32 = token
        .parse()
        .map_err(|_| format!("{}は数値で指定してください", label))?;
    let (min, max) = range;
    if minutes < min || minutes > max {
        return Err(format!("{}は{}-{}分の範囲で指定してください", label, min, max));
    }
    Ok(minutes)
}

// ============================================================================
// App
// ============================================================================

/// Owns the three state holders and drives the interactive loop.
pub struct App {
    timer: TimerEngine,
    player: PlaybackEngine,
    theme: ThemeState,
    cues: Arc<dyn CuePlayer>,
    timer_rx: mpsc::UnboundedReceiver<TimerEvent>,
    player_rx: mpsc::UnboundedReceiver<PlayerEvent>,
}

impl App {
    /// Wires the engines to the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial volume cannot be applied.
    pub fn new(
        settings: TimerSettings,
        playlist: Playlist,
        sink: Arc<dyn AudioSink>,
        cues: Arc<dyn CuePlayer>,
        initial_volume: f32,
    ) -> Result<Self> {
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
        let (player_tx, mut player_rx) = mpsc::unbounded_channel();

        let timer = TimerEngine::new(settings, timer_tx);
        let mut player = PlaybackEngine::new(playlist, sink, player_tx);
        player.set_volume(initial_volume)?;

        // Drop setup events so the loop starts quiet.
        while timer_rx.try_recv().is_ok() {}
        while player_rx.try_recv().is_ok() {}

        Ok(Self {
            timer,
            player,
            theme: ThemeState::default(),
            cues,
            timer_rx,
            player_rx,
        })
    }

    /// Runs the interactive loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin fails or an event channel closes
    /// unexpectedly.
    pub async fn run(self) -> Result<()> {
        let Self {
            mut timer,
            mut player,
            mut theme,
            cues,
            mut timer_rx,
            mut player_rx,
        } = self;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Display::show_banner(timer.state());
        Display::show_track(
            player.current_track(),
            player.state().current_index,
            player.playlist().len(),
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(cue) = timer.tick()? {
                        play_cue(&cues, cue);
                    }
                    // Track-end detection shares the 1-second granularity.
                    if player.track_has_ended() {
                        debug!("Track ended, advancing");
                        player.on_track_ended()?;
                    }
                }
                line = lines.next_line() => {
                    match line.context("コマンド入力の読み取りに失敗しました")? {
                        Some(line) => {
                            let input = line.trim();
                            if input.is_empty() {
                                continue;
                            }
                            match Command::parse(input) {
                                Ok(command) => {
                                    let flow = handle_command(
                                        command, &mut timer, &mut player, &mut theme, &cues,
                                    )?;
                                    if flow.is_break() {
                                        break;
                                    }
                                }
                                Err(message) => Display::show_error(&message),
                            }
                        }
                        None => break, // stdin closed
                    }
                }
                Some(event) = timer_rx.recv() => {
                    render_timer_event(&event, &timer);
                }
                Some(event) = player_rx.recv() => {
                    render_player_event(&event, &player);
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Command handling
// ============================================================================

/// Dispatches one parsed command. Returns `Break` when the command asks
/// the loop to exit.
fn handle_command(
    command: Command,
    timer: &mut TimerEngine,
    player: &mut PlaybackEngine,
    theme: &mut ThemeState,
    cues: &Arc<dyn CuePlayer>,
) -> Result<ControlFlow<()>> {
    match command {
        Command::ToggleTimer => {
            if let Some(cue) = timer.toggle_running()? {
                play_cue(cues, cue);
            }
        }
        Command::ResetTimer => timer.reset()?,
        Command::SetWork(minutes) => {
            let settings = TimerSettings::new(minutes, timer.state().settings.break_minutes);
            timer.update_settings(settings)?;
        }
        Command::SetBreak(minutes) => {
            let settings = TimerSettings::new(timer.state().settings.work_minutes, minutes);
            timer.update_settings(settings)?;
        }
        Command::TogglePlay => player.toggle()?,
        Command::NextTrack => player.next()?,
        Command::PrevTrack => player.previous()?,
        Command::SetVolume(percent) => player.set_volume(percent as f32 / 100.0)?,
        Command::ToggleMute => player.toggle_mute()?,
        Command::SelectTheme(id) => match theme.select_preset(&id) {
            Ok(()) => Display::show_theme(theme),
            Err(message) => Display::show_error(&message),
        },
        Command::ListThemes => Display::show_theme_list(),
        Command::CustomTheme(enabled) => {
            theme.enable_custom(enabled);
            Display::show_theme(theme);
        }
        Command::SetStop(stop, color) => match theme.set_stop(stop, &color) {
            Ok(()) => Display::show_theme(theme),
            Err(message) => Display::show_error(&message),
        },
        Command::Status => Display::show_status(&snapshot(timer, player), theme),
        Command::StatusJson => {
            let json = serde_json::to_string_pretty(&snapshot(timer, player))
                .context("ステータスのシリアライズに失敗しました")?;
            println!("{}", json);
        }
        Command::Help => Display::show_help(),
        Command::Quit => return Ok(ControlFlow::Break(())),
    }

    Ok(ControlFlow::Continue(()))
}

/// Plays a notification cue, fire-and-forget. Failures are logged only.
fn play_cue(cues: &Arc<dyn CuePlayer>, cue: NotificationCue) {
    if let Err(e) = cues.play_cue(cue) {
        warn!("Failed to play cue {:?}: {}", cue, e);
    }
}

fn snapshot(timer: &TimerEngine, player: &PlaybackEngine) -> StatusSnapshot {
    let track = player.current_track();
    StatusSnapshot {
        timer: timer.state().clone(),
        playback: player.state().clone(),
        track_title: track.title.clone(),
        track_artist: track.artist.clone(),
    }
}

// ============================================================================
// Event rendering
// ============================================================================

fn render_timer_event(event: &TimerEvent, timer: &TimerEngine) {
    match event {
        TimerEvent::Tick { .. } => Display::show_countdown(timer.state()),
        TimerEvent::Started { .. } => Display::show_timer_started(timer.state()),
        TimerEvent::Paused { remaining_seconds } => {
            println!();
            Display::show_timer_paused(*remaining_seconds);
        }
        TimerEvent::PhaseCompleted {
            new_phase,
            remaining_seconds,
        } => Display::show_phase_completed(*new_phase, *remaining_seconds),
        TimerEvent::Reset { remaining_seconds } => {
            Display::show_timer_reset(*remaining_seconds);
        }
        TimerEvent::SettingsUpdated { settings } => {
            println!(
                "設定を変更しました: 作業{}分 / 休憩{}分",
                settings.work_minutes, settings.break_minutes
            );
        }
    }
}

fn render_player_event(event: &PlayerEvent, player: &PlaybackEngine) {
    match event {
        PlayerEvent::TrackChanged { index } => Display::show_track(
            player.playlist().track(*index),
            *index,
            player.playlist().len(),
        ),
        PlayerEvent::Playing => Display::show_playback(true),
        PlayerEvent::Paused => Display::show_playback(false),
        PlayerEvent::VolumeChanged { volume } => Display::show_volume(*volume),
    }
}

// ============================================================================
// Tests
// ============================================================================
