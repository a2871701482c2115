//! Display utilities for terminal output.
//!
//! This module provides formatted output for:
//! - The countdown line
//! - Player and theme feedback
//! - Status display and the interactive command help

use std::io::Write;

use crate::playlist::Track;
use crate::theme::{ThemeMode, ThemeState, GRADIENT_PRESETS};
use crate::types::{StatusSnapshot, TimerPhase, TimerState};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats remaining seconds as a zero-padded `mm:ss` string.
    #[must_use]
    pub fn format_time(total_seconds: u32) -> String {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Returns the display label for a phase.
    #[must_use]
    pub fn phase_label(phase: TimerPhase) -> &'static str {
        match phase {
            TimerPhase::Work => "作業",
            TimerPhase::Break => "休憩",
        }
    }

    /// Shows the startup banner with the interactive command summary.
    pub fn show_banner(state: &TimerState) {
        println!("lofidoro - 集中タイマー & lofiプレイヤー");
        println!("─────────────────────────────");
        println!(
            "{} {} (停止中)",
            Self::phase_label(state.phase),
            Self::format_time(state.remaining_seconds)
        );
        println!("コマンド一覧は help を入力してください");
    }

    /// Rewrites the countdown line in place.
    pub fn show_countdown(state: &TimerState) {
        print!(
            "\r{} {}   ",
            Self::phase_label(state.phase),
            Self::format_time(state.remaining_seconds)
        );
        let _ = std::io::stdout().flush();
    }

    /// Shows a message for a started or resumed countdown.
    pub fn show_timer_started(state: &TimerState) {
        println!(
            "> {}を開始しました ({})",
            Self::phase_label(state.phase),
            Self::format_time(state.remaining_seconds)
        );
    }

    /// Shows a message for a paused countdown.
    pub fn show_timer_paused(remaining_seconds: u32) {
        println!(
            "|| タイマーを一時停止しました (残り {})",
            Self::format_time(remaining_seconds)
        );
    }

    /// Shows the end-of-interval message.
    pub fn show_phase_completed(new_phase: TimerPhase, remaining_seconds: u32) {
        println!();
        match new_phase {
            TimerPhase::Break => println!("* 作業終了！休憩しましょう"),
            TimerPhase::Work => println!("* 休憩終了！作業に戻りましょう"),
        }
        println!(
            "  次は{} {} です (startで開始)",
            Self::phase_label(new_phase),
            Self::format_time(remaining_seconds)
        );
    }

    /// Shows a message for a reset countdown.
    pub fn show_timer_reset(remaining_seconds: u32) {
        println!(
            "[] タイマーをリセットしました ({})",
            Self::format_time(remaining_seconds)
        );
    }

    /// Shows the now-playing track line.
    pub fn show_track(track: &Track, index: usize, total: usize) {
        println!(
            "♪ [{}/{}] {} - {}",
            index + 1,
            total,
            track.title,
            track.artist
        );
    }

    /// Shows a playback state change.
    pub fn show_playback(playing: bool) {
        if playing {
            println!("> 再生を開始しました");
        } else {
            println!("|| 再生を一時停止しました");
        }
    }

    /// Shows a volume change.
    pub fn show_volume(volume: f32) {
        if volume <= 0.0 {
            println!("x ミュートしました");
        } else {
            println!("音量: {}%", (volume * 100.0).round() as u32);
        }
    }

    /// Shows the current theme.
    pub fn show_theme(theme: &ThemeState) {
        match theme.mode {
            ThemeMode::Custom => {
                let stops = &theme.custom;
                println!(
                    "テーマ: カスタム ({} → {} → {})",
                    stops.from, stops.via, stops.to
                );
            }
            ThemeMode::Predefined => {
                let name = GRADIENT_PRESETS
                    .iter()
                    .find(|p| p.id == theme.preset_id)
                    .map(|p| p.name)
                    .unwrap_or(theme.preset_id.as_str());
                println!("テーマ: {}", name);
            }
        }
    }

    /// Shows the list of available theme presets.
    pub fn show_theme_list() {
        println!("利用可能なテーマ:");
        for preset in GRADIENT_PRESETS {
            println!(
                "  {} ({}): {} → {} → {}",
                preset.id, preset.name, preset.stops.0, preset.stops.1, preset.stops.2
            );
        }
    }

    /// Shows the full status.
    pub fn show_status(snapshot: &StatusSnapshot, theme: &ThemeState) {
        println!("lofidoro ステータス");
        println!("─────────────────────────────");
        println!(
            "タイマー: {} {} ({})",
            Self::phase_label(snapshot.timer.phase),
            Self::format_time(snapshot.timer.remaining_seconds),
            if snapshot.timer.running {
                "実行中"
            } else {
                "停止中"
            }
        );
        println!(
            "設定: 作業{}分 / 休憩{}分",
            snapshot.timer.settings.work_minutes, snapshot.timer.settings.break_minutes
        );
        println!(
            "トラック: {} - {} ({})",
            snapshot.track_title,
            snapshot.track_artist,
            if snapshot.playback.playing {
                "再生中"
            } else {
                "停止中"
            }
        );
        println!(
            "音量: {}%",
            (snapshot.playback.volume * 100.0).round() as u32
        );
        Self::show_theme(theme);
    }

    /// Shows the interactive command help.
    pub fn show_help() {
        println!("コマンド一覧:");
        println!("  start / s        タイマーの開始・一時停止");
        println!("  reset / r        タイマーのリセット");
        println!("  work <分>        作業時間を変更 (1-60)");
        println!("  break <分>       休憩時間を変更 (1-30)");
        println!("  play / p         音楽の再生・一時停止");
        println!("  next / n         次のトラック");
        println!("  prev / b         前のトラック");
        println!("  vol <0-100>      音量を変更");
        println!("  mute / m         ミュート切り替え");
        println!("  theme <id>       テーマを選択");
        println!("  themes           テーマ一覧を表示");
        println!("  custom on|off    カスタムグラデーション切り替え");
        println!("  stop <位置> <色> カスタム色を変更 (from|via|to #rrggbb)");
        println!("  status [json]    現在の状態を表示");
        println!("  help / h         このヘルプを表示");
        println!("  quit / q         終了");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
