//! Integration tests for the timer/playback/theme engines working together.
//!
//! These tests drive the public library API with mocked audio collaborators
//! and verify end-to-end behavior:
//! - A full work interval completes, flips to break and stops
//! - Notification cues fire at interval start and end only
//! - Tracks auto-advance when they finish and wrap around the playlist
//! - Mute restores the fixed default volume, not the pre-mute volume
//! - Settings changes never rescale an in-progress countdown
//! - The status snapshot serializes with the expected JSON keys

use std::sync::Arc;

use tokio::sync::mpsc;

use lofidoro::audio::{CuePlayer, MockAudioSink, MockCuePlayer, NotificationCue, SinkCommand};
use lofidoro::engine::{PlaybackEngine, PlayerEvent, TimerEngine, TimerEvent};
use lofidoro::playlist::Playlist;
use lofidoro::theme::{GradientStop, ThemeMode, ThemeState};
use lofidoro::types::{StatusSnapshot, TimerPhase, TimerSettings, DEFAULT_VOLUME};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a TimerEngine with event channel.
fn create_timer(
    settings: TimerSettings,
) -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TimerEngine::new(settings, tx), rx)
}

/// Creates a PlaybackEngine on the bundled playlist with a mock sink.
fn create_player() -> (
    PlaybackEngine,
    Arc<MockAudioSink>,
    mpsc::UnboundedReceiver<PlayerEvent>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink = Arc::new(MockAudioSink::new());
    let engine = PlaybackEngine::new(Playlist::bundled(), sink.clone(), tx);
    (engine, sink, rx)
}

/// Ticks the timer `count` times, collecting any returned cues.
fn tick_times(timer: &mut TimerEngine, count: u32) -> Vec<NotificationCue> {
    let mut cues = Vec::new();
    for _ in 0..count {
        if let Some(cue) = timer.tick().unwrap() {
            cues.push(cue);
        }
    }
    cues
}

// ============================================================================
// Timer Interval Lifecycle
// ============================================================================

/// 作業インターバルの完走
///
/// 前提条件: 作業1分 / 休憩1分で開始
/// テスト手順: startしてから60回tickする
/// 期待結果: 休憩フェーズに切り替わり、停止状態で終了のcueが1回返る
#[test]
fn test_work_interval_completes_and_flips_to_break() {
    let (mut timer, _rx) = create_timer(TimerSettings::new(1, 1));

    let start_cue = timer.toggle_running().unwrap();
    assert_eq!(start_cue, Some(NotificationCue::Start));

    let cues = tick_times(&mut timer, 60);

    assert_eq!(cues, vec![NotificationCue::IntervalEnd]);
    assert_eq!(timer.state().phase, TimerPhase::Break);
    assert_eq!(timer.state().remaining_seconds, 60);
    assert!(!timer.state().running, "No auto-continue into the break");
}

/// 休憩インターバルの完走
///
/// 前提条件: 作業インターバルを完走済み
/// テスト手順: 休憩をstartして完走する
/// 期待結果: 作業フェーズに戻り、開始cueは鳴らない（freshではないため鳴る）
#[test]
fn test_break_interval_flips_back_to_work() {
    let (mut timer, _rx) = create_timer(TimerSettings::new(1, 1));
    timer.toggle_running().unwrap();
    tick_times(&mut timer, 60);

    // The break is a fresh interval, so starting it plays the start cue.
    let cue = timer.toggle_running().unwrap();
    assert_eq!(cue, Some(NotificationCue::Start));

    let cues = tick_times(&mut timer, 60);

    assert_eq!(cues, vec![NotificationCue::IntervalEnd]);
    assert_eq!(timer.state().phase, TimerPhase::Work);
    assert_eq!(timer.state().remaining_seconds, 60);
    assert!(!timer.state().running);
}

/// 一時停止と再開
///
/// 前提条件: カウントダウン進行中
/// テスト手順: 途中でpauseし、再度startする
/// 期待結果: 残り時間が保持され、再開時に開始cueは鳴らない
#[test]
fn test_pause_preserves_remaining_and_resume_is_silent() {
    let (mut timer, _rx) = create_timer(TimerSettings::new(25, 5));
    timer.toggle_running().unwrap();
    tick_times(&mut timer, 10);

    let pause_cue = timer.toggle_running().unwrap();
    assert_eq!(pause_cue, None);
    assert_eq!(timer.state().remaining_seconds, 25 * 60 - 10);

    // Ticks while paused are ignored.
    let cues = tick_times(&mut timer, 5);
    assert!(cues.is_empty());
    assert_eq!(timer.state().remaining_seconds, 25 * 60 - 10);

    let resume_cue = timer.toggle_running().unwrap();
    assert_eq!(resume_cue, None, "Resuming a partial countdown is silent");
}

/// リセット
///
/// 前提条件: カウントダウン進行中
/// テスト手順: resetする
/// 期待結果: 現在フェーズの全時間に戻り、停止する
#[test]
fn test_reset_restores_full_duration_of_current_phase() {
    let (mut timer, _rx) = create_timer(TimerSettings::new(1, 1));
    timer.toggle_running().unwrap();
    tick_times(&mut timer, 60);
    timer.toggle_running().unwrap();
    tick_times(&mut timer, 30);

    timer.reset().unwrap();

    assert_eq!(timer.state().phase, TimerPhase::Break);
    assert_eq!(timer.state().remaining_seconds, 60);
    assert!(!timer.state().running);
}

/// 設定変更はカウントダウンを再スケールしない
///
/// 前提条件: カウントダウン進行中
/// テスト手順: 作業時間を変更する
/// 期待結果: 残り時間はそのまま、次のフェーズ切替から新設定が使われる
#[test]
fn test_settings_change_applies_from_next_flip() {
    let (mut timer, _rx) = create_timer(TimerSettings::new(1, 1));
    timer.toggle_running().unwrap();
    tick_times(&mut timer, 10);

    timer
        .update_settings(TimerSettings::new(2, 1))
        .unwrap();

    assert_eq!(timer.state().remaining_seconds, 50, "not rescaled");

    tick_times(&mut timer, 50);
    assert_eq!(timer.state().phase, TimerPhase::Break);

    timer.toggle_running().unwrap();
    tick_times(&mut timer, 60);

    // Back on work, the new two-minute duration takes effect.
    assert_eq!(timer.state().phase, TimerPhase::Work);
    assert_eq!(timer.state().remaining_seconds, 2 * 60);
}

// ============================================================================
// Cues Through the CuePlayer
// ============================================================================

/// cue再生の統合
///
/// 前提条件: MockCuePlayerを使用
/// テスト手順: start → 完走 → 休憩start
/// 期待結果: Start, IntervalEnd, Start の順でcueが記録される
#[test]
fn test_cue_sequence_over_a_full_cycle() {
    let (mut timer, _rx) = create_timer(TimerSettings::new(1, 1));
    let cues = MockCuePlayer::new();

    if let Some(cue) = timer.toggle_running().unwrap() {
        cues.play_cue(cue).unwrap();
    }
    for _ in 0..60 {
        if let Some(cue) = timer.tick().unwrap() {
            cues.play_cue(cue).unwrap();
        }
    }
    if let Some(cue) = timer.toggle_running().unwrap() {
        cues.play_cue(cue).unwrap();
    }

    assert_eq!(
        cues.played_cues(),
        vec![
            NotificationCue::Start,
            NotificationCue::IntervalEnd,
            NotificationCue::Start,
        ]
    );
}

/// 無効化されたcueプレイヤー
///
/// 前提条件: cueプレイヤーが無効化されている
/// テスト手順: cueを再生する
/// 期待結果: 記録されず、エラーにもならない
#[test]
fn test_disabled_cue_player_swallows_cues() {
    let cues = MockCuePlayer::new();
    cues.disable();

    cues.play_cue(NotificationCue::Start).unwrap();

    assert!(cues.played_cues().is_empty());
}

// ============================================================================
// Playback Auto-Advance
// ============================================================================

/// トラック終了時の自動送り
///
/// 前提条件: 再生中、シンクがトラック終了を報告
/// テスト手順: track_has_endedを確認し、on_track_endedを呼ぶ
/// 期待結果: 次のトラックがロードされ、再生が継続する
#[test]
fn test_auto_advance_on_track_end() {
    let (mut player, sink, _rx) = create_player();
    player.play().unwrap();
    sink.set_ended(true);
    sink.clear_commands();

    assert!(player.track_has_ended());
    player.on_track_ended().unwrap();

    assert_eq!(player.state().current_index, 1);
    assert!(player.state().playing);
    assert!(sink.commands().contains(&SinkCommand::Play));
    // Loading a new track clears the ended flag on the mock.
    assert!(!player.track_has_ended());
}

/// プレイリスト一周の自動送り
///
/// 前提条件: 再生中
/// テスト手順: トラック数だけ自動送りを繰り返す
/// 期待結果: 先頭トラックに戻る
#[test]
fn test_auto_advance_wraps_around_playlist() {
    let (mut player, sink, _rx) = create_player();
    player.play().unwrap();

    for _ in 0..player.playlist().len() {
        sink.set_ended(true);
        player.on_track_ended().unwrap();
    }

    assert_eq!(player.state().current_index, 0);
    assert!(player.state().playing);
}

/// 停止中はトラック終了を検知しない
#[test]
fn test_paused_player_never_reports_track_end() {
    let (player, sink, _rx) = create_player();
    sink.set_ended(true);

    assert!(!player.track_has_ended());
}

// ============================================================================
// Volume and Mute
// ============================================================================

/// ミュートは固定デフォルトに戻す
///
/// 前提条件: 音量0.7で再生中
/// テスト手順: mute → mute
/// 期待結果: 0.7ではなく0.5に戻る
#[test]
fn test_mute_round_trip_ends_at_fixed_default() {
    let (mut player, sink, _rx) = create_player();
    player.set_volume(0.7).unwrap();

    player.toggle_mute().unwrap();
    assert!(player.state().volume.abs() < f32::EPSILON);
    assert!(sink.commands().contains(&SinkCommand::SetVolume(0.0)));

    player.toggle_mute().unwrap();
    assert!((player.state().volume - DEFAULT_VOLUME).abs() < f32::EPSILON);
}

// ============================================================================
// Theme Selection
// ============================================================================

/// テーマ選択とカスタムグラデーション
#[test]
fn test_theme_selection_and_custom_stops() {
    let mut theme = ThemeState::default();
    assert_eq!(theme.mode, ThemeMode::Predefined);

    theme.select_preset("ocean-breeze").unwrap();
    assert_eq!(theme.active_stops().from, "#1e3a8a");

    assert!(theme.select_preset("does-not-exist").is_err());
    assert_eq!(theme.preset_id, "ocean-breeze", "kept on failure");

    theme.enable_custom(true);
    theme.set_stop(GradientStop::Via, "#ABCDEF").unwrap();
    assert_eq!(theme.active_stops().via, "#abcdef", "stored lowercase");

    // Back to predefined, custom stops are remembered.
    theme.enable_custom(false);
    assert_eq!(theme.active_stops().from, "#1e3a8a");
    theme.enable_custom(true);
    assert_eq!(theme.active_stops().via, "#abcdef");
}

// ============================================================================
// Status Snapshot
// ============================================================================

/// ステータスのJSONシリアライズ
///
/// 期待結果: trackTitle / trackArtist キーで出力される
#[test]
fn test_status_snapshot_json_keys() {
    let (timer, _timer_rx) = create_timer(TimerSettings::default());
    let (player, _sink, _player_rx) = create_player();

    let track = player.current_track();
    let snapshot = StatusSnapshot {
        timer: timer.state().clone(),
        playback: player.state().clone(),
        track_title: track.title.clone(),
        track_artist: track.artist.clone(),
    };

    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["trackTitle"], "Coding Night");
    assert_eq!(json["trackArtist"], "LoFi Dreamer");
    assert_eq!(json["timer"]["phase"], "work");
    assert_eq!(json["timer"]["remaining_seconds"], 25 * 60);
    assert_eq!(json["playback"]["volume"], 0.5);
}
