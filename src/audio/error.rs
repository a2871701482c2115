//! Audio system error types.
//!
//! All errors here are non-fatal for the engines: a failed load or playback
//! is logged and tolerated, and the player state is reconciled on the next
//! user action.

use thiserror::Error;

/// Errors that can occur in the audio output layer.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Audio device is not available (e.g., no output device connected).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Track source could not be opened (missing file, remote locator).
    #[error("音源を読み込めません: {0}")]
    SourceUnavailable(String),

    /// Failed to decode the audio data.
    #[error("音源のデコードに失敗しました: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream or sink.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),

    /// Generic playback error.
    #[error("再生エラー: {0}")]
    PlaybackError(String),
}

impl AudioError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the track source.
    #[must_use]
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::SourceUnavailable(_) | Self::DecodeError(_))
    }
}
