//! lofidoro - 集中タイマー & lofiプレイヤー CLI
//!
//! This tool helps you stay focused with a simple work/break cycle:
//! - 25 minutes of focused work, 5 minutes of break by default
//! - Background lofi music with a fixed playlist
//! - Notification tones at the start and end of each interval

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use lofidoro::app::App;
use lofidoro::audio::{
    try_create_cue_player, try_create_sink, AudioSink, CuePlayer, MockAudioSink, MockCuePlayer,
};
use lofidoro::cli::{Cli, Display};
use lofidoro::playlist::Playlist;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Run the interactive loop
    if let Err(e) = run(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Builds the collaborators and runs the application.
async fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // When no audio device is available the app still runs; the mocks
    // absorb sink commands so the timer and playlist work as usual.
    let sink: Arc<dyn AudioSink> = match try_create_sink(cli.initial_volume()) {
        Some(sink) => sink,
        None => Arc::new(MockAudioSink::new()),
    };
    let cues: Arc<dyn CuePlayer> = match try_create_cue_player(cli.no_sound) {
        Some(cues) => cues,
        None => Arc::new(MockCuePlayer::new()),
    };

    let app = App::new(
        cli.settings(),
        Playlist::bundled(),
        sink,
        cues,
        cli.initial_volume(),
    )?;

    app.run().await
}
