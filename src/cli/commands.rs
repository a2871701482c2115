//! Command-line argument definitions.
//!
//! Uses clap derive macro for argument parsing. Duration and volume bounds
//! are enforced here so the engines only ever see validated input.

use clap::Parser;

use crate::types::TimerSettings;

/// Lofidoro - focus timer with a built-in lofi music player
#[derive(Parser, Debug)]
#[command(
    name = "lofidoro",
    version,
    about = "集中タイマー付きlofiミュージックプレイヤーCLI",
    long_about = "ターミナル上で動作する集中タイマーとBGMプレイヤー。\n\
                  作業/休憩のカウントダウンとlofiプレイリストを組み合わせます。"
)]
pub struct Cli {
    /// Work duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub work: u32,

    /// Break duration in minutes (1-30)
    #[arg(
        short,
        long = "break",
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=30)
    )]
    pub break_time: u32,

    /// Initial music volume in percent (0-100)
    #[arg(
        long,
        default_value = "50",
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    pub volume: u32,

    /// Disable notification cues
    #[arg(long)]
    pub no_sound: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Returns the timer settings from the parsed arguments.
    #[must_use]
    pub fn settings(&self) -> TimerSettings {
        TimerSettings::new(self.work, self.break_time)
    }

    /// Returns the initial volume as a fraction in [0.0, 1.0].
    #[must_use]
    pub fn initial_volume(&self) -> f32 {
        self.volume as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["lofidoro"]);
        assert_eq!(cli.work, 25);
        assert_eq!(cli.break_time, 5);
        assert_eq!(cli.volume, 50);
        assert!(!cli.no_sound);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_durations() {
        let cli = Cli::parse_from(["lofidoro", "--work", "50", "--break", "10"]);
        assert_eq!(cli.work, 50);
        assert_eq!(cli.break_time, 10);
        assert_eq!(cli.settings(), TimerSettings::new(50, 10));
    }

    #[test]
    fn test_parse_rejects_out_of_range_work() {
        assert!(Cli::try_parse_from(["lofidoro", "--work", "0"]).is_err());
        assert!(Cli::try_parse_from(["lofidoro", "--work", "61"]).is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_break() {
        assert!(Cli::try_parse_from(["lofidoro", "--break", "31"]).is_err());
    }

    #[test]
    fn test_parse_volume() {
        let cli = Cli::parse_from(["lofidoro", "--volume", "80"]);
        assert!((cli.initial_volume() - 0.8).abs() < f32::EPSILON);

        assert!(Cli::try_parse_from(["lofidoro", "--volume", "101"]).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["lofidoro", "--no-sound", "--verbose"]);
        assert!(cli.no_sound);
        assert!(cli.verbose);
    }
}
