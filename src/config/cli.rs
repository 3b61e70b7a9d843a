//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// beatlist - Themed playlist assembly with beat-grid extraction
///
/// Samples audio files from a candidate directory, derives a beat grid for
/// each playlist slot and emits per-track timing files plus a playlist
/// manifest.
#[derive(Parser, Debug)]
#[command(name = "beatlist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root directory of candidate audio files
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Output directory for beat grids, audio artifacts and the manifest
    #[arg(short, long, value_name = "DIR", default_value = "music")]
    pub output: PathBuf,

    /// Playlist author recorded in the manifest
    #[arg(long, value_name = "NAME", default_value = "Hyun")]
    pub author: String,

    /// Playlist display name recorded in the manifest
    #[arg(long, value_name = "NAME", default_value = "나의 플레이리스트")]
    pub display_name: String,

    /// Analysis profile: default, fast or super-fast
    #[arg(long, value_name = "MODE", default_value = "default")]
    pub mode: String,

    /// Override the analysis sample rate in Hz
    #[arg(long, value_name = "HZ")]
    pub sample_rate: Option<u32>,

    /// Override the spectral window size in frames
    #[arg(long, value_name = "FRAMES")]
    pub window_size: Option<usize>,

    /// Override the hop size in frames
    #[arg(long, value_name = "FRAMES")]
    pub hop_size: Option<usize>,

    /// Comma-separated slot names overriding the built-in playlist layout
    #[arg(long, value_name = "NAMES")]
    pub slots: Option<String>,

    /// Maximum analysis attempts per slot before giving up
    #[arg(long, value_name = "N", default_value_t = 32)]
    pub max_attempts: usize,

    /// Seed for the candidate sampler (random when omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress bar)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Get the log level based on verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
