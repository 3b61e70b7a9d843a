//! Runtime configuration settings

use crate::config::profile::{AnalysisMode, DetectionProfile};
use crate::error::Result;
use std::path::PathBuf;

/// Runtime settings for the playlist pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory of candidate audio files
    pub root: PathBuf,
    /// Output directory for grids, artifacts and the manifest
    pub output: PathBuf,
    /// Playlist author recorded in the manifest
    pub author: String,
    /// Playlist display name recorded in the manifest
    pub display_name: String,
    /// Resolved analysis parameters
    pub profile: DetectionProfile,
    /// Ordered slot names, one playlist position each
    pub slots: Vec<String>,
    /// Maximum analysis attempts per slot
    pub max_attempts: usize,
    /// Seed for the candidate sampler; None draws from entropy
    pub seed: Option<u64>,
    /// Show the slot progress bar
    pub show_progress: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    ///
    /// Fails with a configuration error for an unknown analysis mode.
    pub fn from_cli(cli: &super::cli::Cli) -> Result<Self> {
        let mode = AnalysisMode::parse(&cli.mode)?;
        let profile = DetectionProfile::for_mode(mode).with_overrides(
            cli.sample_rate,
            cli.window_size,
            cli.hop_size,
        );

        let slots = match &cli.slots {
            Some(names) => names
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => default_slots(),
        };

        Ok(Self {
            root: cli.root.clone(),
            output: cli.output.clone(),
            author: cli.author.clone(),
            display_name: cli.display_name.clone(),
            profile,
            slots,
            max_attempts: cli.max_attempts,
            seed: cli.seed,
            show_progress: !cli.quiet,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from("music"),
            author: "Hyun".to_string(),
            display_name: "나의 플레이리스트".to_string(),
            profile: DetectionProfile::default(),
            slots: default_slots(),
            max_attempts: 32,
            seed: None,
            show_progress: true,
        }
    }
}

/// Built-in playlist layout: five zones of three tracks, boss themes and
/// the lobby/training/tutorial screens
pub fn default_slots() -> Vec<String> {
    let mut slots = Vec::new();
    for zone in 1..=5 {
        for track in 1..=3 {
            slots.push(format!("zone{zone}_{track}"));
        }
    }
    for boss in [1, 2, 3, 4, 9] {
        slots.push(format!("boss_{boss}"));
    }
    for screen in ["lobby", "training", "tutorial"] {
        slots.push(screen.to_string());
    }
    slots
}
