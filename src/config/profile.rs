//! Analysis profile resolution
//!
//! A named mode maps to a fixed (sample rate, window size, hop size) triple;
//! explicit per-field overrides take precedence over the mode-derived values.

use crate::error::{BeatlistError, Result};

/// Named analysis profiles trading accuracy for speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Default,
    Fast,
    SuperFast,
}

impl AnalysisMode {
    /// Parse a mode name; unknown names are a configuration error
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(AnalysisMode::Default),
            "fast" => Ok(AnalysisMode::Fast),
            "super-fast" => Ok(AnalysisMode::SuperFast),
            other => Err(BeatlistError::ConfigError(format!(
                "unknown mode '{other}' (expected default, fast or super-fast)"
            ))),
        }
    }
}

/// Resolved analysis parameters handed to the tracker backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionProfile {
    /// Sample rate the source is decoded/resampled to, in Hz
    pub sample_rate: u32,
    /// Spectral window size in frames
    pub window_size: usize,
    /// Hop size in frames
    pub hop_size: usize,
}

impl DetectionProfile {
    /// Fixed parameter triple for a named mode
    pub fn for_mode(mode: AnalysisMode) -> Self {
        let (sample_rate, window_size, hop_size) = match mode {
            AnalysisMode::Default => (44100, 1024, 512),
            AnalysisMode::Fast => (8000, 512, 128),
            AnalysisMode::SuperFast => (4000, 128, 64),
        };
        Self {
            sample_rate,
            window_size,
            hop_size,
        }
    }

    /// Apply explicit parameter overrides on top of the mode-derived values
    pub fn with_overrides(
        self,
        sample_rate: Option<u32>,
        window_size: Option<usize>,
        hop_size: Option<usize>,
    ) -> Self {
        Self {
            sample_rate: sample_rate.unwrap_or(self.sample_rate),
            window_size: window_size.unwrap_or(self.window_size),
            hop_size: hop_size.unwrap_or(self.hop_size),
        }
    }
}

impl Default for DetectionProfile {
    fn default() -> Self {
        Self::for_mode(AnalysisMode::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parameter_table() {
        assert_eq!(
            DetectionProfile::for_mode(AnalysisMode::Default),
            DetectionProfile {
                sample_rate: 44100,
                window_size: 1024,
                hop_size: 512
            }
        );
        assert_eq!(
            DetectionProfile::for_mode(AnalysisMode::Fast),
            DetectionProfile {
                sample_rate: 8000,
                window_size: 512,
                hop_size: 128
            }
        );
        assert_eq!(
            DetectionProfile::for_mode(AnalysisMode::SuperFast),
            DetectionProfile {
                sample_rate: 4000,
                window_size: 128,
                hop_size: 64
            }
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let profile =
            DetectionProfile::for_mode(AnalysisMode::Fast).with_overrides(Some(22050), None, Some(256));
        assert_eq!(profile.sample_rate, 22050);
        assert_eq!(profile.window_size, 512);
        assert_eq!(profile.hop_size, 256);
    }

    #[test]
    fn test_unknown_mode_is_config_error() {
        let err = AnalysisMode::parse("turbo").unwrap_err();
        assert!(matches!(err, BeatlistError::ConfigError(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_known_modes_parse() {
        assert_eq!(AnalysisMode::parse("default").unwrap(), AnalysisMode::Default);
        assert_eq!(AnalysisMode::parse("fast").unwrap(), AnalysisMode::Fast);
        assert_eq!(
            AnalysisMode::parse("super-fast").unwrap(),
            AnalysisMode::SuperFast
        );
    }
}
