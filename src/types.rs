//! Core data types for beatlist
//!
//! These types represent the domain model and flow through the pipeline.

use std::path::Path;

// =============================================================================
// Beat estimation
// =============================================================================

/// Tempo estimate for a single audio file
///
/// Produced once per successfully analyzed file and never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatEstimate {
    /// Median tempo in beats per minute
    ///
    /// A value of 0.0 signals that fewer than two beats were detected and no
    /// tempo could be derived.
    pub median_bpm: f64,
    /// Timestamp of the first detected onset, in seconds
    pub first_beat: f64,
    /// Timestamp of the last detected onset, in seconds
    pub last_beat: f64,
}

impl BeatEstimate {
    /// Seconds between consecutive beats, if the tempo is usable
    pub fn beat_period(&self) -> Option<f64> {
        (self.median_bpm > 0.0).then(|| 60.0 / self.median_bpm)
    }

    /// True when too few beats were found to trust the tempo
    pub fn is_low_confidence(&self) -> bool {
        self.median_bpm <= 0.0
    }
}

// =============================================================================
// Audio buffer
// =============================================================================

/// Decoded audio samples ready for analysis
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Mono samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration: f64,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        // Guard against division by zero - use 0 duration for invalid sample rate
        let duration = if sample_rate > 0 {
            samples.len() as f64 / sample_rate as f64
        } else {
            0.0
        };
        Self {
            samples,
            sample_rate,
            duration,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// =============================================================================
// Supported formats
// =============================================================================

/// Audio formats eligible for the candidate pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Ogg,
    Mp3,
    Wav,
    Flac,
    Aiff,
}

impl AudioFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "ogg" => Some(AudioFormat::Ogg),
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            "flac" => Some(AudioFormat::Flac),
            "aiff" | "aif" => Some(AudioFormat::Aiff),
            _ => None,
        }
    }

    /// Check if a path has a supported extension
    pub fn is_supported_path(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_period() {
        let estimate = BeatEstimate {
            median_bpm: 120.0,
            first_beat: 0.0,
            last_beat: 1.5,
        };
        assert_eq!(estimate.beat_period(), Some(0.5));
        assert!(!estimate.is_low_confidence());
    }

    #[test]
    fn test_zero_bpm_is_low_confidence() {
        let estimate = BeatEstimate {
            median_bpm: 0.0,
            first_beat: 1.0,
            last_beat: 1.0,
        };
        assert_eq!(estimate.beat_period(), None);
        assert!(estimate.is_low_confidence());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(AudioFormat::from_extension("OGG"), Some(AudioFormat::Ogg));
        assert_eq!(AudioFormat::from_extension("aif"), Some(AudioFormat::Aiff));
        assert_eq!(AudioFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_supported_path() {
        assert!(AudioFormat::is_supported_path(Path::new("/music/a.ogg")));
        assert!(!AudioFormat::is_supported_path(Path::new("/music/a.json")));
        assert!(!AudioFormat::is_supported_path(Path::new("/music/noext")));
    }
}
