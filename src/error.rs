//! Unified error types for beatlist
//!
//! Error strategy:
//! - Per-attempt errors (decode, beat detection, artifact I/O): recoverable,
//!   the slot loop discards partial output and redraws a candidate
//! - Systemic errors (configuration, empty pool, exhausted slot, manifest
//!   output): fatal, abort the run with a non-zero exit
//!
//! All errors include actionable suggestions where possible.

use std::path::PathBuf;
use thiserror::Error;

/// Supported audio formats for helpful error messages
pub const SUPPORTED_FORMATS: &str = "OGG, MP3, WAV, FLAC, AIFF";

/// Top-level error type for beatlist operations
#[derive(Debug, Error)]
pub enum BeatlistError {
    // =========================================================================
    // Recoverable errors - discard the attempt, redraw a candidate
    // =========================================================================
    #[error("Failed to decode audio file '{path}': {reason}\n  Supported formats: {SUPPORTED_FORMATS}\n  Tip: If the file plays in other apps, it may be corrupted or use an unsupported codec")]
    DecodeError { path: PathBuf, reason: String },

    #[error("No beats detected in '{0}'")]
    NoBeatsDetected(PathBuf),

    #[error("Cannot derive a beat grid from a {bpm} BPM estimate\n  Tip: Fewer than two beats were detected, so no usable tempo exists")]
    InvalidTempo { bpm: f64 },

    #[error("Failed to write slot artifact '{path}': {reason}")]
    ArtifactError { path: PathBuf, reason: String },

    #[error("File not found: '{0}'\n  Tip: Check the path exists and is accessible")]
    FileNotFound(PathBuf),

    // =========================================================================
    // Fatal errors - abort the run
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("No candidate audio files found under '{0}'\n  Supported formats: {SUPPORTED_FORMATS}")]
    EmptyPool(PathBuf),

    #[error("Gave up on slot '{slot}' after {attempts} failed attempts\n  Tip: The candidate pool may contain mostly unreadable or beatless files; raise --max-attempts or clean up the pool")]
    SlotExhausted { slot: String, attempts: usize },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for beatlist operations
pub type Result<T> = std::result::Result<T, BeatlistError>;

impl BeatlistError {
    /// Returns true if this error is recoverable (discard attempt, redraw a candidate)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BeatlistError::DecodeError { .. }
                | BeatlistError::NoBeatsDetected(_)
                | BeatlistError::InvalidTempo { .. }
                | BeatlistError::ArtifactError { .. }
                | BeatlistError::FileNotFound(_)
        )
    }

    /// Create a decode error with context about the issue
    pub fn decode_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BeatlistError::DecodeError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a per-attempt artifact error from an IO failure
    pub fn artifact_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        BeatlistError::ArtifactError {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Permission denied. Check that you have write access to {}",
                    path.display()
                )
            }
            std::io::ErrorKind::NotFound => {
                format!(
                    "Directory does not exist: {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                )
            }
            _ => err.to_string(),
        };
        BeatlistError::OutputError { path, reason }
    }
}
