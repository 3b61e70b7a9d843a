//! Beat tracking trait abstractions
//!
//! These traits define the black-box beat tracker surface the estimator
//! depends on. The production implementation is the spectral-flux backend in
//! onset.rs; tests swap in scripted backends.

use crate::config::DetectionProfile;
use crate::error::Result;
use std::path::Path;

/// One hop's worth of tracker output
#[derive(Debug, Clone, Copy)]
pub struct HopRead {
    /// Whether a beat onset landed in this hop
    pub onset: bool,
    /// Frames consumed; fewer than the profile hop size marks end-of-stream
    pub frames_read: usize,
}

/// Streaming beat tracker over a single audio source
///
/// Callers pull one hop at a time and query the timestamp of the most recent
/// onset on demand.
pub trait BeatTracker {
    /// Process the next hop of audio
    fn next_hop(&mut self) -> HopRead;

    /// Timestamp in seconds of the most recently reported onset
    fn last_onset_secs(&self) -> f64;
}

/// Factory for per-file beat trackers
pub trait TrackerBackend: Send + Sync {
    /// Open an audio source for beat tracking under the given profile
    fn open(&self, path: &Path, profile: &DetectionProfile) -> Result<Box<dyn BeatTracker>>;

    /// Get the name of this backend (for logging)
    fn name(&self) -> &'static str;
}
