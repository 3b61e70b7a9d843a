//! Beat estimation over a tracker backend
//!
//! Streams a file hop by hop through the black-box tracker, accumulates the
//! onset timestamps and reduces them to a median tempo estimate.

use crate::analysis::traits::TrackerBackend;
use crate::config::DetectionProfile;
use crate::error::{BeatlistError, Result};
use crate::types::BeatEstimate;
use std::path::Path;
use tracing::{debug, warn};

/// Estimate the tempo and beat range of an audio file
///
/// Returns `NoBeatsDetected` if the tracker reports no onsets at all. With a
/// single onset the estimate carries `median_bpm == 0.0` (low confidence,
/// logged here, rejected later by grid generation).
pub fn estimate_beats(
    path: &Path,
    profile: &DetectionProfile,
    backend: &dyn TrackerBackend,
) -> Result<BeatEstimate> {
    let mut tracker = backend.open(path, profile)?;

    let mut beats: Vec<f64> = Vec::new();
    let mut total_frames = 0usize;

    loop {
        let hop = tracker.next_hop();
        if hop.onset {
            beats.push(tracker.last_onset_secs());
        }
        total_frames += hop.frames_read;
        // A final short hop marks end-of-stream
        if hop.frames_read < profile.hop_size {
            break;
        }
    }

    debug!(
        "{}: {} onsets over {} frames",
        path.display(),
        beats.len(),
        total_frames
    );

    let (Some(&first_beat), Some(&last_beat)) = (beats.first(), beats.last()) else {
        return Err(BeatlistError::NoBeatsDetected(path.to_path_buf()));
    };

    Ok(BeatEstimate {
        median_bpm: beats_to_bpm(&beats, path),
        first_beat,
        last_beat,
    })
}

/// Convert onset timestamps to a median tempo
///
/// The median of the instantaneous tempos (60 over each inter-onset interval)
/// is robust to the occasional spurious or missed onset.
fn beats_to_bpm(beats: &[f64], path: &Path) -> f64 {
    if beats.len() < 2 {
        warn!("not enough beats found in {}", path.display());
        return 0.0;
    }
    if beats.len() < 4 {
        warn!("few beats found in {}", path.display());
    }

    let bpms: Vec<f64> = beats.windows(2).map(|w| 60.0 / (w[1] - w[0])).collect();
    median(&bpms)
}

/// True median: averages the middle pair for even-length input
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
