//! Beat grid generation and persistence
//!
//! Regenerates a uniform beat grid from a tempo estimate: starting at the
//! first detected beat, one timestamp every 60/BPM seconds up to and
//! including the last detected beat.

use crate::error::{BeatlistError, Result};
use crate::types::BeatEstimate;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Generate the uniform beat grid for a tempo estimate
///
/// Fails with `InvalidTempo` when the estimate carries no usable tempo;
/// callers must treat that as an unusable candidate, not an empty grid.
pub fn generate_grid(estimate: &BeatEstimate) -> Result<Vec<f64>> {
    let period = estimate
        .beat_period()
        .ok_or(BeatlistError::InvalidTempo {
            bpm: estimate.median_bpm,
        })?;

    let mut grid = Vec::new();
    let mut timing = estimate.first_beat;
    while timing <= estimate.last_beat {
        grid.push(timing);
        timing += period;
    }

    Ok(grid)
}

/// Write a beat grid as plain text, one ascending timestamp per line
///
/// Creates missing parent directories and overwrites an existing file.
pub fn write_grid(grid: &[f64], dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| BeatlistError::artifact_error(dest, e))?;
        }
    }

    let file = fs::File::create(dest).map_err(|e| BeatlistError::artifact_error(dest, e))?;
    let mut writer = BufWriter::new(file);

    for timing in grid {
        writeln!(writer, "{}", timing).map_err(|e| BeatlistError::artifact_error(dest, e))?;
    }
    writer
        .flush()
        .map_err(|e| BeatlistError::artifact_error(dest, e))?;

    debug!("Wrote {} beat timestamps to {}", grid.len(), dest.display());

    Ok(())
}

/// Read a beat grid file back into timestamps
pub fn read_grid(path: &Path) -> Result<Vec<f64>> {
    let file = fs::File::open(path).map_err(|e| BeatlistError::artifact_error(path, e))?;
    let reader = BufReader::new(file);

    let mut grid = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| BeatlistError::artifact_error(path, e))?;
        let timing = line.trim().parse::<f64>().map_err(|e| {
            BeatlistError::ArtifactError {
                path: path.to_path_buf(),
                reason: format!("invalid timestamp '{}': {}", line.trim(), e),
            }
        })?;
        grid.push(timing);
    }

    Ok(grid)
}
