//! Pipeline orchestration
//!
//! Runs discovery, then fills each playlist slot in order: draw a random
//! candidate, extract its beat grid, copy the audio artifact. Recoverable
//! failures discard the attempt's partial output and redraw; each slot is
//! capped at a fixed number of attempts so a broken pool cannot loop
//! forever. The manifest is written once, after every slot has resolved.

use crate::analysis::{estimate_beats, SpectralFluxBackend, TrackerBackend};
use crate::config::Settings;
use crate::discovery::{self, CandidatePool};
use crate::error::{BeatlistError, Result};
use crate::export;
use crate::grid;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline result summary
#[derive(Debug)]
pub struct PipelineResult {
    pub slots: usize,
    pub assigned: usize,
    pub retries: usize,
}

/// Run the full playlist pipeline with the production tracker backend
pub fn run(settings: &Settings) -> Result<PipelineResult> {
    run_with_backend(settings, &SpectralFluxBackend)
}

/// Run the full playlist pipeline with a specific tracker backend
pub fn run_with_backend(
    settings: &Settings,
    backend: &dyn TrackerBackend,
) -> Result<PipelineResult> {
    let pipeline_start = Instant::now();

    info!("Scanning {} for candidate files", settings.root.display());
    let pool = discovery::scan(&settings.root)?;

    // An empty pool must fail here, before any slot starts sampling
    if pool.is_empty() {
        return Err(BeatlistError::EmptyPool(settings.root.clone()));
    }

    info!(
        "Filling {} slots from {} candidates with the {} backend",
        settings.slots.len(),
        pool.len(),
        backend.name()
    );

    std::fs::create_dir_all(&settings.output)
        .map_err(|e| BeatlistError::output_error(&settings.output, e))?;

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let progress_bar = if settings.show_progress {
        let pb = ProgressBar::new(settings.slots.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Append-only assignment list, one entry per slot in processing order
    let mut assigned: Vec<PathBuf> = Vec::with_capacity(settings.slots.len());
    let mut retries = 0usize;

    for slot in &settings.slots {
        if let Some(ref pb) = progress_bar {
            pb.set_message(slot.clone());
        }

        let (path, attempts) = assign_slot(slot, &pool, settings, backend, &mut rng)?;
        retries += attempts - 1;
        assigned.push(path);

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("all slots assigned");
    }

    let manifest = export::build_manifest(&settings.author, &settings.display_name, &assigned);
    export::write_manifest(&manifest, &settings.output.join("playlist.json"))?;

    info!(
        "Assigned {} slots ({} retries) in {:.2}s",
        assigned.len(),
        retries,
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(PipelineResult {
        slots: settings.slots.len(),
        assigned: assigned.len(),
        retries,
    })
}

/// Fill one slot, redrawing candidates until one succeeds or the cap is hit
///
/// Returns the winning candidate path and the number of attempts spent.
fn assign_slot(
    slot: &str,
    pool: &CandidatePool,
    settings: &Settings,
    backend: &dyn TrackerBackend,
    rng: &mut StdRng,
) -> Result<(PathBuf, usize)> {
    for attempt in 1..=settings.max_attempts {
        let candidate = pool.sample(rng);
        debug!(
            "Slot '{}': attempt {} with {}",
            slot,
            attempt,
            candidate.display()
        );

        match try_candidate(slot, candidate, settings, backend) {
            Ok(()) => {
                info!("Slot '{}' assigned {}", slot, candidate.display());
                return Ok((candidate.to_path_buf(), attempt));
            }
            Err(e) if e.is_recoverable() => {
                // Expected per-attempt failure; log and redraw
                warn!(
                    "Slot '{}': attempt {} with {} failed: {}",
                    slot,
                    attempt,
                    candidate.display(),
                    e
                );
            }
            Err(e) => return Err(e),
        }
    }

    Err(BeatlistError::SlotExhausted {
        slot: slot.to_string(),
        attempts: settings.max_attempts,
    })
}

/// One attempt: beat grid plus audio artifact, or nothing
///
/// On failure every partial output of this attempt is removed before the
/// error is reported, so a retried slot never leaves stale files behind.
fn try_candidate(
    slot: &str,
    candidate: &Path,
    settings: &Settings,
    backend: &dyn TrackerBackend,
) -> Result<()> {
    let grid_path = settings.output.join(format!("{slot}.txt"));
    let ext = candidate
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("ogg");
    let artifact_path = settings.output.join(format!("{slot}.{ext}"));

    let outcome = run_attempt(candidate, settings, backend, &grid_path, &artifact_path);
    if outcome.is_err() {
        discard_partial(&grid_path, &artifact_path);
    }
    outcome
}

fn run_attempt(
    candidate: &Path,
    settings: &Settings,
    backend: &dyn TrackerBackend,
    grid_path: &Path,
    artifact_path: &Path,
) -> Result<()> {
    let estimate = estimate_beats(candidate, &settings.profile, backend)?;
    let beat_grid = grid::generate_grid(&estimate)?;
    grid::write_grid(&beat_grid, grid_path)?;

    std::fs::copy(candidate, artifact_path)
        .map_err(|e| BeatlistError::artifact_error(artifact_path, e))?;

    Ok(())
}

/// Remove whatever a failed attempt managed to write
fn discard_partial(grid_path: &Path, artifact_path: &Path) {
    for path in [grid_path, artifact_path] {
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                debug!("Could not remove partial output {}: {}", path.display(), e);
            }
        }
    }
}
