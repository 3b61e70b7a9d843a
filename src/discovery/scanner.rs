//! Candidate pool discovery
//!
//! Enumerates the audio files directly under the root directory once, at
//! pipeline start. The pool is read-only afterward and sampled with
//! replacement, so one file may serve several slots.

use crate::error::{BeatlistError, Result};
use crate::types::AudioFormat;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Read-only pool of candidate audio files
#[derive(Debug, Clone)]
pub struct CandidatePool {
    files: Vec<PathBuf>,
}

impl CandidatePool {
    /// Number of candidates
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All candidate paths, in discovery order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Draw one candidate uniformly at random, with replacement
    ///
    /// The pool must be non-empty; the pipeline rejects empty pools before
    /// any sampling happens.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &Path {
        &self.files[rng.gen_range(0..self.files.len())]
    }
}

/// Scan the root directory (non-recursive) for eligible audio files
pub fn scan(root: &Path) -> Result<CandidatePool> {
    if !root.exists() {
        return Err(BeatlistError::FileNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && AudioFormat::is_supported_path(path) {
            debug!("Discovered: {}", path.display());
            files.push(path.to_path_buf());
        }
    }

    // Stable order keeps seeded sampling reproducible across platforms
    files.sort();

    info!("Discovered {} candidate files", files.len());

    if files.is_empty() {
        warn!("No supported audio files found in {}", root.display());
    }

    Ok(CandidatePool { files })
}
