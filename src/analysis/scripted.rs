//! Scripted tracker backend (testing/fallback)
//!
//! Replays a fixed list of onset timestamps through the `BeatTracker`
//! surface, one per hop, without touching the filesystem. Used by tests that
//! need deterministic estimates.

use crate::analysis::traits::{BeatTracker, HopRead, TrackerBackend};
use crate::config::DetectionProfile;
use crate::error::Result;
use std::path::Path;

/// Backend that replays a fixed onset script for every file
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    onsets: Vec<f64>,
}

impl ScriptedBackend {
    pub fn new(onsets: Vec<f64>) -> Self {
        Self { onsets }
    }
}

impl TrackerBackend for ScriptedBackend {
    fn open(&self, _path: &Path, profile: &DetectionProfile) -> Result<Box<dyn BeatTracker>> {
        Ok(Box::new(ScriptedTracker {
            onsets: self.onsets.clone(),
            next: 0,
            hop_size: profile.hop_size,
        }))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

struct ScriptedTracker {
    onsets: Vec<f64>,
    next: usize,
    hop_size: usize,
}

impl BeatTracker for ScriptedTracker {
    fn next_hop(&mut self) -> HopRead {
        if self.next < self.onsets.len() {
            self.next += 1;
            HopRead {
                onset: true,
                frames_read: self.hop_size,
            }
        } else {
            // Zero-length read ends the stream
            HopRead {
                onset: false,
                frames_read: 0,
            }
        }
    }

    fn last_onset_secs(&self) -> f64 {
        self.onsets[self.next - 1]
    }
}
