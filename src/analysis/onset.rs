//! Spectral-flux beat tracking backend
//!
//! Decodes the source to the profile sample rate, then walks it hop by hop:
//! each hop is windowed, transformed, and compared against the previous
//! spectrum. A half-wave-rectified log-magnitude flux above an adaptive
//! threshold marks a beat onset.

use crate::analysis::traits::{BeatTracker, HopRead, TrackerBackend};
use crate::audio;
use crate::config::DetectionProfile;
use crate::error::Result;
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Flux values below this never count as onsets, whatever the history says
const FLUX_FLOOR: f32 = 0.5;

/// Onset threshold: flux must exceed mean + K * stddev of recent hops
const THRESHOLD_SIGMA: f32 = 2.0;

/// Number of recent flux values kept for the adaptive threshold
const HISTORY_LEN: usize = 32;

/// Minimum spacing between reported onsets, in seconds
const MIN_ONSET_GAP_SECS: f64 = 0.2;

/// Production tracker backend based on spectral flux
pub struct SpectralFluxBackend;

impl TrackerBackend for SpectralFluxBackend {
    fn open(&self, path: &Path, profile: &DetectionProfile) -> Result<Box<dyn BeatTracker>> {
        let buffer = audio::decode(path, profile.sample_rate)?;
        debug!(
            "Tracking beats in {} ({} samples, window {}, hop {})",
            path.display(),
            buffer.len(),
            profile.window_size,
            profile.hop_size
        );
        Ok(Box::new(SpectralFluxTracker::new(
            buffer.samples,
            profile.sample_rate,
            profile.window_size,
            profile.hop_size,
        )))
    }

    fn name(&self) -> &'static str {
        "spectral-flux"
    }
}

/// Hop-by-hop spectral-flux onset tracker over a decoded buffer
pub struct SpectralFluxTracker {
    samples: Vec<f32>,
    sample_rate: u32,
    window_size: usize,
    hop_size: usize,
    cursor: usize,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    prev_magnitudes: Vec<f32>,
    flux_history: VecDeque<f32>,
    last_onset: f64,
    has_onset: bool,
}

impl SpectralFluxTracker {
    pub fn new(samples: Vec<f32>, sample_rate: u32, window_size: usize, hop_size: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(window_size);

        // Hann window
        let window: Vec<f32> = (0..window_size)
            .map(|i| {
                let t = i as f32 / (window_size - 1).max(1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * t).cos())
            })
            .collect();

        Self {
            samples,
            sample_rate,
            window_size,
            hop_size,
            cursor: 0,
            fft,
            window,
            prev_magnitudes: vec![0.0; window_size / 2 + 1],
            flux_history: VecDeque::with_capacity(HISTORY_LEN),
            last_onset: 0.0,
            has_onset: false,
        }
    }

    /// Spectral flux of the window ending at the current cursor
    ///
    /// Half-wave rectified difference of log magnitudes against the previous
    /// window, averaged over bins. The log scale keeps quiet onsets visible
    /// next to loud sustained content.
    fn spectral_flux(&mut self) -> f32 {
        let end = self.cursor;
        let start = end.saturating_sub(self.window_size);
        let frame = &self.samples[start..end];

        // Right-align short frames, zero-padding the front
        let pad = self.window_size - frame.len();
        let mut buffer: Vec<Complex<f32>> = (0..self.window_size)
            .map(|i| {
                let sample = if i < pad { 0.0 } else { frame[i - pad] };
                Complex::new(sample * self.window[i], 0.0)
            })
            .collect();

        self.fft.process(&mut buffer);

        let magnitudes: Vec<f32> = buffer[..self.window_size / 2 + 1]
            .iter()
            .map(|c| (c.re * c.re + c.im * c.im).sqrt())
            .collect();

        let flux_sum: f32 = magnitudes
            .iter()
            .zip(self.prev_magnitudes.iter())
            .map(|(current, prev)| {
                let log_current = (current + 1e-10_f32).ln();
                let log_prev = (prev + 1e-10_f32).ln();
                (log_current - log_prev).max(0.0)
            })
            .sum();

        self.prev_magnitudes = magnitudes;

        flux_sum / (self.window_size / 2 + 1) as f32
    }

    /// Adaptive threshold test against the recent flux history
    fn exceeds_threshold(&self, flux: f32) -> bool {
        if flux < FLUX_FLOOR {
            return false;
        }
        if self.flux_history.is_empty() {
            return true;
        }

        let n = self.flux_history.len() as f32;
        let mean: f32 = self.flux_history.iter().sum::<f32>() / n;
        let variance: f32 = self
            .flux_history
            .iter()
            .map(|f| (f - mean) * (f - mean))
            .sum::<f32>()
            / n;

        flux > mean + THRESHOLD_SIGMA * variance.sqrt()
    }

    fn push_history(&mut self, flux: f32) {
        if self.flux_history.len() == HISTORY_LEN {
            self.flux_history.pop_front();
        }
        self.flux_history.push_back(flux);
    }
}

impl BeatTracker for SpectralFluxTracker {
    fn next_hop(&mut self) -> HopRead {
        let remaining = self.samples.len() - self.cursor;
        let frames_read = remaining.min(self.hop_size);
        self.cursor += frames_read;

        if frames_read == 0 {
            return HopRead {
                onset: false,
                frames_read,
            };
        }

        let hop_start = (self.cursor - frames_read) as f64 / self.sample_rate as f64;
        let flux = self.spectral_flux();

        let gap_ok = !self.has_onset || hop_start - self.last_onset >= MIN_ONSET_GAP_SECS;
        let onset = gap_ok && self.exceeds_threshold(flux);

        self.push_history(flux);

        if onset {
            self.last_onset = hop_start;
            self.has_onset = true;
        }

        HopRead { onset, frames_read }
    }

    fn last_onset_secs(&self) -> f64 {
        self.last_onset
    }
}
