//! Beat detection modules
//!
//! This module provides the tracker trait abstractions and the spectral-flux
//! implementation. The trait seam allows swapping backends without changing
//! pipeline code.

pub mod onset;
pub mod scripted;
pub mod tempo;
pub mod traits;

pub use onset::SpectralFluxBackend;
pub use scripted::ScriptedBackend;
pub use tempo::estimate_beats;
pub use traits::{BeatTracker, HopRead, TrackerBackend};
