//! beatlist - Themed Playlist Assembly with Beat-Grid Extraction
//!
//! A command-line utility that samples audio files from a candidate pool,
//! derives a beat grid (tempo and beat timestamps) for each playlist slot
//! and emits per-track timing files plus a playlist manifest.
//!
//! # Architecture
//!
//! The library is organized into several key modules:
//!
//! - `config`: CLI argument parsing, runtime settings and analysis profiles
//! - `discovery`: candidate pool scanning
//! - `audio`: audio decoding using symphonia
//! - `analysis`: beat tracking and tempo estimation (with swappable backends)
//! - `grid`: uniform beat grid generation and persistence
//! - `pipeline`: sequential slot assignment with retry
//! - `export`: playlist manifest output
//!
//! # Example
//!
//! ```no_run
//! use beatlist::{config::Settings, pipeline};
//!
//! let settings = Settings::default();
//! let result = pipeline::run(&settings).expect("Playlist assembly failed");
//! println!("Assigned {} slots", result.assigned);
//! ```

pub mod analysis;
pub mod audio;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod grid;
pub mod pipeline;
pub mod types;

// Re-export key types at crate root
pub use error::{BeatlistError, Result};
pub use types::{AudioBuffer, BeatEstimate};
