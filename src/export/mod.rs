//! Playlist manifest output

pub mod manifest;

pub use manifest::{build_manifest, read_manifest, write_manifest, PlaylistManifest};
