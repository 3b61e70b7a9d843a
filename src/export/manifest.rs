//! Playlist manifest export
//!
//! The manifest is the record the playlist consumer reads: author, display
//! name and the assigned file for every slot, in slot order. It is written
//! exactly once, after all slots are resolved.

use crate::error::{BeatlistError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

/// Playlist descriptor
///
/// Serializes with the `author` / `displayName` / `songFileNames` field
/// names the playlist consumer expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistManifest {
    pub author: String,
    pub display_name: String,
    /// Assigned source paths, one per slot, in slot-processing order
    pub song_file_names: Vec<String>,
}

/// Build a manifest from the ordered per-slot assignments
pub fn build_manifest(author: &str, display_name: &str, assigned: &[PathBuf]) -> PlaylistManifest {
    PlaylistManifest {
        author: author.to_string(),
        display_name: display_name.to_string(),
        song_file_names: assigned
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect(),
    }
}

/// Write the manifest to a JSON file
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
/// This prevents a half-written manifest if the write is interrupted.
pub fn write_manifest(manifest: &PlaylistManifest, output_path: &Path) -> Result<()> {
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| BeatlistError::OutputError {
        path: output_path.to_path_buf(),
        reason: format!("Failed to create temp file: {}", e),
    })?;

    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, manifest).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        BeatlistError::OutputError {
            path: output_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    // Atomic rename: either succeeds completely or fails without modifying target
    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        BeatlistError::OutputError {
            path: output_path.to_path_buf(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!(
        "Wrote manifest with {} tracks to {}",
        manifest.song_file_names.len(),
        output_path.display()
    );

    Ok(())
}

/// Read a manifest back from disk
pub fn read_manifest(path: &Path) -> Result<PlaylistManifest> {
    let file = File::open(path).map_err(|e| BeatlistError::OutputError {
        path: path.to_path_buf(),
        reason: format!("Failed to open manifest: {}", e),
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| BeatlistError::OutputError {
        path: path.to_path_buf(),
        reason: format!("Failed to parse manifest: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_manifest() -> PlaylistManifest {
        build_manifest(
            "Hyun",
            "나의 플레이리스트",
            &[
                PathBuf::from("/pool/alpha.ogg"),
                PathBuf::from("/pool/beta.ogg"),
                PathBuf::from("/pool/alpha.ogg"),
            ],
        )
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&sample_manifest()).unwrap();
        assert!(json.contains("\"author\""));
        assert!(json.contains("\"displayName\""));
        assert!(json.contains("\"songFileNames\""));
        // Rust-side field names must not leak into the JSON
        assert!(!json.contains("display_name"));
        assert!(!json.contains("song_file_names"));
    }

    #[test]
    fn test_slot_order_is_preserved() {
        let manifest = sample_manifest();
        assert_eq!(
            manifest.song_file_names,
            vec!["/pool/alpha.ogg", "/pool/beta.ogg", "/pool/alpha.ogg"]
        );
    }

    #[test]
    fn test_manifest_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("playlist.json");

        let manifest = sample_manifest();
        write_manifest(&manifest, &path).unwrap();

        let reread = read_manifest(&path).unwrap();
        assert_eq!(reread, manifest);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("playlist.json");

        write_manifest(&sample_manifest(), &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
