//! Integration tests for the beatlist pipeline
//!
//! These tests verify that the full pipeline fills every slot, writes the
//! expected artifacts and fails loudly on broken pools.

use beatlist::analysis::{self, ScriptedBackend, SpectralFluxBackend};
use beatlist::config::{Cli, Settings};
use beatlist::error::BeatlistError;
use beatlist::{export, grid, pipeline};
use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Generate a click track WAV file for beat detection testing
///
/// Creates impulses (short bursts) at regular intervals matching the
/// specified BPM. This produces a clear rhythmic signal for the tracker.
fn generate_click_track(path: &Path, bpm: f32, duration_secs: f32, sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV file");

    let num_samples = (duration_secs * sample_rate as f32) as usize;
    let samples_per_beat = (60.0 / bpm * sample_rate as f32) as usize;

    // Impulse duration: ~5ms (short click)
    let impulse_samples = (0.005 * sample_rate as f32) as usize;

    for i in 0..num_samples {
        let position_in_beat = i % samples_per_beat;

        let sample = if position_in_beat < impulse_samples {
            // Exponential decay for a more natural click sound
            let decay = (-5.0 * position_in_beat as f32 / impulse_samples as f32).exp();
            0.8 * decay
        } else {
            0.0
        };

        let sample_i16 = (sample * 32767.0) as i16;
        writer
            .write_sample(sample_i16)
            .expect("Failed to write sample");
    }

    writer.finalize().expect("Failed to finalize WAV");
}

/// Create test settings with the progress bar disabled and a fixed seed
fn create_test_settings(root: &Path, output: &Path, slots: &[&str]) -> Settings {
    Settings {
        root: root.to_path_buf(),
        output: output.to_path_buf(),
        slots: slots.iter().map(|s| s.to_string()).collect(),
        seed: Some(42),
        show_progress: false,
        ..Settings::default()
    }
}

#[test]
fn test_pipeline_fills_all_slots_end_to_end() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    // A pool of 3 valid click tracks at different tempos
    generate_click_track(&input_dir.path().join("house.wav"), 128.0, 8.0, 44100);
    generate_click_track(&input_dir.path().join("hiphop.wav"), 90.0, 8.0, 44100);
    generate_click_track(&input_dir.path().join("dnb.wav"), 174.0, 8.0, 44100);

    let slots = ["zone1_1", "zone1_2", "zone1_3", "boss_1", "lobby"];
    let settings = create_test_settings(input_dir.path(), output_dir.path(), &slots);

    let result = pipeline::run(&settings).expect("Pipeline should succeed");
    assert_eq!(result.slots, 5);
    assert_eq!(result.assigned, 5);

    // Manifest: 5 entries, each drawn from the pool, slot order preserved
    let manifest =
        export::read_manifest(&output_dir.path().join("playlist.json")).expect("manifest");
    assert_eq!(manifest.song_file_names.len(), 5);
    assert_eq!(manifest.author, "Hyun");

    let pool: Vec<String> = ["house.wav", "hiphop.wav", "dnb.wav"]
        .iter()
        .map(|n| input_dir.path().join(n).to_string_lossy().to_string())
        .collect();
    for name in &manifest.song_file_names {
        assert!(pool.contains(name), "{name} was not drawn from the pool");
    }

    // Timing file and audio artifact exist for every slot
    for slot in slots {
        let grid_path = output_dir.path().join(format!("{slot}.txt"));
        let artifact_path = output_dir.path().join(format!("{slot}.wav"));
        assert!(grid_path.exists(), "{slot}.txt should exist");
        assert!(artifact_path.exists(), "{slot}.wav should exist");

        // Each grid is ascending with uniform spacing
        let timestamps = grid::read_grid(&grid_path).expect("grid should parse");
        assert!(timestamps.len() >= 2, "{slot} grid too short");
        let period = timestamps[1] - timestamps[0];
        assert!(period > 0.0);
        for pair in timestamps.windows(2) {
            assert!(pair[1] > pair[0], "{slot} grid not ascending");
            assert!(
                (pair[1] - pair[0] - period).abs() < 1e-6,
                "{slot} grid spacing not uniform"
            );
        }
    }
}

#[test]
fn test_estimate_beats_on_click_track() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let wav = input_dir.path().join("click_120.wav");
    generate_click_track(&wav, 120.0, 10.0, 44100);

    let settings = Settings::default();
    let estimate = analysis::estimate_beats(&wav, &settings.profile, &SpectralFluxBackend)
        .expect("click track should yield an estimate");

    // Hop quantization adds jitter; accept the tempo or an octave of it
    assert!(
        (60.0..=250.0).contains(&estimate.median_bpm),
        "BPM {} out of range",
        estimate.median_bpm
    );
    assert!(estimate.first_beat < estimate.last_beat);

    // The estimate must be good enough to regenerate a grid
    let timestamps = grid::generate_grid(&estimate).expect("grid");
    assert!(!timestamps.is_empty());
    assert_eq!(timestamps[0], estimate.first_beat);
    assert!(*timestamps.last().unwrap() <= estimate.last_beat);
}

#[test]
fn test_empty_directory_is_fatal() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    let settings = create_test_settings(input_dir.path(), output_dir.path(), &["lobby"]);
    let err = pipeline::run(&settings).expect_err("empty pool must be fatal");

    assert!(matches!(err, BeatlistError::EmptyPool(_)));
    assert!(!output_dir.path().join("playlist.json").exists());
}

#[test]
fn test_non_audio_files_are_ignored() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    fs::write(input_dir.path().join("readme.txt"), b"not audio").unwrap();
    fs::write(input_dir.path().join("cover.png"), b"not audio").unwrap();

    let settings = create_test_settings(input_dir.path(), output_dir.path(), &["lobby"]);
    let err = pipeline::run(&settings).expect_err("pool without audio must be fatal");

    assert!(matches!(err, BeatlistError::EmptyPool(_)));
}

#[test]
fn test_invalid_candidates_are_retried_until_a_valid_one_wins() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    // One unreadable file alongside one valid click track
    fs::write(
        input_dir.path().join("broken.wav"),
        b"This is not a valid WAV file content!!!!!",
    )
    .unwrap();
    generate_click_track(&input_dir.path().join("good.wav"), 120.0, 8.0, 44100);

    let slots = ["zone1_1", "zone1_2"];
    let settings = create_test_settings(input_dir.path(), output_dir.path(), &slots);

    let result = pipeline::run(&settings).expect("Pipeline should succeed despite the bad file");
    assert_eq!(result.assigned, 2);

    // Only the valid file can ever be assigned
    let manifest =
        export::read_manifest(&output_dir.path().join("playlist.json")).expect("manifest");
    let good = input_dir.path().join("good.wav").to_string_lossy().to_string();
    assert_eq!(manifest.song_file_names, vec![good.clone(), good]);
}

#[test]
fn test_unusable_pool_exhausts_instead_of_looping() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");

    fs::write(
        input_dir.path().join("broken.wav"),
        b"This is not a valid WAV file content!!!!!",
    )
    .unwrap();

    let mut settings = create_test_settings(input_dir.path(), output_dir.path(), &["lobby"]);
    settings.max_attempts = 3;

    let err = pipeline::run(&settings).expect_err("all-broken pool must exhaust");
    match err {
        BeatlistError::SlotExhausted { slot, attempts } => {
            assert_eq!(slot, "lobby");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected SlotExhausted, got {other}"),
    }

    // The failed run leaves no partial output behind
    assert!(!output_dir.path().join("lobby.txt").exists());
    assert!(!output_dir.path().join("lobby.wav").exists());
    assert!(!output_dir.path().join("playlist.json").exists());
}

#[test]
fn test_unknown_mode_is_rejected_at_configuration_time() {
    let cli = Cli::try_parse_from(["beatlist", "/tmp/pool", "--mode", "turbo"])
        .expect("arguments should parse");

    let err = Settings::from_cli(&cli).expect_err("unknown mode must be rejected");
    assert!(matches!(err, BeatlistError::ConfigError(_)));
}

#[test]
fn test_mode_overrides_reach_the_profile() {
    let cli = Cli::try_parse_from([
        "beatlist",
        "/tmp/pool",
        "--mode",
        "fast",
        "--hop-size",
        "256",
    ])
    .expect("arguments should parse");

    let settings = Settings::from_cli(&cli).expect("settings");
    assert_eq!(settings.profile.sample_rate, 8000);
    assert_eq!(settings.profile.window_size, 512);
    assert_eq!(settings.profile.hop_size, 256);
}

#[test]
fn test_custom_slot_list_drives_the_run() {
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");
    fs::write(input_dir.path().join("a.ogg"), b"opaque audio bytes").unwrap();

    let settings = create_test_settings(input_dir.path(), output_dir.path(), &["intro", "outro"]);
    let backend = ScriptedBackend::new(vec![0.0, 0.5, 1.0, 1.5]);

    let result = pipeline::run_with_backend(&settings, &backend).expect("pipeline");
    assert_eq!(result.assigned, 2);

    // The scripted estimate is 120 BPM over [0.0, 1.5]; grids are exact
    for slot in ["intro", "outro"] {
        let timestamps = grid::read_grid(&output_dir.path().join(format!("{slot}.txt"))).unwrap();
        assert_eq!(timestamps, vec![0.0, 0.5, 1.0, 1.5]);
        assert!(output_dir.path().join(format!("{slot}.ogg")).exists());
    }
}
