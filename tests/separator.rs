use std::fs;

use tempfile::tempdir;

use stem_mixer::{collect_stems, StemRole};

#[test]
fn parses_demucs_output_layout_into_typed_stems() {
    let tmp = tempdir().unwrap();
    let track_dir = tmp.path().join("htdemucs").join("input_audio");
    fs::create_dir_all(&track_dir).unwrap();

    for name in ["other.mp3", "vocals.mp3", "bass.mp3", "drums.mp3"] {
        fs::write(track_dir.join(name), b"stub").unwrap();
    }
    // Unrelated files in the layout must be ignored.
    fs::write(track_dir.join("cover.jpg"), b"stub").unwrap();

    let stems = collect_stems(tmp.path(), "htdemucs").expect("collect failed");
    let roles: Vec<StemRole> = stems.iter().map(|s| s.role).collect();

    assert_eq!(
        roles,
        [
            StemRole::Vocals,
            StemRole::Drums,
            StemRole::Bass,
            StemRole::Other
        ],
        "stems should be typed and in deterministic role order"
    );

    for stem in &stems {
        assert!(stem.path.is_file());
        assert!(stem.path.starts_with(&track_dir));
    }
}

#[test]
fn missing_layout_yields_no_stems() {
    let tmp = tempdir().unwrap();

    // No model directory at all.
    assert!(collect_stems(tmp.path(), "htdemucs").unwrap().is_empty());

    // Model directory without a track subdirectory.
    fs::create_dir_all(tmp.path().join("htdemucs")).unwrap();
    assert!(collect_stems(tmp.path(), "htdemucs").unwrap().is_empty());
}
