use std::path::Path;

use tempfile::tempdir;

use stem_mixer::{
    mix_for_preset, read_audio, select_stems, write_audio, AudioData, MixError, MixPreset, Stem,
    StemRole,
};

fn write_stem(dir: &Path, role: StemRole, value: f32, frames: usize) -> Stem {
    let audio = AudioData {
        samples: vec![value; frames * 2],
        sample_rate: 44_100,
        channels: 2,
    };
    let path = dir.join(format!("{}.wav", role.as_str()));
    write_audio(&path, &audio).expect("failed to write stem fixture");
    Stem { role, path }
}

#[test]
fn selection_filters_by_preset_and_keeps_order() {
    let stems = vec![
        Stem {
            role: StemRole::Vocals,
            path: "vocals.mp3".into(),
        },
        Stem {
            role: StemRole::Drums,
            path: "drums.mp3".into(),
        },
        Stem {
            role: StemRole::Bass,
            path: "bass.mp3".into(),
        },
        Stem {
            role: StemRole::Other,
            path: "other.mp3".into(),
        },
    ];

    let karaoke: Vec<StemRole> = select_stems(&stems, MixPreset::Karaoke)
        .iter()
        .map(|s| s.role)
        .collect();
    assert_eq!(karaoke, [StemRole::Drums, StemRole::Bass, StemRole::Other]);

    let drums_only: Vec<StemRole> = select_stems(&stems, MixPreset::DrumsOnly)
        .iter()
        .map(|s| s.role)
        .collect();
    assert_eq!(drums_only, [StemRole::Drums]);
}

#[test]
fn single_stem_mix_is_sample_identical() {
    let tmp = tempdir().unwrap();
    let vocals = write_stem(tmp.path(), StemRole::Vocals, 0.1, 2000);
    let drums = write_stem(tmp.path(), StemRole::Drums, 0.4, 2000);

    let mix = mix_for_preset(&[vocals, drums.clone()], MixPreset::DrumsOnly)
        .expect("drums-only mix failed");
    let reference = read_audio(&drums.path).expect("failed to decode drums");

    assert_eq!(mix.samples, reference.samples, "no-op mix path degraded audio");
    assert_eq!(mix.sample_rate, reference.sample_rate);
    assert_eq!(mix.channels, reference.channels);
}

#[test]
fn multi_stem_mix_overlays_at_shortest_length() {
    let tmp = tempdir().unwrap();
    let bass = write_stem(tmp.path(), StemRole::Bass, 0.2, 3000);
    let other = write_stem(tmp.path(), StemRole::Other, 0.3, 2000);

    let mix = mix_for_preset(&[bass, other], MixPreset::Karaoke).expect("karaoke mix failed");

    assert_eq!(mix.samples.len(), 2000 * 2);
    for s in &mix.samples {
        assert!((s - 0.5).abs() < 5e-3, "unexpected mixed sample {s}");
    }
}

#[test]
fn empty_selection_is_a_no_suitable_tracks_error() {
    let tmp = tempdir().unwrap();
    let vocals = write_stem(tmp.path(), StemRole::Vocals, 0.1, 100);

    let err = mix_for_preset(&[vocals], MixPreset::Karaoke).unwrap_err();
    assert!(matches!(err, MixError::NoMatchingStems { .. }));
    assert!(
        err.to_string().contains("No suitable tracks"),
        "unexpected message: {err}"
    );
}
