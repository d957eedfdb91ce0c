use std::f32::consts::PI;

use tempfile::tempdir;

use stem_mixer::{overlay_into, read_audio, write_audio, AudioData};

fn sine(frames: usize, freq: f32, sr: u32, channels: u16) -> AudioData {
    let mut samples = Vec::with_capacity(frames * channels as usize);
    for i in 0..frames {
        let t = i as f32 / sr as f32;
        let value = (2.0 * PI * freq * t).sin() * 0.2;
        for _ in 0..channels {
            samples.push(value);
        }
    }
    AudioData {
        samples,
        sample_rate: sr,
        channels,
    }
}

#[test]
fn wav_round_trip_preserves_signal() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("tone.wav");

    let original = sine(4000, 440.0, 44_100, 2);
    write_audio(&path, &original).expect("write failed");

    let decoded = read_audio(&path).expect("read failed");
    assert_eq!(decoded.sample_rate, 44_100);
    assert_eq!(decoded.channels, 2);
    assert_eq!(decoded.samples.len(), original.samples.len());

    for (a, b) in original.samples.iter().zip(&decoded.samples) {
        assert!((a - b).abs() < 1e-3, "sample drifted: {a} vs {b}");
    }
}

#[test]
fn overlay_sums_samples() {
    let mut base = AudioData {
        samples: vec![0.1; 100],
        sample_rate: 44_100,
        channels: 1,
    };
    let layer = AudioData {
        samples: vec![0.25; 100],
        sample_rate: 44_100,
        channels: 1,
    };

    overlay_into(&mut base, &layer).expect("overlay failed");

    assert_eq!(base.samples.len(), 100);
    for s in &base.samples {
        assert!((s - 0.35).abs() < 1e-6);
    }
}

#[test]
fn overlay_truncates_to_shortest_common_length() {
    let mut base = AudioData {
        samples: vec![0.1; 200],
        sample_rate: 44_100,
        channels: 1,
    };
    let layer = AudioData {
        samples: vec![0.2; 80],
        sample_rate: 44_100,
        channels: 1,
    };

    overlay_into(&mut base, &layer).expect("overlay failed");
    assert_eq!(base.samples.len(), 80);

    // Symmetric case: shorter base, longer layer.
    let mut short_base = AudioData {
        samples: vec![0.1; 50],
        sample_rate: 44_100,
        channels: 1,
    };
    let long_layer = AudioData {
        samples: vec![0.2; 500],
        sample_rate: 44_100,
        channels: 1,
    };
    overlay_into(&mut short_base, &long_layer).expect("overlay failed");
    assert_eq!(short_base.samples.len(), 50);
}

#[test]
fn overlay_rejects_mismatched_specs() {
    let mut base = AudioData {
        samples: vec![0.0; 10],
        sample_rate: 44_100,
        channels: 2,
    };
    let other_rate = AudioData {
        samples: vec![0.0; 10],
        sample_rate: 48_000,
        channels: 2,
    };
    assert!(overlay_into(&mut base, &other_rate).is_err());

    let other_channels = AudioData {
        samples: vec![0.0; 10],
        sample_rate: 44_100,
        channels: 1,
    };
    assert!(overlay_into(&mut base, &other_channels).is_err());
}
