use crate::audio::{overlay_into, read_audio};
use crate::error::{MixError, Result};
use crate::types::{AudioData, MixPreset, Stem};

/// Stems the preset keeps, in their original order.
pub fn select_stems(stems: &[Stem], preset: MixPreset) -> Vec<&Stem> {
    stems.iter().filter(|s| preset.includes(s.role)).collect()
}

/// Build the final mix for `preset` from the separated stems.
///
/// A single matched stem passes through untouched; two or more are decoded
/// and additively overlaid onto the first. Zero matches is a fatal error.
pub fn mix_for_preset(stems: &[Stem], preset: MixPreset) -> Result<AudioData> {
    let selected = select_stems(stems, preset);

    let (first, rest) = match selected.split_first() {
        Some(parts) => parts,
        None => {
            return Err(MixError::NoMatchingStems {
                preset: preset.label().to_string(),
            })
        }
    };

    tracing::info!(
        preset = preset.label(),
        stems = selected.len(),
        "mixing stems"
    );

    let mut mix = read_audio(&first.path)?;
    for stem in rest {
        let layer = read_audio(&stem.path)?;
        overlay_into(&mut mix, &layer)?;
    }

    Ok(mix)
}
