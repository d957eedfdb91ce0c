use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// One isolated component of a mixed track, as produced by the separator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StemRole {
    Vocals,
    Drums,
    Bass,
    Other,
}

impl StemRole {
    pub const ALL: [StemRole; 4] = [
        StemRole::Vocals,
        StemRole::Drums,
        StemRole::Bass,
        StemRole::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StemRole::Vocals => "vocals",
            StemRole::Drums => "drums",
            StemRole::Bass => "bass",
            StemRole::Other => "other",
        }
    }

    /// Infer the role from a stem file name. The separator tags roles via
    /// filenames (`vocals.mp3`, `drums.mp3`, ...), so a substring match is
    /// the contract; unknown names yield `None`.
    pub fn from_file_name(name: &str) -> Option<StemRole> {
        let name = name.to_lowercase();
        StemRole::ALL
            .into_iter()
            .find(|role| name.contains(role.as_str()))
    }
}

/// A stem file on disk, tagged by its role.
#[derive(Clone, Debug)]
pub struct Stem {
    pub role: StemRole,
    pub path: PathBuf,
}

/// Which stems end up in the final mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MixPreset {
    Karaoke,
    Drumless,
    DrumsOnly,
}

impl MixPreset {
    pub const ALL: [MixPreset; 3] = [
        MixPreset::Karaoke,
        MixPreset::Drumless,
        MixPreset::DrumsOnly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MixPreset::Karaoke => "Karaoke (no vocals)",
            MixPreset::Drumless => "Drumless",
            MixPreset::DrumsOnly => "Drums only",
        }
    }

    /// Filename-safe form of the label: lowercased, spaces to underscores,
    /// parentheses stripped. "Drums only" becomes "drums_only".
    pub fn slug(&self) -> String {
        self.label()
            .to_lowercase()
            .replace(' ', "_")
            .replace(['(', ')'], "")
    }

    /// The stem-inclusion predicate for this preset.
    pub fn includes(&self, role: StemRole) -> bool {
        match self {
            MixPreset::Karaoke => role != StemRole::Vocals,
            MixPreset::Drumless => role != StemRole::Drums,
            MixPreset::DrumsOnly => role == StemRole::Drums,
        }
    }
}
