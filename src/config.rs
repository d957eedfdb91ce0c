use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Tool locations and directories. Everything has a working default; a TOML
/// file can override any field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Program used to download audio from a video URL.
    pub yt_dlp_program: String,
    /// Python interpreter that has demucs installed.
    pub python_program: String,
    /// Program used for the final lossy encode.
    pub ffmpeg_program: String,
    /// Demucs model name; also the first directory level of its output.
    pub demucs_model: String,
    /// Root under which per-job working directories are created.
    pub work_root: PathBuf,
    /// Shared directory for final mixes, keyed by preset name.
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            yt_dlp_program: "yt-dlp".into(),
            python_program: "python3".into(),
            ffmpeg_program: "ffmpeg".into(),
            demucs_model: "htdemucs".into(),
            work_root: std::env::temp_dir().join("stem-mixer"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Invalid config {}: {e}. Using defaults.", path.display());
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        }
    }

    /// Platform config file location, e.g. `~/.config/stem-mixer/settings.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "StemMixer", "stem-mixer")
            .map(|proj| proj.config_dir().join("settings.toml"))
    }
}
