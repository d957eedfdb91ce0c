use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MixError, Result};

/// Obtains one audio file from a video URL.
pub trait Fetcher: Send + Sync {
    /// Download the best available audio for `url` into `dest_dir` and
    /// return the path of the resulting file.
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Fetcher backed by the yt-dlp executable. Downloads the best audio track
/// and has yt-dlp transcode it to MP3 in place.
pub struct YtDlpFetcher {
    program: String,
}

impl YtDlpFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Fetcher for YtDlpFetcher {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        // Extension template lets yt-dlp pick the intermediate container;
        // --audio-format mp3 fixes what it converges on.
        let template = dest_dir.join("input_audio.%(ext)s");

        tracing::info!(url, "downloading audio");

        let output = Command::new(&self.program)
            .args(["-f", "bestaudio/best", "--no-playlist"])
            .args(["-x", "--audio-format", "mp3"])
            .arg("-o")
            .arg(&template)
            .arg(url)
            .output()
            .map_err(|e| MixError::Download {
                url: url.to_string(),
                detail: format!("failed to run {}: {e}", self.program),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MixError::Download {
                url: url.to_string(),
                detail: stderr.trim().to_string(),
            });
        }

        let audio_path = dest_dir.join("input_audio.mp3");
        if !audio_path.is_file() {
            return Err(MixError::Download {
                url: url.to_string(),
                detail: "downloader reported success but produced no audio file".into(),
            });
        }

        tracing::info!(path = %audio_path.display(), "download complete");
        Ok(audio_path)
    }
}
