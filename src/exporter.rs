use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context};

use crate::audio::write_audio;
use crate::error::Result;
use crate::types::AudioData;

/// Encodes a mixed-down buffer to its final on-disk format.
pub trait Encoder: Send + Sync {
    /// File extension of the produced format, without the dot.
    fn extension(&self) -> &'static str;

    /// Encode `audio` to `dest`, overwriting any existing file.
    fn encode(&self, audio: &AudioData, dest: &Path) -> Result<()>;
}

/// MP3 encoder that delegates to the ffmpeg executable: the buffer is
/// written to a scratch WAV and transcoded with libmp3lame.
pub struct FfmpegEncoder {
    program: String,
}

impl FfmpegEncoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Encoder for FfmpegEncoder {
    fn extension(&self) -> &'static str {
        "mp3"
    }

    fn encode(&self, audio: &AudioData, dest: &Path) -> Result<()> {
        let scratch = tempfile::Builder::new()
            .prefix("stem-mixer-")
            .suffix(".wav")
            .tempfile()?;

        write_audio(scratch.path(), audio)?;

        tracing::info!(dest = %dest.display(), "encoding final mix");

        let output = Command::new(&self.program)
            .args(["-hide_banner", "-loglevel", "error", "-y"])
            .arg("-i")
            .arg(scratch.path())
            .args(["-codec:a", "libmp3lame", "-qscale:a", "2"])
            .arg(dest)
            .output()
            .with_context(|| format!("Failed to run {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("ffmpeg encode failed: {}", stderr.trim()).into());
        }

        Ok(())
    }
}
