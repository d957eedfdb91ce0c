use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::cache::MixCache;
use crate::config::Settings;
use crate::error::{MixError, Result};
use crate::exporter::Encoder;
use crate::fetcher::Fetcher;
use crate::mixer::mix_for_preset;
use crate::separator::Separator;
use crate::types::MixPreset;

/// Drives the download → separate → mix → export stages in strict sequence.
///
/// Collaborators are injected so each execution strategy (real subprocess,
/// mock in tests) is just another trait impl. Progress is reported through
/// the callback as coarse percent checkpoints with a user-facing message.
pub struct MixPipeline<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub separator: &'a dyn Separator,
    pub encoder: &'a dyn Encoder,
    pub settings: &'a Settings,
    pub cache: &'a MixCache,
}

impl MixPipeline<'_> {
    /// Produce the final mix for (url, preset) and return its path.
    ///
    /// The job's working directory is removed on every exit path, success
    /// or failure; only the exported file survives. A cache hit skips the
    /// external tools entirely.
    pub fn run(
        &self,
        url: &str,
        preset: MixPreset,
        progress: impl Fn(u8, &str),
    ) -> Result<PathBuf> {
        if let Some(hit) = self.cache.lookup(url, preset) {
            tracing::info!(url, preset = preset.label(), "cache hit, skipping pipeline");
            progress(100, "Complete!");
            return Ok(hit);
        }

        let work_dir = self.work_dir_for(url, preset);

        // A leftover directory from an earlier run with the same key would
        // leak stale stems into this job.
        if work_dir.exists() {
            fs::remove_dir_all(&work_dir)?;
        }

        let result = self.run_stages(url, preset, &work_dir, &progress);

        if work_dir.exists() {
            if let Err(e) = fs::remove_dir_all(&work_dir) {
                tracing::warn!("failed to clean up {}: {e}", work_dir.display());
            }
        }

        let output_path = result?;
        self.cache.store(url, preset, output_path.clone());
        progress(100, "Complete!");

        Ok(output_path)
    }

    fn run_stages(
        &self,
        url: &str,
        preset: MixPreset,
        work_dir: &Path,
        progress: &impl Fn(u8, &str),
    ) -> Result<PathBuf> {
        progress(0, "Starting process...");

        let input_dir = work_dir.join("input");
        let separated_dir = work_dir.join("separated");
        fs::create_dir_all(&input_dir)?;
        fs::create_dir_all(&separated_dir)?;
        fs::create_dir_all(&self.settings.output_dir)?;

        progress(10, "Downloading audio from YouTube...");
        let input_audio = self.fetcher.fetch(url, &input_dir)?;

        progress(30, "Separating stems... (this can take several minutes)");
        let stems = self.separator.separate(&input_audio, &separated_dir)?;
        if stems.is_empty() {
            return Err(MixError::NoStemsSeparated);
        }

        progress(80, &format!("Creating '{}' mix...", preset.label()));
        let mix = mix_for_preset(&stems, preset)?;

        progress(95, "Finalizing the file...");
        let file_name = format!("final_mix_{}.{}", preset.slug(), self.encoder.extension());
        let output_path = self.settings.output_dir.join(file_name);
        self.encoder.encode(&mix, &output_path)?;

        tracing::info!(output = %output_path.display(), "mix complete");
        Ok(output_path)
    }

    /// Working directory namespaced per (URL, preset) so distinct concurrent
    /// jobs cannot collide on intermediate files.
    fn work_dir_for(&self, url: &str, preset: MixPreset) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        let key = hasher.finish();

        self.settings
            .work_root
            .join(format!("job_{key:016x}_{}", preset.slug()))
    }
}
