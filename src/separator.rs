use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::Context;

use crate::error::{MixError, Result};
use crate::types::{Stem, StemRole};

/// Splits one audio file into stem files.
pub trait Separator: Send + Sync {
    /// Run separation on `input`, writing the model's output hierarchy under
    /// `out_dir`, and return the stems found there. Blocks until the
    /// external process exits; no timeout is enforced.
    fn separate(&self, input: &Path, out_dir: &Path) -> Result<Vec<Stem>>;
}

/// Separator backed by the demucs pretrained model, invoked as
/// `python -m demucs.separate`.
pub struct DemucsSeparator {
    python: String,
    model: String,
}

impl DemucsSeparator {
    pub fn new(python: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            model: model.into(),
        }
    }
}

impl Separator for DemucsSeparator {
    fn separate(&self, input: &Path, out_dir: &Path) -> Result<Vec<Stem>> {
        tracing::info!(
            input = %input.display(),
            model = %self.model,
            "separating stems"
        );

        let output = Command::new(&self.python)
            .args(["-m", "demucs.separate", "-n"])
            .arg(&self.model)
            .arg("--mp3")
            .arg(input)
            .arg("-o")
            .arg(out_dir)
            .output()
            .with_context(|| format!("Failed to run demucs via {}", self.python))?;

        if !output.status.success() {
            return Err(MixError::Separation {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stems = collect_stems(out_dir, &self.model)?;
        tracing::info!(count = stems.len(), "separation complete");
        Ok(stems)
    }
}

/// Map demucs' output layout (`<out>/<model>/<track>/<role>.<ext>`) to typed
/// stems. The layout is a contract of the external tool; files whose names
/// match no known role are skipped with a warning.
pub fn collect_stems(out_dir: &Path, model: &str) -> Result<Vec<Stem>> {
    let model_dir = out_dir.join(model);
    if !model_dir.is_dir() {
        return Ok(Vec::new());
    }

    // One subdirectory per source file; a single-input run has exactly one.
    let track_dir = match fs::read_dir(&model_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.is_dir())
    {
        Some(dir) => dir,
        None => return Ok(Vec::new()),
    };

    let mut stems = Vec::new();
    for entry in fs::read_dir(&track_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        match StemRole::from_file_name(name) {
            Some(role) => stems.push(Stem {
                role,
                path: path.clone(),
            }),
            None => tracing::warn!("unrecognized stem file, skipping: {}", path.display()),
        }
    }

    // Deterministic mixing order regardless of directory iteration order.
    stems.sort_by_key(|s| StemRole::ALL.iter().position(|r| *r == s.role));

    Ok(stems)
}
