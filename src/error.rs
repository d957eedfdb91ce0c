use thiserror::Error;

/// Central error type for the stem-mixer crate.
#[derive(Debug, Error)]
pub enum MixError {
    // Generic fallback (wraps anyhow)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),

    // Domain-specific variants
    #[error("Download failed for {url}: {detail}")]
    Download { url: String, detail: String },

    #[error("Stem separation failed (exit code {code}):\n{stderr}")]
    Separation { code: i32, stderr: String },

    #[error("No tracks were separated from the input audio")]
    NoStemsSeparated,

    #[error("No suitable tracks found for the '{preset}' mix")]
    NoMatchingStems { preset: String },
}

// --- Implement From conversions for common errors ---
impl From<std::io::Error> for MixError {
    fn from(e: std::io::Error) -> Self {
        MixError::Anyhow(e.into())
    }
}

impl From<hound::Error> for MixError {
    fn from(e: hound::Error) -> Self {
        MixError::Anyhow(e.into())
    }
}

pub type Result<T> = std::result::Result<T, MixError>;
