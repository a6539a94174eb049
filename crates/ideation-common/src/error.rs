use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failures raised while loading pipeline resources or encoding text.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A configured resource is missing, unreadable or malformed.
    #[error("cannot load {what} from {}: {reason}", path.display())]
    Config {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// An artifact parsed but its contents are inconsistent.
    #[error("invalid vocabulary artifact: {0}")]
    Artifact(String),

    #[error("vocabulary fingerprint mismatch: artifact declares {expected}, computed {actual}")]
    FingerprintMismatch { expected: String, actual: String },
}

impl PipelineError {
    pub(crate) fn config(what: &'static str, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PipelineError::Config {
            what,
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
