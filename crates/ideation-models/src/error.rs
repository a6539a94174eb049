use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse model {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// The parameters do not describe a usable model.
    #[error("malformed model: {0}")]
    Shape(String),

    #[error("feature vector has dimension {actual}, model expects {expected}")]
    Dimension { expected: usize, actual: usize },

    #[error("model was trained against vocabulary {expected}, pipeline uses {actual}")]
    FingerprintMismatch { expected: String, actual: String },
}
