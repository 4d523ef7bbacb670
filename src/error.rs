use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SlideError {
    #[error("Slide not found: {id}")]
    NotFound { id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored data in {path} is malformed: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not find data directory")]
    DataDirUnavailable,
}

impl SlideError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SlideError::Io { path: path.into(), source }
    }
}

pub type Result<T, E = SlideError> = std::result::Result<T, E>;
