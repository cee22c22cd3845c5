//! Error types shared across Handsign crates.

use std::path::PathBuf;

/// Top-level error type for Handsign operations.
#[derive(Debug, thiserror::Error)]
pub enum HandsignError {
    #[error("Landmark index {index} is outside 0..=20")]
    InvalidIndex { index: usize },

    #[error("Landmark index set is empty")]
    EmptyIndexSet,

    #[error("Hand frame must have exactly 21 landmarks, got {len}")]
    InvalidFrame { len: usize },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to persist {records} record(s) to {path}: {source}")]
    Persist {
        path: PathBuf,
        records: usize,
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Dataset error: {message}")]
    Dataset { message: String },

    #[error("Detector error: {message}")]
    Detector { message: String },
}

/// Result type alias using HandsignError.
pub type HandsignResult<T> = Result<T, HandsignError>;

impl HandsignError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
        }
    }

    pub fn detector(msg: impl Into<String>) -> Self {
        Self::Detector {
            message: msg.into(),
        }
    }

    /// Map a failed read into `NotFound` or `Io` depending on the error kind.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Whether the failure comes from the environment (disk, files) rather
    /// than from a misconfigured rule or a programming error.
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::Persist { .. }
                | Self::NotFound { .. }
                | Self::Parse { .. }
                | Self::Detector { .. }
        )
    }
}
