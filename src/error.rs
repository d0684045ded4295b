use std::path::PathBuf;

use thiserror::Error;

use crate::codec::EncodeError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file or directory {path} not writable")]
    UnwritableTarget { path: PathBuf },

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode sequence for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
}

impl StoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn encode(path: impl Into<PathBuf>, source: EncodeError) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn unwritable(path: impl Into<PathBuf>) -> Self {
        Self::UnwritableTarget { path: path.into() }
    }
}
