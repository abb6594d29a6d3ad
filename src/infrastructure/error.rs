use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failures reading or writing the diary's JSON files.
///
/// A missing file is never an error: partitions and the index both read as
/// empty until their first write.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid JSON document: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Corrupt { path, .. } | Self::Encode { path, .. } => path,
        }
    }
}
