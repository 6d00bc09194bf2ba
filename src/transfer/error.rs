//! Error types for legacy transfers.
//!
//! Every variant carries the path that caused it so batch reports can name
//! the offending file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting a legacy config or history database.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A config file is not valid YAML, or could not be serialized.
    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// SQLite rejected the file or a statement against it.
    #[error("Database error in {}: {source}", path.display())]
    Sqlite {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The file parsed but does not look like a v4 artifact.
    #[error("Unsupported legacy schema in {}: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },

    /// The destination cannot receive the transfer.
    #[error("Cannot write to {}: {reason}", path.display())]
    Destination { path: PathBuf, reason: String },
}

impl TransferError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn sqlite(path: impl Into<PathBuf>, source: rusqlite::Error) -> Self {
        Self::Sqlite {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
