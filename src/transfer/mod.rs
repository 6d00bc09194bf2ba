//! Transfer operations - convert one v4 artifact into the current format
//!
//! The import flow treats these as opaque collaborators behind the
//! [`LegacyTransfer`] trait. [`V4Transfer`] is the production implementation.

pub mod config;
pub mod error;
pub mod history;

use std::path::{Path, PathBuf};

pub use error::TransferError;

/// Converts a single legacy artifact into the current installation's format.
pub trait LegacyTransfer {
    /// Convert a legacy config file into a new profile called `profile`.
    fn transfer_config(&self, source: &Path, profile: &str) -> Result<(), TransferError>;

    /// Merge a legacy history database into `destination`.
    ///
    /// Returns the number of records that were added.
    fn transfer_history(&self, source: &Path, destination: &Path) -> Result<usize, TransferError>;
}

/// Transfers v4 YAML configs and v4 SQLite history databases.
#[derive(Debug, Clone)]
pub struct V4Transfer {
    config_dir: PathBuf,
}

impl V4Transfer {
    /// `config_dir` is the profile storage root new profiles are written under.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }
}

impl LegacyTransfer for V4Transfer {
    fn transfer_config(&self, source: &Path, profile: &str) -> Result<(), TransferError> {
        config::transfer_v4_config(source, &self.config_dir.join(profile))
    }

    fn transfer_history(&self, source: &Path, destination: &Path) -> Result<usize, TransferError> {
        history::transfer_v4_history(source, destination)
    }
}
