//! Import operations with failure isolation
//!
//! [`Importer`] is the non-interactive half of the import flow: it decides
//! what gets transferred and how failures are handled. The menu and the
//! subcommands both drive it.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::classify::{classify, PathKind};
use super::discovery::discover;
use super::error::ImportError;
use super::outcome::{display_name, BatchReport, HistoryImport, ImportOutcome};
use crate::config::{resolve_path, ConfigManager};
use crate::transfer::{LegacyTransfer, TransferError};

/// What happens to a transfer error outside a directory batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record it as a failed outcome and carry on
    #[default]
    Isolate,
    /// Return it to the caller
    Propagate,
}

/// Where the self-import rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfImportGuard {
    /// Only discovered candidates are compared with the history store
    #[default]
    BatchOnly,
    /// Single-file imports are compared too
    Always,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub failure_policy: FailurePolicy,
    pub self_import_guard: SelfImportGuard,
}

pub struct Importer<'a, T: LegacyTransfer> {
    transfer: &'a T,
    profiles: &'a ConfigManager,
    history_db: PathBuf,
    options: ImportOptions,
}

impl<'a, T: LegacyTransfer> Importer<'a, T> {
    /// `history_db` is resolved again at every comparison, since a transfer
    /// may create it (or its directories) partway through a batch.
    pub fn new(
        transfer: &'a T,
        profiles: &'a ConfigManager,
        history_db: &Path,
        options: ImportOptions,
    ) -> Self {
        Self {
            transfer,
            profiles,
            history_db: history_db.to_path_buf(),
            options,
        }
    }

    pub fn history_db(&self) -> &Path {
        &self.history_db
    }

    /// Fail with `Conflict` if a profile called `name` already exists.
    pub fn check_profile_name(&self, name: &str) -> Result<(), ImportError> {
        if self.profiles.profile_exists(name) {
            return Err(ImportError::Conflict {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Convert the legacy config at `source` into a new profile `name`.
    pub fn import_config(&self, source: &Path, name: &str) -> Result<ImportOutcome, ImportError> {
        self.check_profile_name(name)?;

        match self.transfer.transfer_config(source, name) {
            Ok(()) => {
                info!(source = %source.display(), profile = name, "Imported config");
                Ok(ImportOutcome::Success {
                    source: source.to_path_buf(),
                    records: 0,
                })
            }
            Err(e) => self.handle_failure(source, e),
        }
    }

    /// Import a history target, scanning it when it is not a single file.
    pub fn import_history(&self, target: &Path) -> Result<HistoryImport, ImportError> {
        match classify(target) {
            PathKind::SingleFile => self.import_history_file(target),
            PathKind::Directory => Ok(HistoryImport::Batch(self.import_history_dir(target))),
        }
    }

    /// Transfer one legacy database into the history store.
    pub fn import_history_file(&self, path: &Path) -> Result<HistoryImport, ImportError> {
        if self.options.self_import_guard == SelfImportGuard::Always && self.is_history_db(path) {
            info!(source = %path.display(), "Not importing the history store into itself");
            return Ok(HistoryImport::SkippedSelf(path.to_path_buf()));
        }

        match self.transfer.transfer_history(path, &self.history_db) {
            Ok(records) => {
                info!(source = %path.display(), records, "Imported download history");
                Ok(HistoryImport::File(ImportOutcome::Success {
                    source: path.to_path_buf(),
                    records,
                }))
            }
            Err(e) => self.handle_failure(path, e).map(HistoryImport::File),
        }
    }

    /// Import every legacy database under `root`. Never fails.
    pub fn import_history_dir(&self, root: &Path) -> BatchReport {
        self.import_history_dir_with(root, |_| {})
    }

    /// Like [`Importer::import_history_dir`], calling `on_candidate` before
    /// each transfer attempt.
    pub fn import_history_dir_with<F>(&self, root: &Path, mut on_candidate: F) -> BatchReport
    where
        F: FnMut(&Path),
    {
        let mut report = BatchReport::new(root);

        for candidate in discover(root) {
            if self.is_history_db(&candidate) {
                continue;
            }
            on_candidate(&candidate);

            let outcome = match self.transfer.transfer_history(&candidate, &self.history_db) {
                Ok(records) => {
                    info!(source = %candidate.display(), records, "Imported download history");
                    ImportOutcome::Success {
                        source: candidate,
                        records,
                    }
                }
                Err(e) => {
                    let name = display_name(&candidate);
                    warn!(file = %name, error = %e, "Error importing {}: {}", name, e);
                    ImportOutcome::Failure {
                        source: candidate,
                        reason: e.to_string(),
                    }
                }
            };
            report.push(outcome);
        }

        report
    }

    fn is_history_db(&self, path: &Path) -> bool {
        resolve_path(path) == resolve_path(&self.history_db)
    }

    fn handle_failure(
        &self,
        source: &Path,
        error: TransferError,
    ) -> Result<ImportOutcome, ImportError> {
        match self.options.failure_policy {
            FailurePolicy::Propagate => Err(error.into()),
            FailurePolicy::Isolate => {
                let name = display_name(source);
                warn!(file = %name, error = %error, "Error importing {}: {}", name, error);
                Ok(ImportOutcome::Failure {
                    source: source.to_path_buf(),
                    reason: error.to_string(),
                })
            }
        }
    }
}
