//! Per-item import results

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Result of one transfer attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    Success {
        source: PathBuf,
        /// Records added (history) or 0 (config)
        records: usize,
    },
    Failure {
        source: PathBuf,
        reason: String,
    },
}

impl ImportOutcome {
    pub fn source(&self) -> &Path {
        match self {
            ImportOutcome::Success { source, .. } | ImportOutcome::Failure { source, .. } => source,
        }
    }

    /// File name of the source, for messages.
    pub fn display_name(&self) -> String {
        display_name(self.source())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Success { .. })
    }
}

/// File name of `path`, or the whole path when it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Outcomes of one directory import, in discovery order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub root: PathBuf,
    pub outcomes: Vec<ImportOutcome>,
}

impl BatchReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: ImportOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    /// Total records added across successful transfers.
    pub fn records(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                ImportOutcome::Success { records, .. } => *records,
                ImportOutcome::Failure { .. } => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ImportOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Result of a history import
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryImport {
    /// A single file was transferred (or failed, under the isolating policy)
    File(ImportOutcome),
    /// A single file was the history store itself and was not transferred
    SkippedSelf(PathBuf),
    /// A directory was scanned
    Batch(BatchReport),
}
