//! Import target classification

use std::fs;
use std::path::Path;

/// How an import target is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// An ordinary file, imported on its own
    SingleFile,
    /// Anything else; scanned for candidates
    Directory,
}

/// Classify an import target with a single metadata lookup.
///
/// Paths that are neither ordinary files nor directories (broken symlinks,
/// sockets, missing paths) classify as `Directory`; discovery then finds
/// nothing under them.
pub fn classify(path: &Path) -> PathKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => PathKind::SingleFile,
        _ => PathKind::Directory,
    }
}
