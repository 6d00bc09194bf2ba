//! Recursive discovery of legacy history databases

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Extension of legacy history databases.
pub const DB_EXTENSION: &str = "sqlite";

/// Lazy, single-pass walk yielding every legacy database under a root.
///
/// Directories are visited in file-name order. Symlinked directories are
/// followed; a link back to an ancestor is reported by walkdir as a loop and
/// skipped.
pub struct Discovery {
    walker: walkdir::IntoIter,
}

/// Start discovery under `root`. A missing or non-directory root yields nothing.
pub fn discover(root: &Path) -> Discovery {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();
    Discovery { walker }
}

impl Iterator for Discovery {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file() && is_legacy_db(entry.path()) {
                        return Some(entry.into_path());
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable entry during discovery");
                }
            }
        }
    }
}

/// Check if a path has the legacy database extension
pub fn is_legacy_db(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(DB_EXTENSION))
        .unwrap_or(false)
}
