//! Installation paths and profile storage
//!
//! All paths are resolved once at startup and passed down explicitly.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::cli::Cli;

/// Default name of the current history store under `<appdata>/Cache`.
pub const HISTORY_DB_NAME: &str = "cyberdrop.sqlite";

/// Default log file name under `<appdata>/Logs`.
pub const LOG_FILE_NAME: &str = "dropimport.log";

/// Paths of the current installation
#[derive(Debug, Clone, PartialEq)]
pub struct AppPaths {
    /// Root of the installation's data (`AppData`)
    pub appdata: PathBuf,
    /// Profile storage root (`<appdata>/Configs`)
    pub config_dir: PathBuf,
    /// Current history store
    pub history_db: PathBuf,
    /// Where the import log is written
    pub log_file: PathBuf,
    /// Directory the file prompts start browsing from
    pub browse_root: PathBuf,
}

impl AppPaths {
    /// Derive every path from the appdata root, applying explicit overrides.
    pub fn resolve(
        appdata: &Path,
        history_db: Option<&Path>,
        log_file: Option<&Path>,
        browse_root: Option<&Path>,
    ) -> Self {
        let history_db = history_db
            .map(Path::to_path_buf)
            .unwrap_or_else(|| appdata.join("Cache").join(HISTORY_DB_NAME));
        let log_file = log_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| appdata.join("Logs").join(LOG_FILE_NAME));
        let browse_root = browse_root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));

        Self {
            appdata: appdata.to_path_buf(),
            config_dir: appdata.join("Configs"),
            history_db,
            log_file,
            browse_root,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::resolve(
            &cli.appdata,
            cli.history_db.as_deref(),
            cli.log_file.as_deref(),
            cli.browse_root.as_deref(),
        )
    }
}

/// Canonicalize `path`, even when it does not exist yet.
///
/// The longest existing ancestor is canonicalized and the remaining
/// components are appended with `.` and `..` applied lexically, so a store
/// that is created later resolves to the same path it will have then.
pub fn resolve_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let components: Vec<Component> = absolute.components().collect();
    for split in (1..=components.len()).rev() {
        let head: PathBuf = components[..split].iter().collect();
        if let Ok(canonical) = fs::canonicalize(&head) {
            return push_normalized(canonical, &components[split..]);
        }
    }
    push_normalized(PathBuf::new(), &components)
}

fn push_normalized(mut base: PathBuf, rest: &[Component]) -> PathBuf {
    for component in rest {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                base.pop();
            }
            other => base.push(other.as_os_str()),
        }
    }
    base
}

/// Named configuration profiles, one directory each under the storage root.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    root: PathBuf,
}

impl ConfigManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profile_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// A profile exists when its directory exists.
    pub fn profile_exists(&self, name: &str) -> bool {
        self.profile_dir(name).is_dir()
    }

    /// Profile names, sorted.
    pub fn profiles(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.root)
            .map(|read_dir| {
                read_dir
                    .flatten()
                    .filter(|entry| entry.path().is_dir())
                    .map(|entry| entry.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
