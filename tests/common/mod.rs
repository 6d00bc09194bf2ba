//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use dropimport::cli::{MenuChoice, Notice, Prompter};
use dropimport::transfer::{LegacyTransfer, TransferError};
use rusqlite::{params, Connection};

/// v4 `media` table as legacy installations created it
pub const LEGACY_SCHEMA: &str = "
CREATE TABLE media (
    domain TEXT,
    url_path TEXT,
    referer TEXT,
    download_path TEXT,
    download_filename TEXT,
    original_filename TEXT,
    completed INTEGER,
    created_at TIMESTAMP,
    completed_at TIMESTAMP
);
";

/// Create a legacy history database with `rows` completed downloads.
///
/// `prefix` keeps url paths distinct between databases.
pub fn create_legacy_db(path: &Path, prefix: &str, rows: usize) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(LEGACY_SCHEMA).unwrap();
    for i in 0..rows {
        conn.execute(
            "INSERT INTO media (domain, url_path, referer, download_path, download_filename,
                                original_filename, completed, created_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, '2023-01-01 10:00:00', '2023-01-01 10:05:00')",
            params![
                "bunkr",
                format!("/{}/file{}", prefix, i),
                format!("https://bunkr.example/{}", prefix),
                "/downloads",
                format!("file{}.jpg", i),
                format!("file{}.jpg", i),
            ],
        )
        .unwrap();
    }
}

/// Write bytes that SQLite will not accept as a database
pub fn create_corrupt_db(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"this is definitely not a sqlite database, just text padding it out to more than one hundred bytes so the header check fails").unwrap();
}

/// Count rows in the `media` table of a history store
pub fn count_media_rows(path: &Path) -> usize {
    let conn = Connection::open(path).unwrap();
    conn.query_row("SELECT COUNT(*) FROM media", [], |row| row.get::<_, i64>(0))
        .unwrap() as usize
}

/// A v4 config with every section the transfer understands
pub const LEGACY_CONFIG: &str = "\
Configuration:
  Apply_Config: false
  Authentication:
    gofile_api_key: abc123
    pixeldrain_api_key: ''
  Files:
    input_file: URLs.txt
    output_folder: Downloads
    db_file: download_history.sqlite
  Ignore:
    exclude_videos: false
    skip_hosts: []
  Runtime:
    simultaneous_downloads: 4
  Ratelimiting:
    connection_timeout: 15
  Sorting:
    sort_downloads: false
";

pub fn write_legacy_config(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, LEGACY_CONFIG).unwrap();
}

/// Transfer double that records calls and fails on chosen sources.
///
/// History transfers fail for any source whose file name contains
/// "corrupt"; config transfers fail for sources containing "broken".
#[derive(Default)]
pub struct RecordingTransfer {
    pub config_calls: RefCell<Vec<(PathBuf, String)>>,
    pub history_calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl RecordingTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history_sources(&self) -> Vec<PathBuf> {
        self.history_calls
            .borrow()
            .iter()
            .map(|(source, _)| source.clone())
            .collect()
    }
}

fn file_name_contains(path: &Path, needle: &str) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().contains(needle))
        .unwrap_or(false)
}

impl LegacyTransfer for RecordingTransfer {
    fn transfer_config(&self, source: &Path, profile: &str) -> Result<(), TransferError> {
        self.config_calls
            .borrow_mut()
            .push((source.to_path_buf(), profile.to_string()));
        if file_name_contains(source, "broken") {
            return Err(TransferError::Schema {
                path: source.to_path_buf(),
                reason: "config is not a YAML mapping".to_string(),
            });
        }
        Ok(())
    }

    fn transfer_history(&self, source: &Path, destination: &Path) -> Result<usize, TransferError> {
        self.history_calls
            .borrow_mut()
            .push((source.to_path_buf(), destination.to_path_buf()));
        if file_name_contains(source, "corrupt") {
            return Err(TransferError::Schema {
                path: source.to_path_buf(),
                reason: "missing table 'media'".to_string(),
            });
        }
        Ok(1)
    }
}

/// One scripted answer for [`ScriptedPrompter`]
#[derive(Debug, Clone)]
pub enum Answer {
    Action(MenuChoice),
    Name(String),
    Path(Option<PathBuf>),
}

/// Prompter that replays answers and records what it was told
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: VecDeque<Answer>,
    pub notices: Vec<Notice>,
    pub acknowledgements: usize,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Default::default()
        }
    }

    fn next(&mut self) -> anyhow::Result<Answer> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script ran out of answers"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select_action(&mut self) -> anyhow::Result<MenuChoice> {
        match self.next()? {
            Answer::Action(choice) => Ok(choice),
            other => anyhow::bail!("expected a menu choice, script had {:?}", other),
        }
    }

    fn profile_name(&mut self) -> anyhow::Result<String> {
        match self.next()? {
            Answer::Name(name) => Ok(name),
            other => anyhow::bail!("expected a profile name, script had {:?}", other),
        }
    }

    fn config_source(&mut self, _browse_root: &Path) -> anyhow::Result<Option<PathBuf>> {
        match self.next()? {
            Answer::Path(path) => Ok(path),
            other => anyhow::bail!("expected a path, script had {:?}", other),
        }
    }

    fn history_target(&mut self, _browse_root: &Path) -> anyhow::Result<Option<PathBuf>> {
        match self.next()? {
            Answer::Path(path) => Ok(path),
            other => anyhow::bail!("expected a path, script had {:?}", other),
        }
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn acknowledge(&mut self, _message: &str) -> anyhow::Result<()> {
        self.acknowledgements += 1;
        Ok(())
    }
}
