//! Interactive file browser using ratatui
//!
//! Lets the user pick a legacy config file, a legacy history database, or a
//! whole directory to scan for databases.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::import::DB_EXTENSION;
use crate::utils::truncate_path;

/// Extensions offered when importing a config
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Extensions offered when importing history
pub const HISTORY_EXTENSIONS: &[&str] = &[DB_EXTENSION];

/// What the browser lets the user pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// A file with one of the extensions
    File(&'static [&'static str]),
    /// A file with one of the extensions, or the current directory
    FileOrDirectory(&'static [&'static str]),
}

impl SelectMode {
    fn extensions(&self) -> &'static [&'static str] {
        match self {
            SelectMode::File(exts) | SelectMode::FileOrDirectory(exts) => exts,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            SelectMode::File(_) => " Select File ",
            SelectMode::FileOrDirectory(_) => " Select File or Directory ",
        }
    }
}

/// Result of the file selector interaction
#[derive(Debug, Clone, PartialEq)]
pub enum FileSelectResult {
    /// User selected a file or directory
    Selected(PathBuf),
    /// User cancelled
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `..`
    Parent,
    /// Pick the directory being shown
    CurrentDir,
    Dir,
    File,
}

/// A row in the file browser
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl FileEntry {
    fn is_navigable(&self) -> bool {
        matches!(self.kind, EntryKind::Parent | EntryKind::Dir)
    }
}

/// Label of the entry that selects the directory being shown
pub const USE_THIS_DIRECTORY: &str = "[ Import this directory ]";

struct FileSelectorState {
    mode: SelectMode,
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    selected: usize,
    search: String,
    filtered: Vec<usize>,
}

impl FileSelectorState {
    fn new(start_dir: PathBuf, mode: SelectMode) -> Self {
        let entries = list_directory(&start_dir, mode);
        let filtered: Vec<usize> = (0..entries.len()).collect();
        Self {
            mode,
            current_dir: start_dir,
            entries,
            selected: 0,
            search: String::new(),
            filtered,
        }
    }

    fn refresh(&mut self) {
        self.entries = list_directory(&self.current_dir, self.mode);
        self.search.clear();
        self.filtered = (0..self.entries.len()).collect();
        self.selected = 0;
    }

    fn navigate_to(&mut self, path: PathBuf) {
        self.current_dir = path;
        self.refresh();
    }

    fn update_filter(&mut self) {
        self.filtered = filter_entries(&self.entries, &self.search);
        self.selected = 0;
    }

    fn highlighted(&self) -> Option<&FileEntry> {
        self.filtered.get(self.selected).map(|&i| &self.entries[i])
    }

    /// Apply one key press. Returns the result once the user picks or cancels.
    fn handle_key(&mut self, code: KeyCode) -> Option<FileSelectResult> {
        match code {
            KeyCode::Enter => {
                let entry = self.highlighted()?.clone();
                if entry.is_navigable() {
                    self.navigate_to(entry.path);
                } else {
                    return Some(FileSelectResult::Selected(entry.path));
                }
            }
            KeyCode::Esc if self.search.is_empty() => return Some(FileSelectResult::Cancelled),
            KeyCode::Esc => {
                self.search.clear();
                self.update_filter();
            }
            KeyCode::Backspace if self.search.is_empty() => {
                if let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) {
                    self.navigate_to(parent);
                }
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.update_filter();
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.filtered.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                self.search.push(c);
                self.update_filter();
            }
            _ => {}
        }
        None
    }
}

/// Indices of entries whose name contains `search`, ignoring case.
/// The parent and current-directory rows always stay visible.
pub fn filter_entries(entries: &[FileEntry], search: &str) -> Vec<usize> {
    let search_lower = search.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            matches!(entry.kind, EntryKind::Parent | EntryKind::CurrentDir)
                || entry.name.to_lowercase().contains(&search_lower)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Run the interactive file selector starting at `start_dir`
pub fn run_file_selector(start_dir: &Path, mode: SelectMode) -> Result<FileSelectResult> {
    let start_dir = if start_dir.is_dir() {
        start_dir.to_path_buf()
    } else {
        PathBuf::from(".")
    };

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_file_selector_loop(&mut terminal, start_dir, mode);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_file_selector_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    start_dir: PathBuf,
    mode: SelectMode,
) -> Result<FileSelectResult> {
    let mut state = FileSelectorState::new(start_dir, mode);

    loop {
        terminal.draw(|frame| draw_file_selector(frame, &state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if let Some(result) = state.handle_key(key.code) {
                    return Ok(result);
                }
            }
        }
    }
}

/// List a directory for the browser.
///
/// Order: `..`, the current-directory row (directory mode only), then
/// sub-directories and matching files, directories first and otherwise
/// case-insensitive by name. Hidden entries are skipped.
pub fn list_directory(path: &Path, mode: SelectMode) -> Vec<FileEntry> {
    let mut entries = Vec::new();

    if let Some(parent) = path.parent() {
        if parent != path {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                kind: EntryKind::Parent,
            });
        }
    }

    if matches!(mode, SelectMode::FileOrDirectory(_)) {
        entries.push(FileEntry {
            name: USE_THIS_DIRECTORY.to_string(),
            path: path.to_path_buf(),
            kind: EntryKind::CurrentDir,
        });
    }

    let mut listed = Vec::new();
    if let Ok(read_dir) = std::fs::read_dir(path) {
        for entry in read_dir.flatten() {
            let entry_path = entry.path();
            let is_dir = entry_path.is_dir();
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with('.') {
                continue;
            }

            if is_dir {
                listed.push(FileEntry {
                    name,
                    path: entry_path,
                    kind: EntryKind::Dir,
                });
            } else if has_extension(&entry_path, mode.extensions()) {
                listed.push(FileEntry {
                    name,
                    path: entry_path,
                    kind: EntryKind::File,
                });
            }
        }
    }

    listed.sort_by(|a, b| match (a.kind, b.kind) {
        (EntryKind::Dir, EntryKind::File) => std::cmp::Ordering::Less,
        (EntryKind::File, EntryKind::Dir) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
    entries.extend(listed);

    entries
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn draw_file_selector(frame: &mut Frame, state: &FileSelectorState) {
    let area = frame.area();
    let width = 66u16.min(area.width);
    let height = 22u16.min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(state.mode.title())
        .title_alignment(Alignment::Center);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [header, list_area, help] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let filter = if state.search.is_empty() {
        Span::styled("type to filter", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(state.search.as_str(), Style::default().fg(Color::Yellow))
    };
    let header_text = vec![
        Line::from(Span::raw(truncate_path(
            &state.current_dir,
            (header.width as usize).saturating_sub(2),
        ))),
        Line::from(vec![Span::raw("Filter: "), filter]),
    ];
    frame.render_widget(Paragraph::new(header_text), header);

    let items: Vec<ListItem> = if state.filtered.is_empty() {
        vec![ListItem::new("  (nothing to select here)").style(Style::default().fg(Color::DarkGray))]
    } else {
        state
            .filtered
            .iter()
            .map(|&i| entry_item(&state.entries[i]))
            .collect()
    };
    let list = List::new(items)
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, list_area, &mut list_state);

    frame.render_widget(
        Paragraph::new("Enter open/select · Backspace up · Esc cancel")
            .style(Style::default().fg(Color::DarkGray)),
        help,
    );
}

fn entry_item(entry: &FileEntry) -> ListItem<'_> {
    let (label, color) = match entry.kind {
        EntryKind::Parent => (entry.name.clone(), Color::Cyan),
        EntryKind::Dir => (format!("{}/", entry.name), Color::Cyan),
        EntryKind::CurrentDir => (entry.name.clone(), Color::Green),
        EntryKind::File => (entry.name.clone(), Color::White),
    };
    ListItem::new(label).style(Style::default().fg(color))
}
