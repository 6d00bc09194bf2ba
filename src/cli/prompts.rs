//! Interactive prompts using dialoguer
//!
//! The import menu talks to the user only through [`Prompter`], so the menu
//! loop can be driven by a script in tests.

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::file_selector::{
    run_file_selector, FileSelectResult, SelectMode, CONFIG_EXTENSIONS, HISTORY_EXTENSIONS,
};
use crate::import::BatchReport;
use crate::report::display_batch_summary;
use crate::utils::{print_error, print_info, print_success, print_warning};

/// Entries of the import menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ImportConfig,
    ImportHistory,
    Done,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 3] = [
        MenuChoice::ImportConfig,
        MenuChoice::ImportHistory,
        MenuChoice::Done,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::ImportConfig => "Import Config",
            MenuChoice::ImportHistory => "Import download history",
            MenuChoice::Done => "Done",
        }
    }
}

/// Something the session reports back to the user
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A profile with this name already exists
    Conflict { name: String },
    ConfigImported { profile: String },
    HistoryImported { source: PathBuf, records: usize },
    /// The chosen file is the current history database
    SkippedSelf { path: PathBuf },
    /// A config or single-file import failed
    Failed { name: String, reason: String },
    /// A directory import finished
    Batch(BatchReport),
}

/// User interaction needed by the import menu
pub trait Prompter {
    fn select_action(&mut self) -> Result<MenuChoice>;

    /// Name for the new profile. Never empty.
    fn profile_name(&mut self) -> Result<String>;

    /// An existing legacy config file, or `None` if the user backed out.
    fn config_source(&mut self, browse_root: &Path) -> Result<Option<PathBuf>>;

    /// An existing history file or directory, or `None` if the user backed out.
    fn history_target(&mut self, browse_root: &Path) -> Result<Option<PathBuf>>;

    fn notify(&mut self, notice: &Notice);

    /// Wait until the user has read `message`.
    fn acknowledge(&mut self, message: &str) -> Result<()>;
}

/// Terminal prompts
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    fn choose_path(
        &self,
        message: &str,
        browse_root: &Path,
        mode: SelectMode,
        validate: fn(&str) -> Result<(), String>,
    ) -> Result<Option<PathBuf>> {
        let how = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(&["Browse", "Type a path", "Back"])
            .default(0)
            .interact()?;

        match how {
            0 => match run_file_selector(browse_root, mode)? {
                FileSelectResult::Selected(path) => Ok(Some(path)),
                FileSelectResult::Cancelled => Ok(None),
            },
            1 => {
                let initial = format!("{}{}", browse_root.display(), std::path::MAIN_SEPARATOR);
                let typed: String = Input::with_theme(&self.theme)
                    .with_prompt("Path")
                    .with_initial_text(initial)
                    .validate_with(|input: &String| validate(input))
                    .interact_text()?;
                Ok(Some(expand_home(&typed)))
            }
            _ => Ok(None),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn select_action(&mut self) -> Result<MenuChoice> {
        let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(MenuChoice::ALL[index])
    }

    fn profile_name(&mut self) -> Result<String> {
        let name: String = Input::with_theme(&self.theme)
            .with_prompt("What should this config be called?")
            .validate_with(|input: &String| validate_profile_name(input))
            .interact_text()?;
        Ok(name.trim().to_string())
    }

    fn config_source(&mut self, browse_root: &Path) -> Result<Option<PathBuf>> {
        self.choose_path(
            "Select the config file to import",
            browse_root,
            SelectMode::File(CONFIG_EXTENSIONS),
            validate_file_path,
        )
    }

    fn history_target(&mut self, browse_root: &Path) -> Result<Option<PathBuf>> {
        self.choose_path(
            "Select the download history database, or a folder to search",
            browse_root,
            SelectMode::FileOrDirectory(HISTORY_EXTENSIONS),
            validate_existing_path,
        )
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::Conflict { name } => {
                print_warning(&format!("Config with name '{}' already exists!", name))
            }
            Notice::ConfigImported { profile } => {
                print_success(&format!("Imported config as '{}'", profile))
            }
            Notice::HistoryImported { source, records } => print_success(&format!(
                "Imported {} record(s) from {}",
                records,
                source.display()
            )),
            Notice::SkippedSelf { path } => print_info(&format!(
                "{} is the current history database, nothing to import",
                path.display()
            )),
            Notice::Failed { name, reason } => {
                print_error(&format!("Error importing {}: {}", name, reason))
            }
            Notice::Batch(report) => display_batch_summary(report),
        }
    }

    fn acknowledge(&mut self, message: &str) -> Result<()> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(true)
            .interact()?;
        Ok(())
    }
}

/// Profile names become directory names: non-empty, one path component.
pub fn validate_profile_name(input: &str) -> Result<(), String> {
    let name = input.trim();
    if name.is_empty() {
        return Err("Input should not be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') {
        return Err("Name must not contain path separators".to_string());
    }
    if name == "." || name == ".." {
        return Err("Name must not be '.' or '..'".to_string());
    }
    Ok(())
}

/// Accepts a path to an existing ordinary file.
pub fn validate_file_path(input: &str) -> Result<(), String> {
    if expand_home(input).is_file() {
        Ok(())
    } else {
        Err("Input is not a file".to_string())
    }
}

/// Accepts a path to an existing file or directory.
pub fn validate_existing_path(input: &str) -> Result<(), String> {
    if expand_home(input).exists() {
        Ok(())
    } else {
        Err("Input is not a file or directory".to_string())
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    let input = input.trim();
    if input == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(input));
    }
    if let Some(rest) = input
        .strip_prefix("~/")
        .or_else(|| input.strip_prefix("~\\"))
    {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}
