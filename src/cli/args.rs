//! Command-line argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::import::{FailurePolicy, ImportOptions, SelfImportGuard};

/// Dropimport - bring v4 configs and download history into the current installation
#[derive(Parser, Debug)]
#[command(name = "dropimport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root of the current installation's data
    #[arg(long, global = true, default_value = "AppData")]
    pub appdata: PathBuf,

    /// Current download history database.
    /// Defaults to Cache/cyberdrop.sqlite under the appdata root.
    #[arg(long, global = true)]
    pub history_db: Option<PathBuf>,

    /// Directory the file browser starts in (defaults to the home directory)
    #[arg(long, global = true)]
    pub browse_root: Option<PathBuf>,

    /// Log file path. Defaults to Logs/dropimport.log under the appdata root.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Stop on the first failed config or single-file history import
    /// instead of reporting it and carrying on.
    /// Directory imports always continue past individual failures.
    #[arg(long, global = true, default_value = "false")]
    pub strict: bool,

    /// Also skip single-file history imports that name the current
    /// history database (directory imports always skip it)
    #[arg(long, global = true, default_value = "false")]
    pub guard_single_file: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a v4 config file as a new profile
    Config {
        /// v4 config file (YAML)
        source: PathBuf,

        /// Name of the new profile
        #[arg(short, long, value_parser = parse_profile_name)]
        name: String,
    },

    /// Import a v4 download history database, or every .sqlite file under a directory
    History {
        /// Database file or directory to scan
        path: PathBuf,

        /// Write the directory import report as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

impl Cli {
    /// Import behaviour selected by the flags.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            failure_policy: if self.strict {
                FailurePolicy::Propagate
            } else {
                FailurePolicy::Isolate
            },
            self_import_guard: if self.guard_single_file {
                SelfImportGuard::Always
            } else {
                SelfImportGuard::BatchOnly
            },
        }
    }
}

/// Value parser for profile names
fn parse_profile_name(s: &str) -> Result<String, String> {
    super::prompts::validate_profile_name(s)?;
    Ok(s.trim().to_string())
}
