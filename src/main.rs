//! Dropimport: Legacy Import CLI Tool
//!
//! Imports v4 configs and download history databases, either through the
//! interactive import menu or with the `config` / `history` subcommands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use dropimport::cli::{Cli, Commands, DialoguerPrompter, ImportSession};
use dropimport::config::{AppPaths, ConfigManager};
use dropimport::import::{HistoryImport, ImportOutcome, Importer};
use dropimport::report::display_batch_summary;
use dropimport::transfer::V4Transfer;
use dropimport::utils::{
    init_logging, print_banner, print_completion, print_error, print_info, print_paths,
    print_section_header, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve every path once; nothing below recomputes them
    let paths = AppPaths::from_cli(&cli);
    let _log_guard = init_logging(&paths.log_file, cli.verbose)?;
    info!(
        appdata = %paths.appdata.display(),
        history_db = %paths.history_db.display(),
        "Starting dropimport"
    );

    let profiles = ConfigManager::new(&paths.config_dir);
    let transfer = V4Transfer::new(&paths.config_dir);
    let importer = Importer::new(&transfer, &profiles, &paths.history_db, cli.import_options());

    match &cli.command {
        Some(Commands::Config { source, name }) => run_config(&importer, source, name),
        Some(Commands::History { path, json }) => run_history(&importer, path, json.as_deref()),
        None => {
            print_banner(env!("CARGO_PKG_VERSION"));
            print_paths(&paths.config_dir, &paths.history_db, &paths.log_file);

            let mut session =
                ImportSession::new(DialoguerPrompter::new(), importer, paths.browse_root.clone());
            session.run()?;

            print_completion();
            Ok(())
        }
    }
}

fn run_config(importer: &Importer<'_, V4Transfer>, source: &Path, name: &str) -> Result<()> {
    print_section_header("Import Config");
    print_info(&format!("Source:  {}", source.display()));
    print_info(&format!("Profile: {}", name));

    if !source.is_file() {
        anyhow::bail!("Config file not found: {}", source.display());
    }

    match importer.import_config(source, name)? {
        ImportOutcome::Success { .. } => {
            print_success(&format!("Imported config as '{}'", name));
            Ok(())
        }
        ImportOutcome::Failure { reason, .. } => {
            print_error(&reason);
            anyhow::bail!("Config import failed")
        }
    }
}

fn run_history(
    importer: &Importer<'_, V4Transfer>,
    path: &Path,
    json: Option<&Path>,
) -> Result<()> {
    print_section_header("Import Download History");
    print_info(&format!("Source:  {}", path.display()));
    print_info(&format!("Store:   {}", importer.history_db().display()));

    if !path.exists() {
        anyhow::bail!("Path not found: {}", path.display());
    }

    match importer.import_history(path)? {
        HistoryImport::File(ImportOutcome::Success { records, .. }) => {
            print_success(&format!("Imported {} record(s)", records));
        }
        HistoryImport::File(ImportOutcome::Failure { reason, .. }) => {
            print_error(&reason);
            anyhow::bail!("History import failed");
        }
        HistoryImport::SkippedSelf(_) => {
            print_info("Source is the current history database, nothing to import");
        }
        HistoryImport::Batch(report) => {
            display_batch_summary(&report);
            if let Some(json_path) = json {
                let text = serde_json::to_string_pretty(&report)?;
                fs::write(json_path, text).with_context(|| {
                    format!("Failed to write JSON report: {}", json_path.display())
                })?;
                print_success(&format!("Report written to {}", json_path.display()));
            }
        }
    }

    Ok(())
}
