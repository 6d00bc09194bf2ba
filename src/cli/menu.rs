//! Import menu state machine
//!
//! The session is an explicit loop over [`MenuState`]. Each import branch runs
//! to completion and hands control back to `Idle`; `Done` ends the session.

use std::path::PathBuf;

use anyhow::Result;

use super::prompts::{MenuChoice, Notice, Prompter};
use crate::import::{
    display_name, HistoryImport, ImportError, ImportOutcome, Importer, PathKind,
};
use crate::transfer::LegacyTransfer;
use crate::utils::{create_spinner, finish_with_success, finish_with_warning};

/// Where the import menu is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Idle,
    ConfigImportSelected,
    HistoryImportSelected,
    Done,
}

/// Input to the menu state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The user picked a menu entry
    Chose(MenuChoice),
    /// The running import branch returned
    Finished,
}

impl MenuState {
    /// Next state. Pairs without a transition leave the state unchanged.
    pub fn transition(self, event: MenuEvent) -> MenuState {
        match (self, event) {
            (MenuState::Idle, MenuEvent::Chose(MenuChoice::ImportConfig)) => {
                MenuState::ConfigImportSelected
            }
            (MenuState::Idle, MenuEvent::Chose(MenuChoice::ImportHistory)) => {
                MenuState::HistoryImportSelected
            }
            (MenuState::Idle, MenuEvent::Chose(MenuChoice::Done)) => MenuState::Done,
            (
                MenuState::ConfigImportSelected | MenuState::HistoryImportSelected,
                MenuEvent::Finished,
            ) => MenuState::Idle,
            (state, _) => state,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == MenuState::Done
    }
}

/// One interactive import session
pub struct ImportSession<'a, P: Prompter, T: LegacyTransfer> {
    prompter: P,
    importer: Importer<'a, T>,
    browse_root: PathBuf,
}

impl<'a, P: Prompter, T: LegacyTransfer> ImportSession<'a, P, T> {
    pub fn new(prompter: P, importer: Importer<'a, T>, browse_root: PathBuf) -> Self {
        Self {
            prompter,
            importer,
            browse_root,
        }
    }

    /// Run the menu until the user picks `Done`.
    ///
    /// Errors are prompt failures, or transfer failures when the importer
    /// propagates them.
    pub fn run(&mut self) -> Result<()> {
        let mut state = MenuState::Idle;

        while !state.is_terminal() {
            state = match state {
                MenuState::Idle => {
                    let choice = self.prompter.select_action()?;
                    state.transition(MenuEvent::Chose(choice))
                }
                MenuState::ConfigImportSelected => {
                    self.run_config_import()?;
                    state.transition(MenuEvent::Finished)
                }
                MenuState::HistoryImportSelected => {
                    self.run_history_import()?;
                    state.transition(MenuEvent::Finished)
                }
                MenuState::Done => state,
            };
        }

        Ok(())
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    fn run_config_import(&mut self) -> Result<()> {
        let name = self.prompter.profile_name()?;

        if let Err(ImportError::Conflict { name }) = self.importer.check_profile_name(&name) {
            self.prompter.notify(&Notice::Conflict { name });
            self.prompter
                .acknowledge("Press enter to return to the import menu.")?;
            return Ok(());
        }

        let Some(source) = self.prompter.config_source(&self.browse_root)? else {
            return Ok(());
        };

        match self.importer.import_config(&source, &name) {
            Ok(ImportOutcome::Success { .. }) => {
                self.prompter.notify(&Notice::ConfigImported { profile: name });
            }
            Ok(ImportOutcome::Failure { source, reason }) => {
                self.prompter.notify(&Notice::Failed {
                    name: display_name(&source),
                    reason,
                });
            }
            Err(ImportError::Conflict { name }) => {
                self.prompter.notify(&Notice::Conflict { name });
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn run_history_import(&mut self) -> Result<()> {
        let Some(target) = self.prompter.history_target(&self.browse_root)? else {
            return Ok(());
        };

        let imported = match crate::import::classify(&target) {
            PathKind::SingleFile => self.importer.import_history_file(&target)?,
            PathKind::Directory => {
                let spinner = create_spinner("Searching for history databases...");
                let report = self.importer.import_history_dir_with(&target, |candidate| {
                    spinner.set_message(format!("Importing {}", display_name(candidate)));
                });
                if report.failed() == 0 {
                    finish_with_success(
                        &spinner,
                        &format!("Imported {} database(s)", report.succeeded()),
                    );
                } else {
                    finish_with_warning(
                        &spinner,
                        &format!(
                            "Imported {} database(s), {} failed",
                            report.succeeded(),
                            report.failed()
                        ),
                    );
                }
                HistoryImport::Batch(report)
            }
        };

        let notice = match imported {
            HistoryImport::File(ImportOutcome::Success { source, records }) => {
                Notice::HistoryImported { source, records }
            }
            HistoryImport::File(ImportOutcome::Failure { source, reason }) => Notice::Failed {
                name: display_name(&source),
                reason,
            },
            HistoryImport::SkippedSelf(path) => Notice::SkippedSelf { path },
            HistoryImport::Batch(report) => Notice::Batch(report),
        };
        self.prompter.notify(&notice);
        Ok(())
    }
}
