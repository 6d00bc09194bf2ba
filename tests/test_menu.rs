//! Tests for the import menu state machine and scripted sessions

mod common;

use std::fs;
use std::path::PathBuf;

use common::{Answer, RecordingTransfer, ScriptedPrompter};
use dropimport::cli::{ImportSession, MenuChoice, MenuEvent, MenuState, Notice};
use dropimport::config::ConfigManager;
use dropimport::import::{FailurePolicy, ImportOptions, Importer, SelfImportGuard};
use tempfile::TempDir;

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn test_idle_transitions() {
    assert_eq!(
        MenuState::Idle.transition(MenuEvent::Chose(MenuChoice::ImportConfig)),
        MenuState::ConfigImportSelected
    );
    assert_eq!(
        MenuState::Idle.transition(MenuEvent::Chose(MenuChoice::ImportHistory)),
        MenuState::HistoryImportSelected
    );
    assert_eq!(
        MenuState::Idle.transition(MenuEvent::Chose(MenuChoice::Done)),
        MenuState::Done
    );
}

#[test]
fn test_branches_return_to_idle() {
    assert_eq!(
        MenuState::ConfigImportSelected.transition(MenuEvent::Finished),
        MenuState::Idle
    );
    assert_eq!(
        MenuState::HistoryImportSelected.transition(MenuEvent::Finished),
        MenuState::Idle
    );
}

#[test]
fn test_done_is_terminal() {
    assert!(MenuState::Done.is_terminal());
    assert!(!MenuState::Idle.is_terminal());
    for choice in MenuChoice::ALL {
        assert_eq!(
            MenuState::Done.transition(MenuEvent::Chose(choice)),
            MenuState::Done
        );
    }
    assert_eq!(MenuState::Done.transition(MenuEvent::Finished), MenuState::Done);
}

#[test]
fn test_choices_ignored_while_importing() {
    assert_eq!(
        MenuState::ConfigImportSelected.transition(MenuEvent::Chose(MenuChoice::Done)),
        MenuState::ConfigImportSelected
    );
    assert_eq!(MenuState::Idle.transition(MenuEvent::Finished), MenuState::Idle);
}

// ============================================================================
// Sessions
// ============================================================================

struct Fixture {
    temp_dir: TempDir,
    profiles: ConfigManager,
    transfer: RecordingTransfer,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let profiles = ConfigManager::new(temp_dir.path().join("AppData/Configs"));
        fs::create_dir_all(profiles.profile_dir("default")).unwrap();
        Self {
            temp_dir,
            profiles,
            transfer: RecordingTransfer::new(),
        }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.temp_dir.path().join(rel)
    }

    fn touch(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"x").unwrap();
        path
    }

    fn store(&self) -> PathBuf {
        self.path("AppData/Cache/cyberdrop.sqlite")
    }

    fn run(
        &self,
        answers: Vec<Answer>,
        options: ImportOptions,
    ) -> (anyhow::Result<()>, ScriptedPrompter) {
        let importer = Importer::new(&self.transfer, &self.profiles, &self.store(), options);
        let mut session = ImportSession::new(
            ScriptedPrompter::new(answers),
            importer,
            self.temp_dir.path().to_path_buf(),
        );
        let result = session.run();
        (result, session.into_prompter())
    }
}

#[test]
fn test_done_ends_session() {
    let fixture = Fixture::new();
    let (result, prompter) = fixture.run(
        vec![Answer::Action(MenuChoice::Done)],
        ImportOptions::default(),
    );

    result.unwrap();
    assert!(prompter.notices.is_empty());
    assert!(prompter.answers.is_empty());
}

#[test]
fn test_conflicting_name_returns_to_menu() {
    let fixture = Fixture::new();
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportConfig),
            Answer::Name("default".to_string()),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions::default(),
    );

    result.unwrap();
    assert_eq!(
        prompter.notices,
        vec![Notice::Conflict {
            name: "default".to_string()
        }]
    );
    assert_eq!(prompter.acknowledgements, 1);
    assert!(
        fixture.transfer.config_calls.borrow().is_empty(),
        "No transfer may run for a conflicting name"
    );
    assert_eq!(fixture.profiles.profiles(), vec!["default".to_string()]);
}

#[test]
fn test_config_import_success() {
    let fixture = Fixture::new();
    let source = fixture.touch("legacy/config.yaml");
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportConfig),
            Answer::Name("old_setup".to_string()),
            Answer::Path(Some(source.clone())),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions::default(),
    );

    result.unwrap();
    assert_eq!(
        prompter.notices,
        vec![Notice::ConfigImported {
            profile: "old_setup".to_string()
        }]
    );
    assert_eq!(
        *fixture.transfer.config_calls.borrow(),
        vec![(source, "old_setup".to_string())]
    );
}

#[test]
fn test_config_import_backed_out() {
    let fixture = Fixture::new();
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportConfig),
            Answer::Name("later".to_string()),
            Answer::Path(None),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions::default(),
    );

    result.unwrap();
    assert!(prompter.notices.is_empty());
    assert!(fixture.transfer.config_calls.borrow().is_empty());
}

#[test]
fn test_config_failure_reported() {
    let fixture = Fixture::new();
    let source = fixture.touch("legacy/broken.yaml");
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportConfig),
            Answer::Name("x".to_string()),
            Answer::Path(Some(source)),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions::default(),
    );

    result.unwrap();
    match prompter.notices.as_slice() {
        [Notice::Failed { name, reason }] => {
            assert_eq!(name, "broken.yaml");
            assert!(reason.contains("not a YAML mapping"));
        }
        other => panic!("unexpected notices: {:?}", other),
    }
}

#[test]
fn test_config_failure_propagated_when_strict() {
    let fixture = Fixture::new();
    let source = fixture.touch("legacy/broken.yaml");
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportConfig),
            Answer::Name("x".to_string()),
            Answer::Path(Some(source)),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions {
            failure_policy: FailurePolicy::Propagate,
            self_import_guard: SelfImportGuard::BatchOnly,
        },
    );

    assert!(result.is_err());
    assert_eq!(prompter.answers.len(), 1, "Session should stop before Done");
}

#[test]
fn test_history_directory_import_reports_batch() {
    let fixture = Fixture::new();
    fixture.touch("legacy/a.sqlite");
    fixture.touch("legacy/nested/corrupt.sqlite");
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportHistory),
            Answer::Path(Some(fixture.path("legacy"))),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions::default(),
    );

    result.unwrap();
    match prompter.notices.as_slice() {
        [Notice::Batch(report)] => {
            assert_eq!(report.attempted(), 2);
            assert_eq!(report.succeeded(), 1);
            assert_eq!(report.failed(), 1);
        }
        other => panic!("unexpected notices: {:?}", other),
    }
}

#[test]
fn test_history_single_file_import() {
    let fixture = Fixture::new();
    let source = fixture.touch("legacy/download_history.sqlite");
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportHistory),
            Answer::Path(Some(source.clone())),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions::default(),
    );

    result.unwrap();
    assert_eq!(
        prompter.notices,
        vec![Notice::HistoryImported { source, records: 1 }]
    );
}

#[test]
fn test_history_store_skipped_when_guarded() {
    let fixture = Fixture::new();
    let store = fixture.store();
    fixture.touch("AppData/Cache/cyberdrop.sqlite");
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportHistory),
            Answer::Path(Some(store.clone())),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions {
            failure_policy: FailurePolicy::Isolate,
            self_import_guard: SelfImportGuard::Always,
        },
    );

    result.unwrap();
    assert_eq!(prompter.notices, vec![Notice::SkippedSelf { path: store }]);
    assert!(fixture.transfer.history_calls.borrow().is_empty());
}

#[test]
fn test_several_imports_in_one_session() {
    let fixture = Fixture::new();
    let config = fixture.touch("legacy/config.yaml");
    let history = fixture.touch("legacy/history.sqlite");
    let (result, prompter) = fixture.run(
        vec![
            Answer::Action(MenuChoice::ImportConfig),
            Answer::Name("default".to_string()),
            Answer::Action(MenuChoice::ImportConfig),
            Answer::Name("second".to_string()),
            Answer::Path(Some(config)),
            Answer::Action(MenuChoice::ImportHistory),
            Answer::Path(Some(history)),
            Answer::Action(MenuChoice::Done),
        ],
        ImportOptions::default(),
    );

    result.unwrap();
    assert_eq!(prompter.notices.len(), 3);
    assert!(prompter.answers.is_empty(), "Every answer should be consumed");
    assert_eq!(fixture.transfer.config_calls.borrow().len(), 1);
    assert_eq!(fixture.transfer.history_calls.borrow().len(), 1);
}

#[test]
fn test_prompt_failure_ends_session() {
    let fixture = Fixture::new();
    let (result, _) = fixture.run(
        vec![Answer::Action(MenuChoice::ImportHistory)],
        ImportOptions::default(),
    );

    let err = result.unwrap_err();
    assert!(err.to_string().contains("ran out of answers"));
}

