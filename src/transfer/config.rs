//! v4 config transfer
//!
//! A v4 config is a single YAML document, optionally nested under a
//! top-level `Configuration` key. The current format keeps one directory per
//! profile holding `settings.yaml` and, when credentials were present,
//! `authentication.yaml`.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::TransferError;

pub const SETTINGS_FILE: &str = "settings.yaml";
pub const AUTHENTICATION_FILE: &str = "authentication.yaml";

/// v4 section name → current section name.
const SECTION_RENAMES: [(&str, &str); 6] = [
    ("Files", "Files"),
    ("Ignore", "Ignore_Options"),
    ("Runtime", "Runtime_Options"),
    ("Ratelimiting", "Rate_Limiting_Options"),
    ("Sorting", "Sorting"),
    ("JDownloader", "JDownloader_Options"),
];

const AUTHENTICATION_SECTION: &str = "Authentication";

/// v4 sections with no counterpart in the current format.
const DROPPED_SECTIONS: [&str; 2] = ["Apply_Config", "Progress_Options"];

/// Convert the v4 config at `source` into a new profile at `profile_dir`.
///
/// Refuses to touch an existing profile directory. A partially written
/// profile is removed before the error is returned.
pub fn transfer_v4_config(source: &Path, profile_dir: &Path) -> Result<(), TransferError> {
    let raw = fs::read_to_string(source).map_err(|e| TransferError::io(source, e))?;
    let document: Value = serde_yaml::from_str(&raw).map_err(|e| TransferError::Yaml {
        path: source.to_path_buf(),
        source: e,
    })?;

    let converted = convert_v4_document(source, document)?;

    if profile_dir.exists() {
        return Err(TransferError::Destination {
            path: profile_dir.to_path_buf(),
            reason: "profile directory already exists".to_string(),
        });
    }
    fs::create_dir_all(profile_dir).map_err(|e| TransferError::io(profile_dir, e))?;

    if let Err(e) = write_profile(profile_dir, &converted) {
        let _ = fs::remove_dir_all(profile_dir);
        return Err(e);
    }
    Ok(())
}

/// A v4 config split into the files of a current profile.
#[derive(Debug, Default, PartialEq)]
pub struct ConvertedConfig {
    pub settings: Mapping,
    pub authentication: Option<Mapping>,
}

/// Map a parsed v4 document onto the current section layout.
pub fn convert_v4_document(source: &Path, document: Value) -> Result<ConvertedConfig, TransferError> {
    let mut root = match document {
        Value::Mapping(map) => map,
        _ => return Err(TransferError::schema(source, "config is not a YAML mapping")),
    };

    if let Some(Value::Mapping(inner)) = root.remove("Configuration") {
        root = inner;
    }

    let mut converted = ConvertedConfig::default();
    let mut recognised = 0;

    for (key, value) in root {
        let Some(name) = key.as_str() else {
            continue;
        };

        if name == AUTHENTICATION_SECTION {
            converted.authentication = Some(section_mapping(source, name, value)?);
            recognised += 1;
        } else if let Some((_, renamed)) = SECTION_RENAMES.iter().find(|(old, _)| *old == name) {
            let mut section = section_mapping(source, name, value)?;
            if name == "Files" {
                convert_files_section(&mut section);
            }
            converted
                .settings
                .insert(Value::String(renamed.to_string()), Value::Mapping(section));
            recognised += 1;
        } else if DROPPED_SECTIONS.contains(&name) {
            debug!(section = name, "Dropping v4 section with no current counterpart");
        } else {
            debug!(section = name, "Ignoring unknown v4 section");
        }
    }

    if recognised == 0 {
        return Err(TransferError::schema(source, "no recognised v4 config sections"));
    }
    Ok(converted)
}

/// `output_folder` became `download_folder`; the per-config database is gone.
fn convert_files_section(section: &mut Mapping) {
    if let Some(folder) = section.remove("output_folder") {
        section.insert(Value::String("download_folder".to_string()), folder);
    }
    section.remove("db_file");
}

fn section_mapping(source: &Path, name: &str, value: Value) -> Result<Mapping, TransferError> {
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(TransferError::schema(
            source,
            format!("section '{}' is not a mapping", name),
        )),
    }
}

fn write_profile(profile_dir: &Path, converted: &ConvertedConfig) -> Result<(), TransferError> {
    write_yaml(&profile_dir.join(SETTINGS_FILE), &converted.settings)?;
    if let Some(auth) = &converted.authentication {
        write_yaml(&profile_dir.join(AUTHENTICATION_FILE), auth)?;
    }
    Ok(())
}

fn write_yaml(path: &Path, mapping: &Mapping) -> Result<(), TransferError> {
    let text = serde_yaml::to_string(mapping).map_err(|e| TransferError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, text).map_err(|e| TransferError::io(path, e))
}
