//! Settings infrastructure for sqlsp.
//!
//! This module provides support for loading and parsing settings.toml files
//! to configure the statement-leading keyword set used by the logical
//! scanner.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::statement::KeywordSet;

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Statement detection configuration.
    pub statement: Option<StatementSettings>,
}

/// Statement detection settings.
#[derive(Debug, Default, Deserialize)]
pub struct StatementSettings {
    /// Leading keywords treated as statement starts by the logical scanner.
    /// Replaces the default list (select, insert, update, delete, create,
    /// drop, alter, with) when present, so dialect-specific leaders like
    /// EXPLAIN or PRAGMA can be added.
    pub keywords: Option<Vec<String>>,
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Warning: failed to parse settings.toml: {}", e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover settings.toml by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found settings.toml.
/// If not found, returns `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    // Phase 1: Walk up from start_dir
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join("settings.toml");
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    // Phase 2: Check immediate child directories
    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join("settings.toml");
                if candidate.is_file() {
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}

/// Build the statement keyword matcher from settings.
///
/// A configured-but-empty keyword list falls back to the defaults with a
/// warning rather than disabling logical detection outright.
pub fn keyword_set_from_settings(settings: &Settings) -> KeywordSet {
    let Some(keywords) = settings
        .statement
        .as_ref()
        .and_then(|s| s.keywords.as_ref())
    else {
        return KeywordSet::default();
    };

    let cleaned: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();

    if cleaned.is_empty() {
        eprintln!("Warning: [statement] keywords is empty, using the default keyword list");
        return KeywordSet::default();
    }

    KeywordSet::new(cleaned)
}
