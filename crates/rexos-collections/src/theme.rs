//! Theme set discovery
//!
//! A theme set is a directory under one of the theme search paths. Inside
//! it, every sub-directory holding a `theme.xml` themes the system (or
//! collection) of the same name.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const THEME_FILE: &str = "theme.xml";

/// One installed theme set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    pub name: String,
    pub path: PathBuf,
}

impl ThemeSet {
    /// Folder names this set provides a theme for, sorted
    pub fn system_folders(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.path) else {
            tracing::debug!("Cannot read theme set directory {:?}", self.path);
            return Vec::new();
        };

        let mut folders: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().join(THEME_FILE).is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        folders.sort();
        folders
    }
}

/// Theme sets found across the search paths
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    sets: BTreeMap<String, ThemeSet>,
}

impl ThemeCatalog {
    /// Scan `search_paths`; a set in a later path replaces one of the same name
    pub fn discover<P: AsRef<Path>>(search_paths: &[P]) -> Self {
        let mut sets = BTreeMap::new();

        for search_path in search_paths {
            let Ok(entries) = fs::read_dir(search_path.as_ref()) else {
                continue;
            };

            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_dir() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().to_string();
                sets.insert(name.clone(), ThemeSet { name, path });
            }
        }

        Self { sets }
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&ThemeSet> {
        self.sets.get(name)
    }

    /// The set called `name`, or the first available one when it is missing
    pub fn select(&self, name: &str) -> Option<&ThemeSet> {
        self.sets
            .get(name)
            .or_else(|| self.sets.values().next())
    }
}
