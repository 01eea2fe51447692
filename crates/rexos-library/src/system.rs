//! Game systems (libraries) and the list of configured systems

use crate::file_data::{FileData, FileType};
use std::path::{Path, PathBuf};

/// Reference to a game owned by a system, keyed by its full path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameRef {
    pub system: String,
    pub path: String,
}

impl GameRef {
    pub fn new(system: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            path: path.into(),
        }
    }
}

/// One game library (an emulated platform or other source of games)
#[derive(Debug, Clone)]
pub struct SystemData {
    name: String,
    full_name: String,
    theme_folder: String,
    start_path: PathBuf,
    game_system: bool,
    root: FileData,
}

impl SystemData {
    pub fn new(
        name: &str,
        full_name: &str,
        theme_folder: &str,
        start_path: impl AsRef<Path>,
    ) -> Self {
        let start_path = start_path.as_ref().to_path_buf();
        let root = FileData::folder(start_path.to_string_lossy().to_string()).with_name(name);

        Self {
            name: name.to_string(),
            full_name: full_name.to_string(),
            theme_folder: theme_folder.to_string(),
            start_path,
            game_system: true,
            root,
        }
    }

    /// Mark as a non-game system (e.g. a tools/settings menu)
    pub fn with_game_system(mut self, game_system: bool) -> Self {
        self.game_system = game_system;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn theme_folder(&self) -> &str {
        &self.theme_folder
    }

    pub fn start_path(&self) -> &Path {
        &self.start_path
    }

    /// Whether entries of this system are launchable games
    pub fn is_game_system(&self) -> bool {
        self.game_system
    }

    pub fn root(&self) -> &FileData {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut FileData {
        &mut self.root
    }

    /// Every game entry, recursively
    pub fn games(&self) -> Vec<&FileData> {
        self.root.files_recursive(FileType::Game)
    }

    pub fn find(&self, path: &str) -> Option<&FileData> {
        self.root.find(path)
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut FileData> {
        self.root.find_mut(path)
    }
}

/// All configured systems, in configuration order
#[derive(Debug, Clone, Default)]
pub struct SystemList {
    systems: Vec<SystemData>,
}

impl SystemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system, replacing one with the same name
    pub fn add(&mut self, system: SystemData) {
        if let Some(existing) = self
            .systems
            .iter_mut()
            .find(|existing| existing.name == system.name)
        {
            tracing::warn!("Replacing already loaded system {}", system.name);
            *existing = system;
        } else {
            self.systems.push(system);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemData> {
        self.systems.iter()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SystemData> {
        self.systems.iter().find(|system| system.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SystemData> {
        self.systems.iter_mut().find(|system| system.name == name)
    }

    /// Resolve a game reference to its origin entry
    pub fn game(&self, game: &GameRef) -> Option<&FileData> {
        self.get(&game.system)?.find(&game.path)
    }

    pub fn game_mut(&mut self, game: &GameRef) -> Option<&mut FileData> {
        self.get_mut(&game.system)?.find_mut(&game.path)
    }

    /// Theme folders claimed by configured systems, sorted
    pub fn theme_folders(&self) -> Vec<String> {
        let mut folders: Vec<String> = self
            .systems
            .iter()
            .map(|system| system.theme_folder.clone())
            .collect();
        folders.sort();
        folders
    }
}
