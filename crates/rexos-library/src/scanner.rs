//! ROM scanning functionality
//!
//! Builds a system's game tree from its ROM directory. Subdirectories become
//! folder entries so the tree mirrors what the user sees on disk.

use crate::file_data::FileData;
use crate::system::{SystemData, SystemList};
use crate::LibraryError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// ROM scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions to scan
    pub extensions: HashSet<String>,

    /// Directories to skip
    pub skip_dirs: HashSet<String>,

    /// Skip hidden files/directories
    pub skip_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let extensions = [
            "nes", "fds", "smc", "sfc", "n64", "z64", "v64", "gb", "gbc", "gba", "nds", "sms",
            "gg", "md", "gen", "bin", "32x", "pce", "sgx", "iso", "cso", "chd", "pbp", "cue",
            "a26", "a78", "lnx", "ngp", "ngc", "ws", "wsc", "zip", "7z",
        ]
        .iter()
        .map(|ext| ext.to_string())
        .collect();

        let skip_dirs = ["bios", "saves", "states", "screenshots", ".rexos"]
            .iter()
            .map(|dir| dir.to_string())
            .collect();

        Self {
            extensions,
            skip_dirs,
            skip_hidden: true,
        }
    }
}

/// ROM scanner
pub struct RomScanner {
    config: ScanConfig,
}

impl Default for RomScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RomScanner {
    /// Create a new scanner with default config
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan one system directory into a game tree
    pub fn scan_system(&self, path: &Path, name: &str) -> Result<SystemData, LibraryError> {
        if !path.is_dir() {
            return Err(LibraryError::PathNotFound(path.to_path_buf()));
        }

        let mut system = SystemData::new(name, name, name, path);
        self.scan_dir(path, system.root_mut())?;
        tracing::debug!(
            "Scanned system {}: {} games",
            name,
            system.games().len()
        );
        Ok(system)
    }

    /// Recursively scan a directory into `parent`
    fn scan_dir(&self, path: &Path, parent: &mut FileData) -> Result<(), LibraryError> {
        let mut entries: Vec<_> = fs::read_dir(path)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // Skip hidden files/directories
            if self.config.skip_hidden && name.starts_with('.') {
                continue;
            }

            if entry_path.is_dir() {
                if self.config.skip_dirs.contains(&name.to_lowercase()) {
                    continue;
                }

                let mut folder = FileData::folder(entry_path.to_string_lossy().to_string());
                self.scan_dir(&entry_path, &mut folder)?;
                // Folders without any games are not worth showing
                if !folder.children().is_empty() {
                    parent.add_child(folder);
                }
            } else if entry_path.is_file()
                && let Some(ext) = entry_path.extension().and_then(|e| e.to_str())
                && self.config.extensions.contains(&ext.to_lowercase())
                && let Some(game) = Self::create_game(&entry_path)
            {
                parent.add_child(game);
            }
        }

        Ok(())
    }

    /// Create a game entry from a ROM file
    fn create_game(path: &Path) -> Option<FileData> {
        let stem = path.file_stem()?.to_string_lossy().to_string();
        let game = FileData::game(path.to_string_lossy().to_string());
        Some(game.with_name(&Self::clean_game_name(&stem)))
    }

    /// Clean up a game name (remove region codes, etc.)
    fn clean_game_name(name: &str) -> String {
        let mut clean = name.to_string();

        let patterns = [
            // Regions
            "(USA)", "(Europe)", "(Japan)", "(World)", "(U)", "(E)", "(J)", "(W)", "(En)", "(Fr)",
            "(De)", "(Es)", "(It)", // Versions
            "(Rev 1)", "(Rev 2)", "(Rev A)", "(Rev B)", "(v1.0)", "(v1.1)", "(v1.2)",
            // Tags
            "(Unl)", "(Proto)", "(Beta)", "(Demo)", "(Sample)",
        ];

        for pattern in &patterns {
            clean = clean.replace(pattern, "");
        }

        // Remove anything in square brackets
        while let (Some(start), Some(end)) = (clean.find('['), clean.find(']')) {
            if end <= start {
                break;
            }
            clean.replace_range(start..=end, "");
        }

        clean.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Scan every system directory under a roms directory
    pub fn scan_all(&self, roms_dir: &Path) -> Result<SystemList, LibraryError> {
        let mut systems = SystemList::new();

        if !roms_dir.exists() {
            return Ok(systems);
        }

        let mut entries: Vec<_> = fs::read_dir(roms_dir)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if self.config.skip_dirs.contains(&name.to_lowercase())
                || (self.config.skip_hidden && name.starts_with('.'))
            {
                continue;
            }

            let system = self.scan_system(&path, &name)?;
            if !system.games().is_empty() {
                systems.add(system);
            }
        }

        Ok(systems)
    }
}
