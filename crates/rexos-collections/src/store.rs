//! Custom collection files
//!
//! Each custom collection lives in `<collections dir>/custom-<name>.cfg`,
//! one full game path per line.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "custom-";
const FILE_SUFFIX: &str = ".cfg";

/// Reads and writes custom collection files in one directory
#[derive(Debug, Clone)]
pub struct CollectionStore {
    dir: PathBuf,
}

impl CollectionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the collections directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            tracing::info!("Creating collections directory {:?}", self.dir);
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    pub fn config_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{}{}", FILE_PREFIX, name, FILE_SUFFIX))
    }

    /// Names of all custom collections on disk, sorted
    pub fn discover(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        if !self.dir.is_dir() {
            return Ok(names);
        }

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            match collection_name(&file_name) {
                Some(name) => names.push(name.to_string()),
                None => tracing::info!(
                    "Found non-collection config file in collections folder: {}",
                    file_name
                ),
            }
        }

        names.sort();
        Ok(names)
    }

    /// Member paths of a collection, `None` when its file does not exist
    pub fn load(&self, name: &str) -> Result<Option<Vec<String>>> {
        let path = self.config_path(name);
        if !path.exists() {
            tracing::info!("Couldn't find custom collection config file at {:?}", path);
            return Ok(None);
        }

        tracing::info!("Loading custom collection config file at {:?}", path);
        let content = fs::read_to_string(&path)?;

        Ok(Some(
            content
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        ))
    }

    /// Overwrite a collection file with `paths`, sorted
    pub fn save<'a>(&self, name: &str, paths: impl IntoIterator<Item = &'a str>) -> Result<()> {
        self.ensure_dir()?;

        let mut paths: Vec<&str> = paths.into_iter().collect();
        paths.sort_unstable();

        let mut content = String::new();
        for path in paths {
            content.push_str(path);
            content.push('\n');
        }

        let path = self.config_path(name);
        fs::write(&path, content)?;
        tracing::debug!("Saved custom collection {} to {:?}", name, path);
        Ok(())
    }
}

/// Collection name encoded in a `custom-<name>.cfg` file name
fn collection_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_SUFFIX)
        .filter(|name| !name.is_empty())
}
