//! File tree entries (games, folders, placeholders)

use crate::metadata::{MetaDataList, keys};
use crate::sort::SortType;
use std::path::Path;

/// Kind of entry in a system tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Game,
    Folder,
    Placeholder,
}

/// A file or folder inside a system's game tree
#[derive(Debug, Clone)]
pub struct FileData {
    path: String,
    file_type: FileType,
    pub metadata: MetaDataList,
    children: Vec<FileData>,
}

impl FileData {
    /// Create an entry named after its file stem
    pub fn new(file_type: FileType, path: impl Into<String>) -> Self {
        let path = path.into();
        let mut metadata = MetaDataList::new();
        let stem = Path::new(&path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| path.clone());
        metadata.set(keys::NAME, stem);

        Self {
            path,
            file_type,
            metadata,
            children: Vec::new(),
        }
    }

    pub fn game(path: impl Into<String>) -> Self {
        Self::new(FileType::Game, path)
    }

    pub fn folder(path: impl Into<String>) -> Self {
        Self::new(FileType::Folder, path)
    }

    /// Builder-style display name override
    pub fn with_name(mut self, name: &str) -> Self {
        self.metadata.set(keys::NAME, name);
        self
    }

    /// Full path, unique across every system
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        self.metadata.get(keys::NAME)
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_game(&self) -> bool {
        self.file_type == FileType::Game
    }

    pub fn children(&self) -> &[FileData] {
        &self.children
    }

    pub fn add_child(&mut self, child: FileData) {
        self.children.push(child);
    }

    /// All descendants of the given type, depth first
    pub fn files_recursive(&self, file_type: FileType) -> Vec<&FileData> {
        let mut out = Vec::new();
        self.collect_recursive(file_type, &mut out);
        out
    }

    fn collect_recursive<'a>(&'a self, file_type: FileType, out: &mut Vec<&'a FileData>) {
        for child in &self.children {
            if child.file_type == file_type {
                out.push(child);
            }
            if !child.children.is_empty() {
                child.collect_recursive(file_type, out);
            }
        }
    }

    /// Find a descendant by full path
    pub fn find(&self, path: &str) -> Option<&FileData> {
        for child in &self.children {
            if child.path == path {
                return Some(child);
            }
            if let Some(found) = child.find(path) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut FileData> {
        for child in &mut self.children {
            if child.path == path {
                return Some(child);
            }
            if let Some(found) = child.find_mut(path) {
                return Some(found);
            }
        }
        None
    }

    /// Sort children (recursively) by the given order
    pub fn sort(&mut self, sort: SortType) {
        self.children
            .sort_by(|a, b| sort.compare(&a.metadata, &b.metadata));
        for child in &mut self.children {
            child.sort(sort);
        }
    }
}
