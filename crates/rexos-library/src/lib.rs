//! Game library management service for RexOS
//!
//! Holds the per-system game trees (files, folders and their metadata),
//! the filter index and sort orders used by gamelists, and the ROM scanner
//! that builds systems from disk. Based on EmulationStation gamelist patterns.

mod file_data;
mod gamelist;
mod index;
mod metadata;
mod scanner;
mod sort;
mod system;

pub use file_data::{FileData, FileType};
pub use gamelist::{apply_gamelist, parse_gamelist_xml};
pub use index::{FilterIndex, FilterType};
pub use metadata::{MetaDataList, keys};
pub use scanner::{RomScanner, ScanConfig};
pub use sort::SortType;
pub use system::{GameRef, SystemData, SystemList};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LibraryError::PathNotFound(PathBuf::from("/roms/snes"));
        assert!(format!("{}", err).contains("/roms/snes"));
    }
}
