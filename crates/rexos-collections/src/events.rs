//! Notifications and view updates emitted by collections
//!
//! The registry does no rendering itself. Everything the UI needs to react
//! to goes through a [`CollectionEvents`] sink owned by the registry.

use std::time::Duration;

/// How long edit-mode banners stay up
pub const EDIT_POPUP_DURATION: Duration = Duration::from_millis(10_000);

/// How long toggle and exit notices stay up
pub const NOTICE_POPUP_DURATION: Duration = Duration::from_millis(4_000);

/// What happened to an entry shown in a gamelist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// Entry metadata changed and should be redrawn
    MetadataChanged,
    /// Entry was removed from the list
    Removed,
    /// The list was re-sorted
    Sorted,
}

/// Receiver for notifications and view updates
pub trait CollectionEvents {
    /// Show a transient message to the user
    fn info_popup(&mut self, message: &str, duration: Duration);

    /// An entry in the gamelist of `system` changed
    fn file_changed(&mut self, system: &str, path: &str, change: FileChange) {
        let _ = (system, path, change);
    }
}

/// Events sink that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEvents;

impl CollectionEvents for LogEvents {
    fn info_popup(&mut self, message: &str, duration: Duration) {
        tracing::info!("{} ({} ms)", message, duration.as_millis());
    }

    fn file_changed(&mut self, system: &str, path: &str, change: FileChange) {
        tracing::trace!("{}: {:?} {}", system, change, path);
    }
}

/// Events sink that records everything, for inspection
#[derive(Debug, Default, Clone)]
pub struct RecordedEvents {
    pub popups: Vec<String>,
    pub changes: Vec<(String, String, FileChange)>,
}

impl RecordedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_popup(&self) -> Option<&str> {
        self.popups.last().map(String::as_str)
    }

    /// Recorded changes of one kind for `system`
    pub fn changes_for(&self, system: &str, change: FileChange) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|(sys, _, kind)| sys == system && *kind == change)
            .map(|(_, path, _)| path.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.popups.clear();
        self.changes.clear();
    }
}

impl CollectionEvents for RecordedEvents {
    fn info_popup(&mut self, message: &str, _duration: Duration) {
        self.popups.push(message.to_string());
    }

    fn file_changed(&mut self, system: &str, path: &str, change: FileChange) {
        self.changes
            .push((system.to_string(), path.to_string(), change));
    }
}
