//! Game collections for RexOS
//!
//! Curated game lists shown next to the regular systems:
//! - Automatic collections (all games, last played, favorites, hidden,
//!   kid-friendly) derived from game metadata
//! - Custom collections kept by the user in `custom-<name>.cfg` files
//! - The bundle grouping custom collections without a theme of their own
//!
//! Collections only reference games; the game library stays the owner.
//! Based on EmulationStation collection patterns.

mod bundle;
mod collection;
mod declaration;
mod entry;
mod events;
mod names;
mod ordering;
mod registry;
mod store;
mod theme;

pub use bundle::{Bundle, wants_own_slot};
pub use collection::{AutoCollection, Collection, CollectionState, CustomCollection};
pub use declaration::{
    ALL_GAMES_NAME, CUSTOM_COLLECTIONS_NAME, CollectionDecl, CollectionKind,
    DEFAULT_EDIT_COLLECTION, DeclarationTable,
};
pub use entry::{CollectionEntry, CollectionSystem};
pub use events::{
    CollectionEvents, EDIT_POPUP_DURATION, FileChange, LogEvents, NOTICE_POPUP_DURATION,
    RecordedEvents,
};
pub use names::{
    DEFAULT_COLLECTION_NAME, remove_parenthesis, sanitize_collection_name,
    unique_collection_name,
};
pub use ordering::{
    DisplayEntry, MIXED_SET_APART, PINNED_SYSTEM, SystemOrdering, mixed_system_sort,
    split_system_sort,
};
pub use registry::CollectionRegistry;
pub use store::CollectionStore;
pub use theme::{ThemeCatalog, ThemeSet};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Collection not found: {0}")]
    UnknownCollection(String),

    #[error("Collection is disabled: {0}")]
    Disabled(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CollectionError>;
