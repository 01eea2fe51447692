//! Custom collections bundle
//!
//! Custom collections without a theme folder of their own are shown as
//! sub-folders of one synthetic "collections" system instead of taking a
//! slot each in the system list.

use crate::declaration::CollectionDecl;
use crate::entry::CollectionSystem;
use rexos_library::{FilterIndex, SortType};

/// Whether an enabled collection gets its own slot in the system list
///
/// Automatic collections always do. Custom ones do when the theme has a
/// folder for them or bundling is switched off.
pub fn wants_own_slot(
    decl: &CollectionDecl,
    theme_folder_exists: bool,
    bundle_custom: bool,
) -> bool {
    !decl.is_custom || theme_folder_exists || !bundle_custom
}

/// The shared container for bundled custom collections
#[derive(Debug, Clone)]
pub struct Bundle {
    system: CollectionSystem,
    members: Vec<String>,
}

impl Bundle {
    pub fn new(decl: &CollectionDecl) -> Self {
        Self {
            system: CollectionSystem::new(decl),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.system.name()
    }

    pub fn system(&self) -> &CollectionSystem {
        &self.system
    }

    /// Names of the bundled collections, in display order
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Whether the collection named `name` is currently bundled
    pub fn holds(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Bundle a collection and merge its filter index
    pub fn attach(&mut self, collection: &CollectionSystem) {
        if self.holds(collection.name()) {
            return;
        }
        self.members.push(collection.name().to_string());
        self.system.index_mut().import(collection.index());
    }

    /// Drop every bundled collection (the collections themselves are untouched)
    pub fn detach_all(&mut self) {
        self.members.clear();
        self.system.index_mut().reset();
    }

    pub fn index(&self) -> &FilterIndex {
        self.system.index()
    }

    pub fn index_mut(&mut self) -> &mut FilterIndex {
        self.system.index_mut()
    }

    /// Order bundled collections by name
    pub fn sort(&mut self, sort: SortType) {
        self.members
            .sort_by_key(|member| member.to_lowercase());
        if !sort.is_ascending() {
            self.members.reverse();
        }
    }
}
