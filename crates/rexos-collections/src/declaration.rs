//! Collection declarations
//!
//! The fixed templates every collection is created from. Automatic kinds
//! are declared once; custom collections clone the `collections` template.

use std::collections::BTreeMap;

/// Name of the custom collections template (and of the bundle system)
pub const CUSTOM_COLLECTIONS_NAME: &str = "collections";

/// Collection edited when no other edit session is active
pub const DEFAULT_EDIT_COLLECTION: &str = "favorite";

/// Name of the collection every custom collection resolves paths against
pub const ALL_GAMES_NAME: &str = "all";

/// Kind of collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    AllGames,
    LastPlayed,
    Favorites,
    Hidden,
    KidGame,
    Custom,
}

/// Template describing a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDecl {
    pub kind: CollectionKind,
    /// Unique name; for automatic kinds also the metadata key they track
    pub name: String,
    pub long_name: String,
    pub default_sort: String,
    pub theme_folder: String,
    pub is_custom: bool,
    pub is_editable: bool,
}

impl CollectionDecl {
    fn builtin(
        kind: CollectionKind,
        name: &str,
        long_name: &str,
        default_sort: &str,
        theme_folder: &str,
        is_editable: bool,
    ) -> Self {
        Self {
            kind,
            name: name.to_string(),
            long_name: long_name.to_string(),
            default_sort: default_sort.to_string(),
            theme_folder: theme_folder.to_string(),
            is_custom: kind == CollectionKind::Custom,
            is_editable,
        }
    }

    /// Declaration for a user collection named `name`
    pub fn custom(template: &CollectionDecl, name: &str) -> Self {
        Self {
            name: name.to_string(),
            long_name: name.to_string(),
            theme_folder: name.to_string(),
            ..template.clone()
        }
    }
}

/// Name-keyed table of the built-in declarations
#[derive(Debug, Clone)]
pub struct DeclarationTable {
    decls: BTreeMap<String, CollectionDecl>,
    custom_template: CollectionDecl,
}

impl Default for DeclarationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationTable {
    pub fn new() -> Self {
        use CollectionKind::*;

        let custom_template = CollectionDecl::builtin(
            Custom,
            CUSTOM_COLLECTIONS_NAME,
            "collections",
            "filename, ascending",
            "custom-collections",
            true,
        );

        // The name of an automatic collection must match the metadata key
        // it is derived from; toggling writes that key verbatim.
        let decls = [
            CollectionDecl::builtin(
                AllGames,
                ALL_GAMES_NAME,
                "all games",
                "filename, ascending",
                "auto-allgames",
                false,
            ),
            CollectionDecl::builtin(
                LastPlayed,
                "recent",
                "last played",
                "last played, descending",
                "auto-lastplayed",
                false,
            ),
            CollectionDecl::builtin(
                Favorites,
                DEFAULT_EDIT_COLLECTION,
                "favorites",
                "filename, ascending",
                "auto-favorites",
                true,
            ),
            CollectionDecl::builtin(
                Hidden,
                "hidden",
                "items to hide",
                "filename, ascending",
                "custom-collections",
                true,
            ),
            CollectionDecl::builtin(
                KidGame,
                "kidgame",
                "kid-friendly",
                "filename, ascending",
                "custom-collections",
                true,
            ),
            custom_template.clone(),
        ];

        Self {
            decls: decls
                .into_iter()
                .map(|decl| (decl.name.clone(), decl))
                .collect(),
            custom_template,
        }
    }

    pub fn get(&self, name: &str) -> Option<&CollectionDecl> {
        self.decls.get(name)
    }

    /// Whether `name` is reserved by a built-in declaration
    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectionDecl> {
        self.decls.values()
    }

    /// The template custom collections are cloned from
    pub fn custom_template(&self) -> &CollectionDecl {
        &self.custom_template
    }
}
