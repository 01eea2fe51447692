//! Collection registry
//!
//! Owns every collection, the custom collections bundle and the edit
//! session. The game library is never owned here; each operation borrows
//! the [`SystemList`] it needs.

use crate::bundle::{Bundle, wants_own_slot};
use crate::collection::{Collection, MembershipContext};
use crate::declaration::{
    ALL_GAMES_NAME, CollectionDecl, DEFAULT_EDIT_COLLECTION, DeclarationTable,
};
use crate::events::{CollectionEvents, EDIT_POPUP_DURATION, LogEvents, NOTICE_POPUP_DURATION};
use crate::names::{sanitize_collection_name, unique_collection_name};
use crate::ordering::{DisplayEntry, SystemOrdering};
use crate::store::CollectionStore;
use crate::theme::ThemeCatalog;
use crate::{CollectionError, Result};
use rexos_config::{CollectionSettings, RexOSConfig, ThemeSettings, default_collections_dir};
use rexos_library::{GameRef, SortType, SystemList};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Label shown once an edit session falls back to the default collection
const DEFAULT_EDIT_LABEL: &str = "Favorites";

/// All collections plus the state tying them to the system list
pub struct CollectionRegistry<E: CollectionEvents = LogEvents> {
    decls: DeclarationTable,
    collections: BTreeMap<String, Collection>,
    bundle: Bundle,
    editing: Option<String>,
    editing_label: String,
    is_editing: bool,
    displayed: Vec<DisplayEntry>,
    settings: CollectionSettings,
    themes: ThemeSettings,
    store: CollectionStore,
    events: E,
}

impl CollectionRegistry<LogEvents> {
    /// Registry using the default collections folder, logging its notifications
    pub fn from_config(config: &RexOSConfig) -> Self {
        Self::new(config, default_collections_dir(), LogEvents)
    }
}

impl<E: CollectionEvents> CollectionRegistry<E> {
    pub fn new(config: &RexOSConfig, collections_dir: impl Into<PathBuf>, events: E) -> Self {
        let decls = DeclarationTable::new();
        let bundle = Bundle::new(decls.custom_template());

        Self {
            decls,
            collections: BTreeMap::new(),
            bundle,
            editing: None,
            editing_label: DEFAULT_EDIT_LABEL.to_string(),
            is_editing: false,
            displayed: Vec::new(),
            settings: config.collections.clone(),
            themes: config.themes.clone(),
            store: CollectionStore::new(collections_dir),
            events,
        }
    }

    /// Create every collection and show the enabled ones
    ///
    /// Automatic collections come from the declarations, custom ones from
    /// the `custom-*.cfg` files in the collections folder. Collections are
    /// populated lazily, when first shown or edited.
    pub fn load_collection_systems(&mut self, libs: &SystemList) -> Result<()> {
        self.store.ensure_dir()?;
        self.init_auto_collections();
        self.init_custom_collections()?;
        self.load_enabled_list_from_settings();
        self.update_systems_list(libs);

        if self.is_enabled(DEFAULT_EDIT_COLLECTION) {
            // Failure is already logged
            let _ = self.set_edit_mode(DEFAULT_EDIT_COLLECTION, libs);
        }

        tracing::info!(
            "Loaded {} collections ({} enabled)",
            self.collections.len(),
            self.enabled_collections().len()
        );
        Ok(())
    }

    fn init_auto_collections(&mut self) {
        let decls: Vec<CollectionDecl> = self
            .decls
            .iter()
            .filter(|decl| !decl.is_custom)
            .cloned()
            .collect();

        for decl in decls {
            self.collections
                .entry(decl.name.clone())
                .or_insert_with(|| Collection::new(decl));
        }
    }

    fn init_custom_collections(&mut self) -> Result<()> {
        for name in self.store.discover()? {
            self.add_new_custom_collection(&name);
        }
        Ok(())
    }

    fn add_new_custom_collection(&mut self, name: &str) -> &mut Collection {
        let decl = CollectionDecl::custom(self.decls.custom_template(), name);
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Collection::new(decl))
    }

    fn load_enabled_list_from_settings(&mut self) {
        let enabled = self.settings.enabled_list();
        for (name, collection) in self.collections.iter_mut() {
            collection.state_mut().enabled = enabled.iter().any(|e| e == name);
        }
    }

    /// Replace the settings and rebuild the system list from them
    pub fn apply_settings(&mut self, settings: CollectionSettings, libs: &SystemList) {
        self.settings = settings;
        self.load_enabled_list_from_settings();
        self.update_systems_list(libs);
    }

    pub fn settings(&self) -> &CollectionSettings {
        &self.settings
    }

    pub fn theme_settings(&self) -> &ThemeSettings {
        &self.themes
    }

    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// All collections, keyed and ordered by name
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.collections
            .get(name)
            .is_some_and(Collection::is_enabled)
    }

    /// Names of the enabled collections
    pub fn enabled_collections(&self) -> Vec<&str> {
        self.collections
            .values()
            .filter(|collection| collection.is_enabled())
            .map(Collection::name)
            .collect()
    }

    /// Names of collections the user may add games to
    pub fn editable_collection_names(&self) -> Vec<String> {
        self.collections
            .values()
            .filter(|collection| collection.decl().is_editable)
            .map(|collection| collection.name().to_string())
            .collect()
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Fill a collection if that has not happened yet
    pub fn populate_collection(&mut self, name: &str, libs: &SystemList) {
        if self
            .collections
            .get(name)
            .is_none_or(Collection::is_populated)
        {
            return;
        }

        let is_custom = self.collections.get(name).is_some_and(Collection::is_custom);
        if is_custom {
            self.populate_collection(ALL_GAMES_NAME, libs);
        }

        let Some(mut collection) = self.collections.remove(name) else {
            return;
        };

        let mut ctx = MembershipContext {
            bundle: &mut self.bundle,
            events: &mut self.events,
        };
        match &mut collection {
            Collection::Auto(auto) => auto.populate(libs, &mut ctx),
            Collection::Custom(custom) => match self.collections.get(ALL_GAMES_NAME) {
                Some(all) => {
                    if let Err(err) = custom.populate(&self.store, all.system(), &mut ctx) {
                        tracing::error!("Failed to load collection {}: {}", name, err);
                    }
                }
                None => tracing::error!(
                    "Cannot populate {} without the '{}' collection",
                    name,
                    ALL_GAMES_NAME
                ),
            },
        }

        self.collections.insert(name.to_string(), collection);
    }

    /// Rebuild the displayed system list from `libs` and the enabled collections
    pub fn update_systems_list(&mut self, libs: &SystemList) {
        self.remove_collections_from_displayed_systems(libs);
        self.add_enabled_collections_to_displayed_systems(libs);
        self.ordering().sort(&mut self.displayed);

        let editing_disabled = self
            .editing
            .as_deref()
            .is_some_and(|name| !self.is_enabled(name));
        if editing_disabled {
            self.exit_edit_mode(libs);
        }
    }

    fn remove_collections_from_displayed_systems(&mut self, libs: &SystemList) {
        self.displayed = libs.iter().map(DisplayEntry::library).collect();
        self.bundle.detach_all();
    }

    fn add_enabled_collections_to_displayed_systems(&mut self, libs: &SystemList) {
        let themed = self.systems_from_theme();
        let enabled: Vec<String> = self
            .enabled_collections()
            .into_iter()
            .map(String::from)
            .collect();

        for name in enabled {
            self.populate_collection(&name, libs);

            let Some(collection) = self.collections.get(&name) else {
                continue;
            };
            let has_theme = themed.iter().any(|folder| *folder == name);
            if wants_own_slot(collection.decl(), has_theme, self.settings.bundle_custom) {
                self.displayed.push(DisplayEntry::collection(collection.system()));
            } else {
                self.bundle.attach(collection.system());
            }
        }

        let bundle_has_games = self.bundle.members().iter().any(|member| {
            self.collections
                .get(member)
                .is_some_and(|collection| !collection.system().is_empty())
        });
        if bundle_has_games {
            let sort = SortType::from_description(&self.decls.custom_template().default_sort);
            self.bundle.sort(sort);
            self.displayed.push(DisplayEntry::collection(self.bundle.system()));
        }
    }

    /// The current system list, ordered
    pub fn displayed_systems(&self) -> &[DisplayEntry] {
        &self.displayed
    }

    pub fn ordering(&self) -> SystemOrdering {
        SystemOrdering::from_settings(self.settings.sort_with_systems)
    }

    /// System whose view shows the collection `name`: the bundle for bundled
    /// custom collections, otherwise the collection itself
    pub fn resolve_display_target<'a>(&'a self, name: &'a str) -> &'a str {
        if self.bundle.holds(name) {
            self.bundle.name()
        } else {
            name
        }
    }

    /// Start editing `name`
    ///
    /// Unknown or disabled collections end the edit session instead.
    pub fn set_edit_mode(&mut self, name: &str, libs: &SystemList) -> Result<()> {
        let error = match self.collections.get(name) {
            None => Some(CollectionError::UnknownCollection(name.to_string())),
            Some(collection) if !collection.is_enabled() => {
                Some(CollectionError::Disabled(name.to_string()))
            }
            Some(_) => None,
        };
        if let Some(error) = error {
            tracing::error!("Tried to edit a non-existing or disabled collection: {}", name);
            self.is_editing = false;
            self.editing = None;
            return Err(error);
        }

        self.populate_collection(name, libs);
        self.editing = Some(name.to_string());
        self.editing_label = name.to_string();
        self.events.info_popup(
            &format!(
                "Editing the '{}' Collection. Add/remove games with Y.",
                name.to_uppercase()
            ),
            EDIT_POPUP_DURATION,
        );
        self.is_editing = true;
        Ok(())
    }

    /// End the edit session and fall back to the default collection
    pub fn exit_edit_mode(&mut self, libs: &SystemList) {
        self.events.info_popup(
            &format!("Finished editing the '{}' Collection.", self.editing_label),
            NOTICE_POPUP_DURATION,
        );
        // Failure is already logged
        let _ = self.set_edit_mode(DEFAULT_EDIT_COLLECTION, libs);
        self.editing_label = DEFAULT_EDIT_LABEL.to_string();
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// Collection games are currently toggled in
    pub fn editing_collection(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Label of the current edit session, for display
    pub fn editing_label(&self) -> &str {
        &self.editing_label
    }

    /// Add or remove `game` in the collection being edited
    pub fn toggle_game_in_collection(&mut self, libs: &mut SystemList, game: &GameRef) -> bool {
        let Some(name) = self.editing.clone() else {
            tracing::debug!("No collection is being edited");
            return false;
        };

        self.populate_collection(&name, libs);
        let Some(collection) = self.collections.get_mut(&name) else {
            return false;
        };

        let mut ctx = MembershipContext {
            bundle: &mut self.bundle,
            events: &mut self.events,
        };
        let toggled = match collection {
            Collection::Auto(auto) => auto.toggle(libs, game, &mut ctx),
            Collection::Custom(custom) => custom.toggle(libs, game, &mut ctx),
        };

        // Automatic toggles rewrite origin metadata other collections track
        if toggled && !collection.is_custom() {
            self.sync_all_on_change(libs, game);
        }
        toggled
    }

    /// Drop `game` from every populated collection, before it is deleted
    pub fn delete_entries_for(&mut self, game: &GameRef) {
        let mut ctx = MembershipContext {
            bundle: &mut self.bundle,
            events: &mut self.events,
        };

        for collection in self.collections.values_mut() {
            let state = collection.state_mut();
            if !state.is_populated() || !state.system().contains(&game.path) {
                continue;
            }
            state.dirty = true;
            state.remove_game(&game.path, &mut ctx);
            state.update_folder_metadata();
        }
    }

    /// Reconcile every collection after the metadata of `game` changed
    pub fn sync_all_on_change(&mut self, libs: &SystemList, game: &GameRef) {
        let Some(system) = libs.get(&game.system) else {
            tracing::debug!("Unknown system {} for {}", game.system, game.path);
            return;
        };
        if !system.is_game_system() {
            return;
        }
        let Some(file) = system.find(&game.path) else {
            tracing::debug!("Game {} not found in {}", game.path, game.system);
            return;
        };

        let mut ctx = MembershipContext {
            bundle: &mut self.bundle,
            events: &mut self.events,
        };
        for collection in self.collections.values_mut() {
            collection
                .state_mut()
                .sync_on_change(system.name(), file, &mut ctx);
        }
    }

    /// Theme folders of every system and collection
    pub fn systems_in_use(&self, libs: &SystemList) -> Vec<String> {
        let mut in_use = libs.theme_folders();
        in_use.extend(
            self.collections
                .values()
                .map(|collection| collection.system().theme_folder().to_string()),
        );
        in_use
    }

    /// Sanitized, unused name for a new custom collection
    pub fn valid_new_collection_name(&self, raw: &str, libs: &SystemList) -> String {
        let sanitized = sanitize_collection_name(raw);
        let in_use = self.systems_in_use(libs);
        let name = unique_collection_name(&sanitized, |candidate| {
            in_use.iter().any(|used| used == candidate) || self.decls.contains(candidate)
        });

        if name != raw {
            tracing::info!("Had to change name, from: {} to: {}", raw, name);
        }
        name
    }

    /// Create an empty custom collection, returning its final name
    pub fn create_custom_collection(&mut self, raw: &str, libs: &SystemList) -> String {
        let name = self.valid_new_collection_name(raw, libs);
        let state = self.add_new_custom_collection(&name).state_mut();
        state.populated = true;
        state.dirty = true;
        tracing::info!("Created custom collection {}", name);
        name
    }

    /// Folder names of the current theme set, falling back to the first set
    /// when the configured one is not installed
    pub fn systems_from_theme(&mut self) -> Vec<String> {
        let catalog = ThemeCatalog::discover(&self.themes.search_paths);
        let Some(set) = catalog.select(&self.themes.theme_set) else {
            tracing::debug!("No theme sets installed");
            return Vec::new();
        };

        if set.name != self.themes.theme_set {
            tracing::warn!(
                "Theme set '{}' not found, using '{}'",
                self.themes.theme_set,
                set.name
            );
            self.themes.theme_set = set.name.clone();
        }
        set.system_folders()
    }

    pub fn theme_folder_exists(&mut self, folder: &str) -> bool {
        self.systems_from_theme().iter().any(|f| f == folder)
    }

    /// Theme folders no system or collection uses, for naming new collections
    pub fn unused_theme_folders(&mut self, libs: &SystemList) -> Vec<String> {
        let in_use = self.systems_in_use(libs);
        self.systems_from_theme()
            .into_iter()
            .filter(|folder| !in_use.contains(folder))
            .collect()
    }

    /// Write every custom collection with unsaved changes
    ///
    /// Keeps going after a failure and returns the first error.
    pub fn save_all(&mut self) -> Result<()> {
        let mut first_error = None;

        for collection in self.collections.values_mut() {
            let Collection::Custom(custom) = collection else {
                continue;
            };
            if let Err(err) = custom.save(&self.store) {
                tracing::error!("Failed to save collection {}: {}", collection.name(), err);
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<E: CollectionEvents> Drop for CollectionRegistry<E> {
    fn drop(&mut self) {
        if let Err(err) = self.save_all() {
            tracing::error!("Failed to save collections on shutdown: {}", err);
        }
    }
}
