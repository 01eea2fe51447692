//! Automatic and custom collections
//!
//! Both variants share a [`CollectionState`]: the declaration, the backing
//! game list and the lifecycle flags. Automatic collections derive their
//! members from a metadata predicate over every game system; custom ones
//! load an explicit list of paths from disk and are only ever changed by
//! the user.

use crate::bundle::Bundle;
use crate::declaration::{CollectionDecl, CollectionKind};
use crate::entry::{CollectionEntry, CollectionSystem};
use crate::events::{CollectionEvents, FileChange, NOTICE_POPUP_DURATION};
use crate::names::remove_parenthesis;
use crate::store::CollectionStore;
use crate::Result;
use rexos_library::{FileData, GameRef, SortType, SystemList, keys};

/// Shared state a collection touches besides itself while changing members
pub(crate) struct MembershipContext<'a> {
    pub bundle: &'a mut Bundle,
    pub events: &'a mut dyn CollectionEvents,
}

/// Declaration, members and lifecycle flags of one collection
#[derive(Debug, Clone)]
pub struct CollectionState {
    decl: CollectionDecl,
    system: CollectionSystem,
    pub(crate) enabled: bool,
    pub(crate) populated: bool,
    pub(crate) dirty: bool,
}

impl CollectionState {
    fn new(decl: CollectionDecl) -> Self {
        let system = CollectionSystem::new(&decl);
        Self {
            decl,
            system,
            enabled: false,
            populated: false,
            dirty: false,
        }
    }

    pub fn decl(&self) -> &CollectionDecl {
        &self.decl
    }

    pub fn system(&self) -> &CollectionSystem {
        &self.system
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Whether there are unsaved membership changes
    pub fn needs_save(&self) -> bool {
        self.dirty
    }

    /// Whether `file` qualifies for this collection
    ///
    /// Flag based kinds accept any entry type, so a flagged folder counts.
    pub fn is_valid_game(&self, file: &FileData) -> bool {
        match self.decl.kind {
            CollectionKind::AllGames | CollectionKind::Custom => file.is_game(),
            CollectionKind::LastPlayed => {
                file.is_game() && file.metadata.get_int(keys::PLAY_COUNT) > 0
            }
            CollectionKind::Favorites => file.metadata.get_bool(keys::FAVORITE),
            CollectionKind::Hidden => file.metadata.get_bool(keys::HIDDEN),
            CollectionKind::KidGame => file.metadata.get_bool(keys::KIDGAME),
        }
    }

    /// System whose gamelist shows this collection's entries
    fn view_name(&self, bundle: &Bundle) -> String {
        if self.decl.is_custom && bundle.holds(&self.decl.name) {
            bundle.name().to_string()
        } else {
            self.decl.name.clone()
        }
    }

    /// Index and insert `entry`; a path that is already a member is skipped
    pub(crate) fn add_entry(&mut self, entry: CollectionEntry, ctx: &mut MembershipContext) {
        if self.system.contains(entry.path()) {
            return;
        }
        let view = self.view_name(ctx.bundle);
        if view != self.decl.name {
            ctx.bundle.index_mut().add(&entry.metadata);
        }
        self.system.index_mut().add(&entry.metadata);
        ctx.events
            .file_changed(&view, entry.path(), FileChange::MetadataChanged);
        self.system.insert(entry);
    }

    pub(crate) fn add_game(&mut self, system: &str, file: &FileData, ctx: &mut MembershipContext) {
        self.add_entry(CollectionEntry::from_origin(system, file), ctx);
    }

    /// Drop the member at `path`; false if it was not a member
    pub(crate) fn remove_game(&mut self, path: &str, ctx: &mut MembershipContext) -> bool {
        let Some(entry) = self.system.remove(path) else {
            return false;
        };

        let view = self.view_name(ctx.bundle);
        if view != self.decl.name {
            ctx.bundle.index_mut().remove(&entry.metadata);
        }
        self.system.index_mut().remove(&entry.metadata);
        ctx.events.file_changed(&view, path, FileChange::Removed);
        true
    }

    /// Re-sort members by the declared default order
    pub(crate) fn reset_sort(&mut self, ctx: &mut MembershipContext) {
        self.system
            .sort(SortType::from_description(&self.decl.default_sort));
        let view = self.view_name(ctx.bundle);
        ctx.events.file_changed(&view, "", FileChange::Sorted);
    }

    pub(crate) fn update_folder_metadata(&mut self) {
        self.system.update_folder_metadata();
    }

    /// Reconcile membership after the metadata of `file` changed
    ///
    /// Custom collections only refresh or drop existing members; they never
    /// pick up games on their own.
    pub(crate) fn sync_on_change(
        &mut self,
        system: &str,
        file: &FileData,
        ctx: &mut MembershipContext,
    ) {
        if !self.populated {
            return;
        }

        let valid = self.is_valid_game(file);
        let view = self.view_name(ctx.bundle);
        let bundled = view != self.decl.name;

        if let Some(entry) = self.system.get_mut(file.path()) {
            let stale = entry.metadata.clone();
            if valid {
                entry.refresh_metadata(file);
            }

            self.system.index_mut().remove(&stale);
            if bundled {
                ctx.bundle.index_mut().remove(&stale);
            }

            if valid {
                self.system.index_mut().add(&file.metadata);
                if bundled {
                    ctx.bundle.index_mut().add(&file.metadata);
                }
                ctx.events
                    .file_changed(&view, file.path(), FileChange::MetadataChanged);
            } else {
                self.system.remove(file.path());
                ctx.events
                    .file_changed(&view, file.path(), FileChange::Removed);
            }
        } else if valid && !self.decl.is_custom {
            self.add_game(system, file, ctx);
        } else {
            return;
        }

        self.reset_sort(ctx);
        self.update_folder_metadata();
    }

    fn show_toggle_popup(&self, game_name: &str, added: bool, ctx: &mut MembershipContext) {
        let game = remove_parenthesis(game_name);
        let collection = self.decl.name.to_uppercase();
        let message = if added {
            format!("Added '{}' to '{}'", game, collection)
        } else {
            format!("Removed '{}' from '{}'", game, collection)
        };
        ctx.events.info_popup(&message, NOTICE_POPUP_DURATION);
    }
}

/// Collection derived from a metadata flag over every game system
#[derive(Debug, Clone)]
pub struct AutoCollection {
    state: CollectionState,
}

impl AutoCollection {
    /// Fill from every game system in `libs`
    pub(crate) fn populate(&mut self, libs: &SystemList, ctx: &mut MembershipContext) {
        for system in libs.iter().filter(|system| system.is_game_system()) {
            for game in system.games() {
                if self.state.is_valid_game(game) {
                    self.state.add_game(system.name(), game, ctx);
                }
            }
        }

        self.state.reset_sort(ctx);
        self.state.update_folder_metadata();
        self.state.populated = true;
        tracing::debug!(
            "Populated collection {} with {} games",
            self.state.name(),
            self.state.system.len()
        );
    }

    /// Flip the tracked flag on the origin game and follow it
    ///
    /// The flag written is the metadata key named after the collection.
    pub(crate) fn toggle(
        &mut self,
        libs: &mut SystemList,
        game: &GameRef,
        ctx: &mut MembershipContext,
    ) -> bool {
        let Some(file) = libs.game_mut(game) else {
            tracing::warn!("Cannot toggle unknown game {} in {}", game.path, game.system);
            return false;
        };
        if !file.is_game() {
            return false;
        }

        let key = self.state.decl.name.clone();
        let was_member = file.metadata.get_bool(&key);
        file.metadata.set_bool(&key, !was_member);
        ctx.events
            .file_changed(&game.system, &game.path, FileChange::MetadataChanged);

        self.state.show_toggle_popup(file.name(), !was_member, ctx);
        if was_member {
            self.state.remove_game(file.path(), ctx);
        } else {
            self.state.add_game(&game.system, file, ctx);
            self.state.reset_sort(ctx);
        }

        self.state.update_folder_metadata();
        true
    }
}

/// User curated collection backed by a file on disk
#[derive(Debug, Clone)]
pub struct CustomCollection {
    state: CollectionState,
}

impl CustomCollection {
    /// Load member paths and resolve them against the all-games collection
    ///
    /// A missing file counts as an empty collection. Paths no longer in the
    /// library are skipped.
    pub(crate) fn populate(
        &mut self,
        store: &CollectionStore,
        all_games: &CollectionSystem,
        ctx: &mut MembershipContext,
    ) -> Result<()> {
        let paths = store.load(self.state.name())?.unwrap_or_default();

        for path in paths {
            match all_games.get(&path) {
                Some(entry) => self.state.add_entry(entry.clone(), ctx),
                None => tracing::info!(
                    "Couldn't find game referenced at '{}' for collection {}",
                    path,
                    self.state.name()
                ),
            }
        }

        self.state.reset_sort(ctx);
        self.state.update_folder_metadata();
        self.state.populated = true;
        Ok(())
    }

    /// Add the game if absent, remove it if present
    pub(crate) fn toggle(
        &mut self,
        libs: &SystemList,
        game: &GameRef,
        ctx: &mut MembershipContext,
    ) -> bool {
        let Some(file) = libs.game(game) else {
            tracing::warn!("Cannot toggle unknown game {} in {}", game.path, game.system);
            return false;
        };
        if !file.is_game() {
            return false;
        }

        self.state.dirty = true;
        if self.state.system.contains(file.path()) {
            self.state.remove_game(file.path(), ctx);
            self.state.show_toggle_popup(file.name(), false, ctx);
        } else {
            self.state.add_game(&game.system, file, ctx);
            self.state.reset_sort(ctx);
            self.state.show_toggle_popup(file.name(), true, ctx);
        }

        self.state.update_folder_metadata();
        true
    }

    /// Write members to disk if they changed since the last save
    pub(crate) fn save(&mut self, store: &CollectionStore) -> Result<()> {
        if !self.state.dirty {
            return Ok(());
        }
        store.save(self.state.name(), self.state.system.paths())?;
        self.state.dirty = false;
        Ok(())
    }
}

/// A registered collection
#[derive(Debug, Clone)]
pub enum Collection {
    Auto(AutoCollection),
    Custom(CustomCollection),
}

impl Collection {
    pub fn new(decl: CollectionDecl) -> Self {
        let state = CollectionState::new(decl);
        if state.decl.is_custom {
            Collection::Custom(CustomCollection { state })
        } else {
            Collection::Auto(AutoCollection { state })
        }
    }

    pub fn state(&self) -> &CollectionState {
        match self {
            Collection::Auto(auto) => &auto.state,
            Collection::Custom(custom) => &custom.state,
        }
    }

    pub(crate) fn state_mut(&mut self) -> &mut CollectionState {
        match self {
            Collection::Auto(auto) => &mut auto.state,
            Collection::Custom(custom) => &mut custom.state,
        }
    }

    pub fn name(&self) -> &str {
        self.state().name()
    }

    pub fn decl(&self) -> &CollectionDecl {
        self.state().decl()
    }

    pub fn system(&self) -> &CollectionSystem {
        self.state().system()
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Collection::Custom(_))
    }

    pub fn is_enabled(&self) -> bool {
        self.state().is_enabled()
    }

    pub fn is_populated(&self) -> bool {
        self.state().is_populated()
    }

    pub fn needs_save(&self) -> bool {
        self.state().needs_save()
    }
}
