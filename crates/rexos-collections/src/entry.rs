//! Projection entries and the per-collection game list
//!
//! A collection never owns game data. Each member is a [`CollectionEntry`]
//! pointing back at its origin game by system and full path, carrying a copy
//! of the origin metadata that is re-derived whenever the origin changes.

use crate::declaration::CollectionDecl;
use indexmap::IndexMap;
use rand::Rng;
use rexos_library::{FileData, FileType, FilterIndex, GameRef, MetaDataList, SortType, keys};

/// A collection member pointing at a game owned by a system
#[derive(Debug, Clone)]
pub struct CollectionEntry {
    origin: GameRef,
    file_type: FileType,
    pub metadata: MetaDataList,
}

impl CollectionEntry {
    /// Project `file`, owned by `system`, into a collection
    pub fn from_origin(system: &str, file: &FileData) -> Self {
        Self {
            origin: GameRef::new(system, file.path()),
            file_type: file.file_type(),
            metadata: file.metadata.clone(),
        }
    }

    /// Full path of the origin game, the membership key
    pub fn path(&self) -> &str {
        &self.origin.path
    }

    pub fn origin(&self) -> &GameRef {
        &self.origin
    }

    pub fn name(&self) -> &str {
        self.metadata.get(keys::NAME)
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Copy the current metadata of the origin game
    pub fn refresh_metadata(&mut self, origin: &FileData) {
        self.metadata = origin.metadata.clone();
        self.file_type = origin.file_type();
    }
}

/// Backing game list of one collection
#[derive(Debug, Clone)]
pub struct CollectionSystem {
    name: String,
    full_name: String,
    theme_folder: String,
    entries: IndexMap<String, CollectionEntry>,
    /// Derived metadata describing the collection as a whole
    pub metadata: MetaDataList,
    index: FilterIndex,
}

impl CollectionSystem {
    pub fn new(decl: &CollectionDecl) -> Self {
        let mut metadata = MetaDataList::new();
        metadata.set(keys::NAME, decl.name.as_str());

        Self {
            name: decl.name.clone(),
            full_name: decl.long_name.clone(),
            theme_folder: decl.theme_folder.clone(),
            entries: IndexMap::new(),
            metadata,
            index: FilterIndex::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn theme_folder(&self) -> &str {
        &self.theme_folder
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&CollectionEntry> {
        self.entries.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut CollectionEntry> {
        self.entries.get_mut(path)
    }

    /// Members in display order
    pub fn entries(&self) -> impl Iterator<Item = &CollectionEntry> {
        self.entries.values()
    }

    /// Member paths in display order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Insert (or replace) a member, keyed by its path
    pub fn insert(&mut self, entry: CollectionEntry) {
        self.entries.insert(entry.path().to_string(), entry);
    }

    pub fn remove(&mut self, path: &str) -> Option<CollectionEntry> {
        self.entries.shift_remove(path)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.reset();
    }

    pub fn index(&self) -> &FilterIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut FilterIndex {
        &mut self.index
    }

    pub fn sort(&mut self, sort: SortType) {
        self.entries
            .sort_by(|_, a, _, b| sort.compare(&a.metadata, &b.metadata));
    }

    pub fn random_entry(&self) -> Option<&CollectionEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let pick = rand::thread_rng().gen_range(0..self.entries.len());
        self.entries.get_index(pick).map(|(_, entry)| entry)
    }

    /// Recompute the collection-wide metadata from its members
    pub fn update_folder_metadata(&mut self) {
        let mut desc = "This collection is empty.".to_string();
        let mut rating = "0".to_string();
        let mut players = "1".to_string();
        let mut release_date = "N/A".to_string();
        let mut developer = "None".to_string();
        let mut genre = "None".to_string();
        let mut video = String::new();
        let mut image = String::new();

        if !self.entries.is_empty() {
            let mut games_list = String::new();
            let mut counter = 0;

            for entry in self.entries.values() {
                counter += 1;
                let meta = &entry.metadata;

                let new_rating = meta.get(keys::RATING);
                if !new_rating.is_empty() && new_rating > rating.as_str() {
                    rating = new_rating.to_string();
                }
                let new_players = meta.get(keys::PLAYERS);
                if !new_players.is_empty() && new_players > players.as_str() {
                    players = new_players.to_string();
                }
                let new_release = meta.get(keys::RELEASE_DATE);
                if !new_release.is_empty() && new_release < release_date.as_str() {
                    release_date = new_release.to_string();
                }
                developer = merge_credit(&developer, meta.get(keys::DEVELOPER));
                genre = merge_credit(&genre, meta.get(keys::GENRE));

                match counter {
                    1 => games_list.push_str(&format!("'{}'", entry.name())),
                    2 | 3 => games_list.push_str(&format!(", '{}'", entry.name())),
                    4 => games_list.push_str(" among other titles."),
                    _ => {}
                }
            }

            desc = format!(
                "This collection contains {} games, including {}",
                counter, games_list
            );

            if let Some(random) = self.random_entry() {
                video = random.metadata.get(keys::VIDEO).to_string();
                image = match random.metadata.get(keys::THUMBNAIL) {
                    "" => random.metadata.get(keys::IMAGE).to_string(),
                    thumbnail => thumbnail.to_string(),
                };
            }
        }

        self.metadata.set(keys::DESC, desc);
        self.metadata.set(keys::RATING, rating);
        self.metadata.set(keys::PLAYERS, players);
        self.metadata.set(keys::GENRE, genre);
        self.metadata.set(keys::RELEASE_DATE, release_date);
        self.metadata.set(keys::DEVELOPER, developer);
        self.metadata.set(keys::VIDEO, video);
        self.metadata.set(keys::IMAGE, image);
    }
}

/// "None" until the first member, "Various" once members disagree
fn merge_credit(current: &str, new: &str) -> String {
    if current == "None" || new == current {
        new.to_string()
    } else {
        "Various".to_string()
    }
}
