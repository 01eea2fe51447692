//! Game metadata handling
//!
//! Metadata is stored as strings, the same way gamelist.xml carries it.
//! Booleans are `"true"`/`"false"`, numbers are parsed on read.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known metadata keys
pub mod keys {
    pub const NAME: &str = "name";
    pub const DESC: &str = "desc";
    pub const IMAGE: &str = "image";
    pub const VIDEO: &str = "video";
    pub const THUMBNAIL: &str = "thumbnail";
    pub const RATING: &str = "rating";
    pub const RELEASE_DATE: &str = "releasedate";
    pub const DEVELOPER: &str = "developer";
    pub const PUBLISHER: &str = "publisher";
    pub const GENRE: &str = "genre";
    pub const PLAYERS: &str = "players";
    pub const FAVORITE: &str = "favorite";
    pub const HIDDEN: &str = "hidden";
    pub const KIDGAME: &str = "kidgame";
    pub const PLAY_COUNT: &str = "playcount";
    pub const LAST_PLAYED: &str = "lastplayed";

    /// Every key understood by gamelist.xml import
    pub const ALL: &[&str] = &[
        NAME,
        DESC,
        IMAGE,
        VIDEO,
        THUMBNAIL,
        RATING,
        RELEASE_DATE,
        DEVELOPER,
        PUBLISHER,
        GENRE,
        PLAYERS,
        FAVORITE,
        HIDDEN,
        KIDGAME,
        PLAY_COUNT,
        LAST_PLAYED,
    ];
}

/// String-typed metadata for a file or folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaDataList {
    values: HashMap<String, String>,
}

impl MetaDataList {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a raw value, `""` when unset
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Set a raw value
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key) == "true"
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }

    /// Integer value, 0 when unset or unparsable
    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).trim().parse().unwrap_or(0)
    }

    /// Float value, 0.0 when unset or unparsable
    pub fn get_float(&self, key: &str) -> f32 {
        self.get(key).trim().parse().unwrap_or(0.0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Check if metadata is mostly empty
    pub fn is_empty(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }

    /// Merge with another metadata (non-empty fields take precedence)
    pub fn merge(&mut self, other: &MetaDataList) {
        for (key, value) in &other.values {
            if self.get(key).is_empty() && !value.is_empty() {
                self.values.insert(key.clone(), value.clone());
            }
        }
    }
}
