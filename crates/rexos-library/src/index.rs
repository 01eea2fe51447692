//! Filter index for gamelists
//!
//! Counts how many entries carry each filter value so the UI can offer
//! filter choices. Indexes can be merged into each other (bundled systems).

use crate::metadata::{MetaDataList, keys};
use std::collections::BTreeMap;

/// Filterable metadata facets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterType {
    Genre,
    Players,
    PubDev,
    Rating,
    Favorites,
    Hidden,
    KidGame,
}

impl FilterType {
    pub const ALL: [FilterType; 7] = [
        FilterType::Genre,
        FilterType::Players,
        FilterType::PubDev,
        FilterType::Rating,
        FilterType::Favorites,
        FilterType::Hidden,
        FilterType::KidGame,
    ];

    /// Index keys an entry contributes for this facet
    fn values(&self, metadata: &MetaDataList) -> Vec<String> {
        let key = |value: &str| {
            let value = value.trim();
            if value.is_empty() {
                "UNKNOWN".to_string()
            } else {
                value.to_uppercase()
            }
        };

        match self {
            // "Action / Platform" is indexed under its first genre
            FilterType::Genre => {
                let genre = metadata.get(keys::GENRE);
                vec![key(genre.split('/').next().unwrap_or(genre))]
            }
            FilterType::Players => vec![key(metadata.get(keys::PLAYERS))],
            FilterType::PubDev => {
                let mut values = vec![key(metadata.get(keys::PUBLISHER))];
                let developer = key(metadata.get(keys::DEVELOPER));
                if !values.contains(&developer) {
                    values.push(developer);
                }
                values
            }
            // 0.0-1.0 rating shown as whole stars
            FilterType::Rating => {
                let stars = (metadata.get_float(keys::RATING) * 5.0).round() as i32;
                vec![format!("{} STARS", stars.clamp(0, 5))]
            }
            FilterType::Favorites => vec![bool_key(metadata.get_bool(keys::FAVORITE))],
            FilterType::Hidden => vec![bool_key(metadata.get_bool(keys::HIDDEN))],
            FilterType::KidGame => vec![bool_key(metadata.get_bool(keys::KIDGAME))],
        }
    }
}

fn bool_key(value: bool) -> String {
    let key = if value { "TRUE" } else { "FALSE" };
    key.to_string()
}

/// Per-facet value counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterIndex {
    counts: BTreeMap<FilterType, BTreeMap<String, usize>>,
}

impl FilterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, metadata: &MetaDataList) {
        for filter in FilterType::ALL {
            let facet = self.counts.entry(filter).or_default();
            for value in filter.values(metadata) {
                *facet.entry(value).or_insert(0) += 1;
            }
        }
    }

    pub fn remove(&mut self, metadata: &MetaDataList) {
        for filter in FilterType::ALL {
            let Some(facet) = self.counts.get_mut(&filter) else {
                continue;
            };
            for value in filter.values(metadata) {
                if let Some(count) = facet.get_mut(&value) {
                    *count -= 1;
                    if *count == 0 {
                        facet.remove(&value);
                    }
                }
            }
        }
        self.counts.retain(|_, facet| !facet.is_empty());
    }

    /// Add every count of `other` into this index
    pub fn import(&mut self, other: &FilterIndex) {
        for (filter, values) in &other.counts {
            let facet = self.counts.entry(*filter).or_default();
            for (value, count) in values {
                *facet.entry(value.clone()).or_insert(0) += count;
            }
        }
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of indexed entries carrying `value` for `filter`
    pub fn count(&self, filter: FilterType, value: &str) -> usize {
        self.counts
            .get(&filter)
            .and_then(|facet| facet.get(&value.to_uppercase()))
            .copied()
            .unwrap_or(0)
    }

    /// Known values for a facet, sorted
    pub fn values(&self, filter: FilterType) -> Vec<&str> {
        self.counts
            .get(&filter)
            .map(|facet| facet.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(genre: &str, favorite: bool) -> MetaDataList {
        let mut meta = MetaDataList::new();
        meta.set(keys::GENRE, genre);
        meta.set_bool(keys::FAVORITE, favorite);
        meta
    }

    #[test]
    fn test_add_and_count() {
        let mut index = FilterIndex::new();
        index.add(&game("Platform", true));
        index.add(&game("platform / action", false));
        index.add(&game("RPG", false));

        assert_eq!(index.count(FilterType::Genre, "platform"), 2);
        assert_eq!(index.count(FilterType::Genre, "RPG"), 1);
        assert_eq!(index.count(FilterType::Favorites, "true"), 1);
        assert_eq!(index.values(FilterType::Genre), vec!["PLATFORM", "RPG"]);
    }

    #[test]
    fn test_remove_restores_empty() {
        let mut index = FilterIndex::new();
        let meta = game("Shooter", true);
        index.add(&meta);
        index.remove(&meta);
        assert!(index.is_empty());
    }

    #[test]
    fn test_import() {
        let mut a = FilterIndex::new();
        a.add(&game("Puzzle", false));
        let mut b = FilterIndex::new();
        b.add(&game("Puzzle", true));
        b.add(&game("", true));

        a.import(&b);
        assert_eq!(a.count(FilterType::Genre, "Puzzle"), 2);
        assert_eq!(a.count(FilterType::Genre, "unknown"), 1);
        assert_eq!(a.count(FilterType::Favorites, "TRUE"), 2);

        a.reset();
        assert!(a.is_empty());
    }

    #[test]
    fn test_pubdev_same_company_counted_once() {
        let mut meta = MetaDataList::new();
        meta.set(keys::PUBLISHER, "Nintendo");
        meta.set(keys::DEVELOPER, "Nintendo");
        let mut index = FilterIndex::new();
        index.add(&meta);
        assert_eq!(index.count(FilterType::PubDev, "nintendo"), 1);
    }
}
