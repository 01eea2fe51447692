//! Gamelist sort orders

use crate::metadata::{MetaDataList, keys};
use std::cmp::Ordering;

/// Sort order for gamelist entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortType {
    #[default]
    FilenameAscending,
    FilenameDescending,
    RatingAscending,
    RatingDescending,
    TimesPlayedAscending,
    TimesPlayedDescending,
    LastPlayedAscending,
    LastPlayedDescending,
}

impl SortType {
    pub const ALL: [SortType; 8] = [
        SortType::FilenameAscending,
        SortType::FilenameDescending,
        SortType::RatingAscending,
        SortType::RatingDescending,
        SortType::TimesPlayedAscending,
        SortType::TimesPlayedDescending,
        SortType::LastPlayedAscending,
        SortType::LastPlayedDescending,
    ];

    /// Human readable form, e.g. `"filename, ascending"`
    pub fn description(&self) -> &'static str {
        match self {
            SortType::FilenameAscending => "filename, ascending",
            SortType::FilenameDescending => "filename, descending",
            SortType::RatingAscending => "rating, ascending",
            SortType::RatingDescending => "rating, descending",
            SortType::TimesPlayedAscending => "times played, ascending",
            SortType::TimesPlayedDescending => "times played, descending",
            SortType::LastPlayedAscending => "last played, ascending",
            SortType::LastPlayedDescending => "last played, descending",
        }
    }

    /// Parse a description; unknown strings fall back to filename ascending
    pub fn from_description(description: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|sort| sort.description() == description.trim())
            .unwrap_or_else(|| {
                tracing::debug!("Unknown sort type '{}', using filename", description);
                SortType::FilenameAscending
            })
    }

    pub fn is_ascending(&self) -> bool {
        matches!(
            self,
            SortType::FilenameAscending
                | SortType::RatingAscending
                | SortType::TimesPlayedAscending
                | SortType::LastPlayedAscending
        )
    }

    /// Compare two entries by their metadata
    pub fn compare(&self, a: &MetaDataList, b: &MetaDataList) -> Ordering {
        let ordering = match self {
            SortType::FilenameAscending | SortType::FilenameDescending => a
                .get(keys::NAME)
                .to_lowercase()
                .cmp(&b.get(keys::NAME).to_lowercase()),
            SortType::RatingAscending | SortType::RatingDescending => a
                .get_float(keys::RATING)
                .total_cmp(&b.get_float(keys::RATING)),
            SortType::TimesPlayedAscending | SortType::TimesPlayedDescending => a
                .get_int(keys::PLAY_COUNT)
                .cmp(&b.get_int(keys::PLAY_COUNT)),
            // Timestamps are ISO formatted, string order is chronological
            SortType::LastPlayedAscending | SortType::LastPlayedDescending => {
                a.get(keys::LAST_PLAYED).cmp(b.get(keys::LAST_PLAYED))
            }
        };

        if self.is_ascending() {
            ordering
        } else {
            ordering.reverse()
        }
    }
}
