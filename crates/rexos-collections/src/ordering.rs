//! System list ordering
//!
//! Two orders for the combined list of game systems and collections:
//! collections after systems ([`SystemOrdering::Split`]) or interleaved with
//! the automatic ones set apart at the end ([`SystemOrdering::Mixed`]).

use crate::entry::CollectionSystem;
use rexos_library::SystemData;
use std::cmp::Ordering;

/// System always sorted last among regular systems
pub const PINNED_SYSTEM: &str = "retropie";

/// Names kept at the end of the mixed order, in this order
pub const MIXED_SET_APART: [&str; 7] = [
    "RETROPIE",
    "COLLECTIONS",
    "ALL",
    "FAVORITE",
    "RECENT",
    "KIDGAME",
    "HIDDEN",
];

/// One slot in the displayed system list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub name: String,
    pub full_name: String,
    pub is_collection: bool,
}

impl DisplayEntry {
    pub fn library(system: &SystemData) -> Self {
        Self {
            name: system.name().to_string(),
            full_name: system.full_name().to_string(),
            is_collection: false,
        }
    }

    pub fn collection(system: &CollectionSystem) -> Self {
        Self {
            name: system.name().to_string(),
            full_name: system.full_name().to_string(),
            is_collection: true,
        }
    }
}

/// Order applied to the displayed system list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemOrdering {
    /// Systems first, then collections
    #[default]
    Split,
    /// Everything alphabetical, automatic collections set apart at the end
    Mixed,
}

impl SystemOrdering {
    pub fn from_settings(sort_with_systems: bool) -> Self {
        if sort_with_systems {
            SystemOrdering::Mixed
        } else {
            SystemOrdering::Split
        }
    }

    pub fn compare(&self, a: &DisplayEntry, b: &DisplayEntry) -> Ordering {
        match self {
            SystemOrdering::Split => split_system_sort(a, b),
            SystemOrdering::Mixed => mixed_system_sort(a, b),
        }
    }

    pub fn sort(&self, entries: &mut [DisplayEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

/// Regular systems alphabetically (pinned system last), then collections alphabetically
pub fn split_system_sort(a: &DisplayEntry, b: &DisplayEntry) -> Ordering {
    let name_a = a.name.to_uppercase();
    let name_b = b.name.to_uppercase();

    match (a.is_collection, b.is_collection) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let pinned = PINNED_SYSTEM.to_uppercase();
            match (name_a == pinned, name_b == pinned) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => name_a.cmp(&name_b),
            }
        }
        (true, true) => name_a.cmp(&name_b),
    }
}

/// Everything alphabetically, except set-apart names which go last in fixed order
pub fn mixed_system_sort(a: &DisplayEntry, b: &DisplayEntry) -> Ordering {
    let name_a = a.name.to_uppercase();
    let name_b = b.name.to_uppercase();
    let position = |name: &str| MIXED_SET_APART.iter().position(|apart| *apart == name);

    match (position(&name_a), position(&name_b)) {
        (Some(pos_a), Some(pos_b)) => pos_a.cmp(&pos_b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => name_a.cmp(&name_b),
    }
}
