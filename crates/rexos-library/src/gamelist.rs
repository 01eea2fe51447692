//! gamelist.xml import (EmulationStation compatible)

use crate::metadata::{MetaDataList, keys};
use crate::system::SystemData;

/// Parse gamelist.xml into `(path, metadata)` pairs
///
/// Only the flat one-tag-per-line layout EmulationStation writes is
/// understood; unknown tags are ignored.
pub fn parse_gamelist_xml(xml: &str) -> Vec<(String, MetaDataList)> {
    let mut games = Vec::new();

    let mut current_path = String::new();
    let mut current_metadata = MetaDataList::new();
    let mut in_game = false;

    for line in xml.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("<game>") || trimmed.starts_with("<game ") {
            in_game = true;
            current_metadata = MetaDataList::new();
        } else if trimmed.starts_with("</game>") {
            if in_game && !current_path.is_empty() {
                games.push((current_path.clone(), current_metadata.clone()));
            }
            in_game = false;
            current_path.clear();
        } else if in_game {
            if let Some(value) = extract_xml_value(trimmed, "path") {
                current_path = value;
                continue;
            }
            for key in keys::ALL {
                if let Some(value) = extract_xml_value(trimmed, key) {
                    current_metadata.set(key, unescape(&value));
                    break;
                }
            }
        }
    }

    games
}

/// Apply parsed gamelist metadata onto a scanned system
///
/// Relative `./` paths resolve against the system start path. Returns the
/// number of entries that matched a scanned game.
pub fn apply_gamelist(system: &mut SystemData, entries: Vec<(String, MetaDataList)>) -> usize {
    let mut applied = 0;

    for (path, metadata) in entries {
        let full_path = match path.strip_prefix("./") {
            Some(relative) => system.start_path().join(relative).to_string_lossy().to_string(),
            None => path,
        };

        match system.find_mut(&full_path) {
            Some(file) => {
                // gamelist values win over scanner defaults
                let mut merged = metadata;
                merged.merge(&file.metadata);
                file.metadata = merged;
                applied += 1;
            }
            None => {
                tracing::debug!("gamelist entry {} has no matching file", full_path);
            }
        }
    }

    applied
}

/// Extract value from simple XML tag
fn extract_xml_value(line: &str, tag: &str) -> Option<String> {
    let open_tag = format!("<{}>", tag);
    let close_tag = format!("</{}>", tag);

    if line.starts_with(&open_tag) && line.ends_with(&close_tag) {
        let start = open_tag.len();
        let end = line.len() - close_tag.len();
        if end > start {
            return Some(line[start..end].to_string());
        }
    }

    None
}

fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
