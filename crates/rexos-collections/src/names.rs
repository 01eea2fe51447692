//! Collection name handling

/// Name used when sanitizing leaves nothing
pub const DEFAULT_COLLECTION_NAME: &str = "New Collection";

/// Keep letters, digits, whitespace and `()[]'-`, dropping everything else
///
/// Leading and trailing whitespace is trimmed.
pub fn sanitize_collection_name(raw: &str) -> String {
    let name: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || "()[]'-".contains(*c))
        .collect();
    let name = name.trim();

    if name.is_empty() {
        DEFAULT_COLLECTION_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// First of `name`, `name (1)`, `name (2)`, ... that `is_taken` rejects
pub fn unique_collection_name(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = name.to_string();
    let mut index = 1;

    while is_taken(&candidate) {
        candidate = format!("{} ({})", name, index);
        index += 1;
    }

    candidate
}

/// Strip `(...)` and `[...]` tags from a game name
pub fn remove_parenthesis(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut depth_paren = 0usize;
    let mut depth_bracket = 0usize;

    for c in name.chars() {
        match c {
            '(' => depth_paren += 1,
            ')' if depth_paren > 0 => depth_paren -= 1,
            '[' => depth_bracket += 1,
            ']' if depth_bracket > 0 => depth_bracket -= 1,
            _ if depth_paren == 0 && depth_bracket == 0 => result.push(c),
            _ => {}
        }
    }

    result.trim().to_string()
}
