//! Normalisation helpers shared by the resource mappers

use std::collections::{BTreeMap, BTreeSet};

/// Values that differ only in case are the same
pub fn suppress_case(old: &str, new: &str) -> bool {
    old.to_lowercase() == new.to_lowercase()
}

/// Values that differ only in surrounding whitespace are the same
pub fn suppress_spaces(old: &str, new: &str) -> bool {
    old.trim() == new.trim()
}

/// Values that parse to the same JSON document are the same
pub fn suppress_json(old: &str, new: &str) -> bool {
    match (
        serde_json::from_str::<serde_json::Value>(old),
        serde_json::from_str::<serde_json::Value>(new),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => old == new,
    }
}

pub fn trim_spaces(value: &str) -> String {
    value.trim().to_string()
}

/// Trim every value of a map
pub fn trim_spaces_map(map: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    map.iter()
        .map(|(key, value)| (key.clone(), trim_spaces(value)))
        .collect()
}

/// Collect a set into the list the API expects
pub fn set_to_vec(set: &BTreeSet<String>) -> Vec<String> {
    set.iter().cloned().collect()
}

/// Collect an API list into an unordered set
pub fn vec_to_set(items: &[String]) -> BTreeSet<String> {
    items.iter().cloned().collect()
}

/// Empty strings mean "not set"
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
