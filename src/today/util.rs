// src/today/util.rs

use std::collections::{HashMap, HashSet};

/// First title that appears more than once, scanning left to right.
pub fn first_duplicate(items: &[String]) -> Option<&String> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().find(|item| !seen.insert(item.as_str()))
}

/// First title by which `proposed` fails to be a permutation of `current`,
/// compared as multisets via a frequency count. Checks `proposed` first, so a
/// title unknown to `current` is cited before a dropped one.
pub fn first_distinct<'a>(
    current: &'a [String],
    proposed: &'a [String],
) -> Option<&'a String> {
    let mut counts: HashMap<&str, i64> = HashMap::with_capacity(current.len());
    for title in current {
        *counts.entry(title.as_str()).or_insert(0) += 1;
    }
    for title in proposed {
        match counts.get_mut(title.as_str()) {
            Some(count) => *count -= 1,
            None => return Some(title),
        }
    }
    current
        .iter()
        .find(|title| counts.get(title.as_str()).copied().unwrap_or(0) != 0)
}
