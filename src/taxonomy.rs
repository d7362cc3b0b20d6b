//! Fixed enumerations offered to the user as filter and sort choices.
//!
//! Order matters: it is the order shown to the user, and for rarities
//! it is also the sort order.

use crate::filter::SortKey;
use crate::state::data::{Rarity, UnlockableType};

/// Categories that are not a specific character
pub const GENERIC_CATEGORIES: [&str; 3] = ["universal", "survivor", "killer"];

pub const TYPES: [UnlockableType; 5] = UnlockableType::ALL;

pub const RARITIES: [Rarity; 7] = Rarity::ALL;

pub const SORT_OPTIONS: [SortKey; 5] = SortKey::ALL;

/// Generic categories followed by every killer
pub fn categories(killers: &[String]) -> Vec<String> {
    GENERIC_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .chain(killers.iter().cloned())
        .collect()
}

/// "survivor" followed by every killer
pub fn characters(killers: &[String]) -> Vec<String> {
    std::iter::once("survivor".to_string())
        .chain(killers.iter().cloned())
        .collect()
}

pub fn type_labels() -> Vec<&'static str> {
    TYPES.iter().map(|t| t.as_str()).collect()
}

pub fn rarity_labels() -> Vec<&'static str> {
    RARITIES.iter().map(|r| r.as_str()).collect()
}

pub fn sort_labels() -> Vec<&'static str> {
    SORT_OPTIONS.iter().map(|s| s.label()).collect()
}
