//! Sort-then-filter pass over the displayed unlockables
//!
//! Items are never dropped: each one comes back with a flag saying whether
//! it passed every active filter, so the caller can hide or dim it while
//! keeping the same widgets.

use super::criteria::FilterCriteria;
use super::item::DisplayItem;
use crate::state::data::UnlockableRecord;

/// Order `items` by `criteria.sort` (stable), then flag each one.
///
/// Every input item appears exactly once in the output.
pub fn apply<'a, T: DisplayItem>(items: &'a [T], criteria: &FilterCriteria) -> Vec<(&'a T, bool)> {
    let mut sorted: Vec<&'a T> = items.iter().collect();

    if let Some(compare) = criteria.sort.and_then(|key| key.comparator()) {
        // sort_by is stable, equal keys keep their input order
        sorted.sort_by(|a, b| compare(a.unlockable(), b.unlockable()));
    }

    let name = criteria.name.to_lowercase();

    sorted
        .into_iter()
        .map(|item| {
            let included = passes(item.unlockable(), &name, criteria);
            (item, included)
        })
        .collect()
}

/// Items of `apply` that passed, in display order
pub fn visible<'a, T: DisplayItem>(items: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    apply(items, criteria)
        .into_iter()
        .filter_map(|(item, included)| included.then_some(item))
        .collect()
}

fn passes(record: &UnlockableRecord, lowered_name: &str, criteria: &FilterCriteria) -> bool {
    if !lowered_name.is_empty() && !record.name.to_lowercase().contains(lowered_name) {
        return false;
    }

    if !criteria.categories.is_empty() && !criteria.categories.contains(&record.category) {
        return false;
    }

    if !criteria.rarities.is_empty() && !criteria.rarities.contains(&record.rarity) {
        return false;
    }

    if !criteria.types.is_empty() && !criteria.types.contains(&record.kind) {
        return false;
    }

    true
}
