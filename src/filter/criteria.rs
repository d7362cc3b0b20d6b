use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::state::data::{Rarity, UnlockableRecord, UnlockableType};

/// Label shown for the default ordering
pub const DEFAULT_SORT_LABEL: &str = "default (usually does the job)";

/// Ordering applied before filtering
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep the order the items were given in
    Default,
    Name,
    /// Sorts by category
    Character,
    Rarity,
    Type,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Default,
        SortKey::Name,
        SortKey::Character,
        SortKey::Rarity,
        SortKey::Type,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Default => DEFAULT_SORT_LABEL,
            SortKey::Name => "name",
            SortKey::Character => "character",
            SortKey::Rarity => "rarity",
            SortKey::Type => "type",
        }
    }

    /// Comparison for this key; `None` means the order is left alone
    pub fn comparator(self) -> Option<Comparator> {
        match self {
            SortKey::Default => None,
            SortKey::Name => Some(by_name),
            SortKey::Character => Some(by_category),
            SortKey::Rarity => Some(by_rarity),
            SortKey::Type => Some(by_type),
        }
    }
}

pub type Comparator = fn(&UnlockableRecord, &UnlockableRecord) -> Ordering;

fn by_name(a: &UnlockableRecord, b: &UnlockableRecord) -> Ordering {
    a.name.cmp(&b.name)
}

fn by_category(a: &UnlockableRecord, b: &UnlockableRecord) -> Ordering {
    a.category.cmp(&b.category)
}

fn by_rarity(a: &UnlockableRecord, b: &UnlockableRecord) -> Ordering {
    a.rarity.rank().cmp(&b.rarity.rank())
}

// Types compare by label, so "add-on" < "item" < "offering" < "perk" < "universal"
fn by_type(a: &UnlockableRecord, b: &UnlockableRecord) -> Ordering {
    a.kind.as_str().cmp(b.kind.as_str())
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | DEFAULT_SORT_LABEL => Ok(SortKey::Default),
            "name" => Ok(SortKey::Name),
            "character" => Ok(SortKey::Character),
            "rarity" => Ok(SortKey::Rarity),
            "type" => Ok(SortKey::Type),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// What the user asked to see.
///
/// Empty name or empty sets disable the matching predicate.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub name: String,
    pub categories: BTreeSet<String>,
    pub rarities: BTreeSet<Rarity>,
    pub types: BTreeSet<UnlockableType>,
    pub sort: Option<SortKey>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarities.insert(rarity);
        self
    }

    pub fn with_type(mut self, kind: UnlockableType) -> Self {
        self.types.insert(kind);
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    /// True when no predicate is active
    pub fn is_unfiltered(&self) -> bool {
        self.name.is_empty()
            && self.categories.is_empty()
            && self.rarities.is_empty()
            && self.types.is_empty()
    }
}
