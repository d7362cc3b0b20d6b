//! Shared data structures for the catalog
//!
//! These structs represent the data model that flows between
//! the catalog store, the asset resolver and the filter pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Rarity of an unlockable, declared from least to most special.
///
/// The declaration order is the sort order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    UltraRare,
    Event,
    Varies,
}

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::VeryRare,
        Rarity::UltraRare,
        Rarity::Event,
        Rarity::Varies,
    ];

    /// Rank used when sorting: common = 1 ... varies = 7
    pub fn rank(self) -> u8 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::VeryRare => 4,
            Rarity::UltraRare => 5,
            Rarity::Event => 6,
            Rarity::Varies => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::VeryRare => "very_rare",
            Rarity::UltraRare => "ultra_rare",
            Rarity::Event => "event",
            Rarity::Varies => "varies",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::ALL
            .into_iter()
            .find(|rarity| rarity.as_str() == s)
            .ok_or_else(|| format!("unknown rarity '{}'", s))
    }
}

/// Kind of unlockable
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnlockableType {
    #[serde(rename = "add-on")]
    AddOn,
    #[serde(rename = "item")]
    Item,
    #[serde(rename = "offering")]
    Offering,
    #[serde(rename = "perk")]
    Perk,
    #[serde(rename = "universal")]
    Universal,
}

impl UnlockableType {
    pub const ALL: [UnlockableType; 5] = [
        UnlockableType::AddOn,
        UnlockableType::Item,
        UnlockableType::Offering,
        UnlockableType::Perk,
        UnlockableType::Universal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UnlockableType::AddOn => "add-on",
            UnlockableType::Item => "item",
            UnlockableType::Offering => "offering",
            UnlockableType::Perk => "perk",
            UnlockableType::Universal => "universal",
        }
    }
}

impl fmt::Display for UnlockableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnlockableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnlockableType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown unlockable type '{}'", s))
    }
}

/// A single row of the `unlockables` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    /// Icon identifier, matched as a substring of image file names
    pub id: String,
    pub name: String,
    /// Character slug or one of universal/survivor/killer
    pub category: String,
    pub rarity: Rarity,
    pub notes: String,
    pub kind: UnlockableType,
}

impl CatalogRow {
    pub fn unique_id(&self) -> String {
        unique_id(&self.id, &self.category)
    }
}

/// Catalog id qualified by category
pub fn unique_id(id: &str, category: &str) -> String {
    format!("{}_{}", id, category)
}

/// A catalog row paired with the image that represents it.
///
/// Only the asset resolver builds these; they are recreated on every pass.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UnlockableRecord {
    pub unique_id: String,
    pub id: String,
    pub name: String,
    pub category: String,
    pub rarity: Rarity,
    pub notes: String,
    #[serde(rename = "type")]
    pub kind: UnlockableType,
    /// Absolute, normalized path to the image
    pub image_path: PathBuf,
}

impl UnlockableRecord {
    pub(crate) fn from_row(row: &CatalogRow, image_path: PathBuf) -> Self {
        Self {
            unique_id: row.unique_id(),
            id: row.id.clone(),
            name: row.name.clone(),
            category: row.category.clone(),
            rarity: row.rarity,
            notes: row.notes.clone(),
            kind: row.kind,
            image_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_rank_follows_declaration_order() {
        let ranks: Vec<u8> = Rarity::ALL.iter().map(|r| r.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(Rarity::Common < Rarity::Varies);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("very_rare".parse::<Rarity>(), Ok(Rarity::VeryRare));
        assert_eq!("add-on".parse::<UnlockableType>(), Ok(UnlockableType::AddOn));
        assert!("legendary".parse::<Rarity>().is_err());
        assert!("addon".parse::<UnlockableType>().is_err());
    }

    #[test]
    fn test_unique_id_is_category_qualified() {
        let row = CatalogRow {
            id: "iconAddon_speedLimiter".to_string(),
            name: "Speed Limiter".to_string(),
            category: "bubba".to_string(),
            rarity: Rarity::Uncommon,
            notes: String::new(),
            kind: UnlockableType::AddOn,
        };
        assert_eq!(row.unique_id(), "iconAddon_speedLimiter_bubba");
    }
}
