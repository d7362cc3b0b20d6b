use std::num::ParseIntError;

use crate::state::data::UnlockableRecord;

/// Something shown to the user that wraps exactly one unlockable.
///
/// The filter pipeline reorders and annotates these without replacing them.
pub trait DisplayItem {
    fn unlockable(&self) -> &UnlockableRecord;

    /// The (tier, subtier) pair entered for this item
    fn tiers(&self) -> Result<(i64, i64), ParseIntError>;
}

/// Default display item: a record plus the tier fields as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockableItem {
    pub record: UnlockableRecord,
    pub tier: String,
    pub subtier: String,
}

impl UnlockableItem {
    pub fn new(record: UnlockableRecord) -> Self {
        Self {
            record,
            tier: "0".to_string(),
            subtier: "0".to_string(),
        }
    }

    pub fn with_tiers(mut self, tier: impl Into<String>, subtier: impl Into<String>) -> Self {
        self.tier = tier.into();
        self.subtier = subtier.into();
        self
    }
}

impl DisplayItem for UnlockableItem {
    fn unlockable(&self) -> &UnlockableRecord {
        &self.record
    }

    fn tiers(&self) -> Result<(i64, i64), ParseIntError> {
        Ok((self.tier.trim().parse()?, self.subtier.trim().parse()?))
    }
}

impl<T: DisplayItem + ?Sized> DisplayItem for &T {
    fn unlockable(&self) -> &UnlockableRecord {
        (**self).unlockable()
    }

    fn tiers(&self) -> Result<(i64, i64), ParseIntError> {
        (**self).tiers()
    }
}
