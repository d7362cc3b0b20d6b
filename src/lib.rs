//! Catalog of game unlockables: loads the bundled catalog, matches each
//! entry with an icon from the user's folder or the bundled assets, and
//! filters/sorts the result for display.

pub mod assets;
pub mod config;
pub mod error;
pub mod filter;
pub mod state;
pub mod taxonomy;
pub mod validate;

pub use assets::{AssetResolver, BundledAssets};
pub use config::Config;
pub use error::{CatalogError, Result};
pub use filter::{apply, DisplayItem, FilterCriteria, SortKey, UnlockableItem};
pub use state::{Catalog, CatalogRow, CatalogSource, Rarity, SqliteCatalog, UnlockableRecord, UnlockableType};
