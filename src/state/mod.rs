/// Catalog state module
///
/// This module handles:
/// - Reading the bundled catalog database (library.rs)
/// - Shared data structures (data.rs)

pub mod data;
pub mod library;

pub use data::{CatalogRow, Rarity, UnlockableRecord, UnlockableType};
pub use library::{Catalog, CatalogSnapshot, CatalogSource, LoadStatus, SqliteCatalog};
