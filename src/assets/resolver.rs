//! Catalog row → image resolution
//!
//! Each row is matched against the user's folder first and the bundled
//! assets second. Rows with no image anywhere are logged and dropped.

use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info};

use super::bundled::{normalize_path, BundledAssets};
use super::index::{AssetIndex, IndexedFile};
use crate::error::{CatalogError, Result};
use crate::state::data::{CatalogRow, UnlockableRecord};

/// How a collision rule treats directories containing its marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRule {
    /// Skip files whose directory contains the marker
    Forbidden,
    /// Skip files whose directory does not contain the marker
    Required,
}

/// Disambiguates an icon file name shared by several categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionRule {
    pub id: &'static str,
    pub category: &'static str,
    pub marker: &'static str,
    pub rule: MarkerRule,
}

impl CollisionRule {
    fn applies_to(&self, row: &CatalogRow) -> bool {
        self.id == row.id && self.category == row.category
    }

    fn excludes(&self, file: &IndexedFile) -> bool {
        let has_marker = file.dir_text().contains(self.marker);
        match self.rule {
            MarkerRule::Forbidden => has_marker,
            MarkerRule::Required => !has_marker,
        }
    }
}

/// Bubba and the Hillbilly share the speed limiter add-on icon; only the
/// Xipre pack folder holds the Hillbilly's version.
pub const DEFAULT_COLLISION_RULES: &[CollisionRule] = &[
    CollisionRule {
        id: "iconAddon_speedLimiter",
        category: "bubba",
        marker: "Xipre",
        rule: MarkerRule::Forbidden,
    },
    CollisionRule {
        id: "iconAddon_speedLimiter",
        category: "hillbilly",
        marker: "Xipre",
        rule: MarkerRule::Required,
    },
];

/// Resolves catalog rows to image files
#[derive(Debug, Clone)]
pub struct AssetResolver {
    bundled: BundledAssets,
    rules: Vec<CollisionRule>,
}

impl AssetResolver {
    pub fn new(bundled: BundledAssets) -> Self {
        Self::with_rules(bundled, DEFAULT_COLLISION_RULES.to_vec())
    }

    pub fn with_rules(bundled: BundledAssets, rules: Vec<CollisionRule>) -> Self {
        Self { bundled, rules }
    }

    pub fn bundled(&self) -> &BundledAssets {
        &self.bundled
    }

    /// Resolve every row against `root`, then the bundled assets.
    ///
    /// The folder is walked once per call. Rows without an image are
    /// skipped; a row missing its id or category aborts the whole pass.
    pub fn resolve(&self, root: &Path, rows: &[CatalogRow]) -> Result<Vec<UnlockableRecord>> {
        let index = AssetIndex::scan(root);
        let records = self.resolve_with_index(&index, rows)?;

        info!(
            resolved = records.len(),
            skipped = rows.len() - records.len(),
            "resolved unlockable images"
        );

        Ok(records)
    }

    /// Resolve against an index that has already been built
    pub fn resolve_with_index(
        &self,
        index: &AssetIndex,
        rows: &[CatalogRow],
    ) -> Result<Vec<UnlockableRecord>> {
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            check_row(row)?;

            let image_path = match self.find_in_folder(index, row) {
                Some(path) => path,
                None => match self.find_bundled(row) {
                    Some(path) => path,
                    None => {
                        debug!(
                            id = %row.id,
                            category = %row.category,
                            "no source found for unlockable"
                        );
                        continue;
                    }
                },
            };

            records.push(UnlockableRecord::from_row(row, normalize_path(&image_path)?));
        }

        Ok(records)
    }

    /// Run `resolve` on the blocking thread pool.
    ///
    /// The walk can take a while on large folders, so interactive callers
    /// should use this instead of blocking their own thread.
    pub async fn resolve_in_background(
        &self,
        root: PathBuf,
        rows: Vec<CatalogRow>,
    ) -> Result<Vec<UnlockableRecord>> {
        let resolver = self.clone();
        task::spawn_blocking(move || resolver.resolve(&root, &rows))
            .await
            .map_err(|e| CatalogError::Task(format!("resolver join error: {}", e)))?
    }

    fn find_in_folder(&self, index: &AssetIndex, row: &CatalogRow) -> Option<PathBuf> {
        let rules: Vec<&CollisionRule> = self
            .rules
            .iter()
            .filter(|rule| rule.applies_to(row))
            .collect();

        index
            .candidates(&row.id)
            .find(|file| !rules.iter().any(|rule| rule.excludes(file)))
            .map(IndexedFile::path)
    }

    fn find_bundled(&self, row: &CatalogRow) -> Option<PathBuf> {
        let asset_path = self.bundled.asset_file(&row.category, &row.id);
        asset_path.is_file().then_some(asset_path)
    }
}

fn check_row(row: &CatalogRow) -> Result<()> {
    if row.id.is_empty() {
        return Err(CatalogError::malformed(
            format!("'{}'", row.name),
            "missing id",
        ));
    }
    if row.category.is_empty() {
        return Err(CatalogError::malformed(row.id.clone(), "missing category"));
    }
    Ok(())
}
