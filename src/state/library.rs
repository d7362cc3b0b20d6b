use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, Row};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::data::{unique_id, CatalogRow, Rarity, UnlockableType};
use crate::error::{CatalogError, Result};
use crate::filter::DisplayItem;
use crate::taxonomy;

/// Everything read from the catalog store in one load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub unlockables: Vec<CatalogRow>,
    /// Character slugs, in store order
    pub characters: Vec<String>,
}

/// A read-only origin of catalog rows.
///
/// Implementations must be idempotent: every call reads the whole store
/// again and keeps nothing open afterwards.
pub trait CatalogSource {
    fn load(&self) -> Result<CatalogSnapshot>;
}

/// The bundled SQLite catalog.
///
/// Expected tables:
/// - `unlockables`: id, name, category, rarity, notes, type (positional)
/// - `killers`: character slug in the first column
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    db_path: PathBuf,
}

impl SqliteCatalog {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Get the path to the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn unavailable(&self, source: rusqlite::Error) -> CatalogError {
        CatalogError::SourceUnavailable {
            path: self.db_path.clone(),
            source,
        }
    }

    fn read_unlockables(&self, conn: &Connection) -> Result<Vec<CatalogRow>> {
        let mut stmt = conn
            .prepare("SELECT * FROM unlockables")
            .map_err(|e| self.unavailable(e))?;
        let mut rows = stmt.query([]).map_err(|e| self.unavailable(e))?;

        let mut unlockables = Vec::new();
        let mut index = 0usize;
        while let Some(row) = rows.next().map_err(|e| self.unavailable(e))? {
            unlockables.push(parse_unlockable_row(row, index)?);
            index += 1;
        }

        Ok(unlockables)
    }

    fn read_characters(&self, conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn
            .prepare("SELECT * FROM killers")
            .map_err(|e| self.unavailable(e))?;
        let mut rows = stmt.query([]).map_err(|e| self.unavailable(e))?;

        let mut characters = Vec::new();
        let mut index = 0usize;
        while let Some(row) = rows.next().map_err(|e| self.unavailable(e))? {
            let label = format!("killers#{}", index);
            characters.push(required_text(row, 0, "character", &label)?);
            index += 1;
        }

        Ok(characters)
    }
}

impl CatalogSource for SqliteCatalog {
    fn load(&self) -> Result<CatalogSnapshot> {
        // Read-only: never create the file if it is missing
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.unavailable(e))?;
        debug!(path = %self.db_path.display(), "connected to catalog database");

        let unlockables = self.read_unlockables(&conn)?;
        let characters = self.read_characters(&conn)?;

        conn.close().map_err(|(_, e)| self.unavailable(e))?;

        Ok(CatalogSnapshot {
            unlockables,
            characters,
        })
    }
}

fn required_text(row: &Row<'_>, column: usize, field: &str, label: &str) -> Result<String> {
    let value: Option<String> = row
        .get(column)
        .map_err(|e| CatalogError::malformed(label, format!("{} column unreadable: {}", field, e)))?;
    value.ok_or_else(|| CatalogError::malformed(label, format!("missing {}", field)))
}

fn parse_unlockable_row(row: &Row<'_>, index: usize) -> Result<CatalogRow> {
    let label = format!("unlockables#{}", index);

    let id = required_text(row, 0, "id", &label)?;
    let label = format!("{} ({})", label, id);
    let name = required_text(row, 1, "name", &label)?;
    let category = required_text(row, 2, "category", &label)?;
    let rarity = required_text(row, 3, "rarity", &label)?
        .parse::<Rarity>()
        .map_err(|e: String| CatalogError::malformed(&label, e))?;
    // Notes are free text and frequently empty
    let notes: Option<String> = row
        .get(4)
        .map_err(|e| CatalogError::malformed(&label, format!("notes column unreadable: {}", e)))?;
    let kind = required_text(row, 5, "type", &label)?
        .parse::<UnlockableType>()
        .map_err(|e: String| CatalogError::malformed(&label, e))?;

    Ok(CatalogRow {
        id,
        name,
        category,
        rarity,
        notes: notes.unwrap_or_default(),
        kind,
    })
}

/// Outcome of the most recent load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { at: DateTime<Utc> },
    /// The store could not be opened or queried; the catalog is empty
    Unavailable { reason: String },
}

/// The catalog handle created once at startup and shared by reference.
///
/// Holds the rows of the last successful load. An unavailable store
/// yields an empty catalog instead of an error, and `status()` says so.
#[derive(Debug, Clone)]
pub struct Catalog {
    snapshot: CatalogSnapshot,
    status: LoadStatus,
}

impl Catalog {
    /// Load the catalog from `source`.
    ///
    /// `SourceUnavailable` is recovered into an empty catalog;
    /// `MalformedRecord` is returned to the caller.
    pub fn open(source: &dyn CatalogSource) -> Result<Self> {
        let (snapshot, status) = Self::load_from(source)?;
        Ok(Catalog { snapshot, status })
    }

    /// Build a catalog from rows already in memory
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Catalog {
            snapshot,
            status: LoadStatus::Loaded { at: Utc::now() },
        }
    }

    /// Read the store again, replacing the cached rows.
    ///
    /// On a malformed record the previous rows are kept.
    pub fn reload(&mut self, source: &dyn CatalogSource) -> Result<()> {
        let (snapshot, status) = Self::load_from(source)?;
        self.snapshot = snapshot;
        self.status = status;
        Ok(())
    }

    fn load_from(source: &dyn CatalogSource) -> Result<(CatalogSnapshot, LoadStatus)> {
        match source.load() {
            Ok(snapshot) => {
                info!(
                    unlockables = snapshot.unlockables.len(),
                    characters = snapshot.characters.len(),
                    "catalog loaded"
                );
                Ok((snapshot, LoadStatus::Loaded { at: Utc::now() }))
            }
            Err(err @ CatalogError::SourceUnavailable { .. }) => {
                warn!(error = %err, "continuing with an empty catalog");
                Ok((
                    CatalogSnapshot::default(),
                    LoadStatus::Unavailable {
                        reason: err.to_string(),
                    },
                ))
            }
            Err(err) => Err(err),
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_available(&self) -> bool {
        matches!(self.status, LoadStatus::Loaded { .. })
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.snapshot.unlockables
    }

    /// Character slugs from the store, without the "survivor" pseudo-character
    pub fn killers(&self) -> &[String] {
        &self.snapshot.characters
    }

    pub fn categories(&self) -> Vec<String> {
        taxonomy::categories(&self.snapshot.characters)
    }

    pub fn characters(&self) -> Vec<String> {
        taxonomy::characters(&self.snapshot.characters)
    }

    /// Stable re-sort of `items` into catalog row order.
    ///
    /// Items whose record is not in the catalog keep their relative order
    /// and go last.
    pub fn restore_default_order<T: DisplayItem>(&self, items: &mut [T]) {
        let positions: HashMap<String, usize> = self
            .snapshot
            .unlockables
            .iter()
            .enumerate()
            .map(|(position, row)| (unique_id(&row.id, &row.category), position))
            .collect();

        items.sort_by_key(|item| {
            positions
                .get(&item.unlockable().unique_id)
                .copied()
                .unwrap_or(usize::MAX)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::UnlockableItem;
    use crate::state::data::UnlockableRecord;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_db(dir: &TempDir, rows: &[(&str, &str, &str, &str, Option<&str>, &str)]) -> PathBuf {
        let path = dir.path().join("unlockables.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE unlockables (id TEXT, name TEXT, category TEXT, rarity TEXT, notes TEXT, type TEXT);
             CREATE TABLE killers (name TEXT);
             INSERT INTO killers VALUES ('bubba'), ('hillbilly');",
        )
        .unwrap();
        for (id, name, category, rarity, notes, kind) in rows {
            conn.execute(
                "INSERT INTO unlockables VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, name, category, rarity, notes, kind],
            )
            .unwrap();
        }
        path
    }

    enum FakeSource {
        Rows(CatalogSnapshot),
        Unavailable,
        Malformed,
    }

    impl CatalogSource for FakeSource {
        fn load(&self) -> Result<CatalogSnapshot> {
            match self {
                FakeSource::Rows(snapshot) => Ok(snapshot.clone()),
                FakeSource::Unavailable => Err(CatalogError::SourceUnavailable {
                    path: PathBuf::from("fake.db"),
                    source: rusqlite::Error::InvalidQuery,
                }),
                FakeSource::Malformed => Err(CatalogError::malformed("unlockables#0", "missing id")),
            }
        }
    }

    fn row(id: &str, category: &str) -> CatalogRow {
        CatalogRow {
            id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            rarity: Rarity::Common,
            notes: String::new(),
            kind: UnlockableType::AddOn,
        }
    }

    fn item(id: &str, category: &str) -> UnlockableItem {
        UnlockableItem::new(UnlockableRecord::from_row(&row(id, category), PathBuf::from("/x.png")))
    }

    #[test]
    fn test_sqlite_load_reads_both_tables() {
        let dir = TempDir::new().unwrap();
        let path = create_db(
            &dir,
            &[
                ("iconAddon_speedLimiter", "Speed Limiter", "bubba", "uncommon", None, "add-on"),
                ("iconPerks_bond", "Bond", "survivor", "very_rare", Some("teachable"), "perk"),
            ],
        );

        let snapshot = SqliteCatalog::new(&path).load().unwrap();

        assert_eq!(snapshot.characters, vec!["bubba".to_string(), "hillbilly".to_string()]);
        assert_eq!(snapshot.unlockables.len(), 2);
        assert_eq!(snapshot.unlockables[0].notes, "");
        assert_eq!(snapshot.unlockables[1].rarity, Rarity::VeryRare);
        assert_eq!(snapshot.unlockables[1].kind, UnlockableType::Perk);
        assert_eq!(snapshot.unlockables[1].notes, "teachable");
    }

    #[test]
    fn test_sqlite_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, &[("iconPerks_bond", "Bond", "survivor", "rare", None, "perk")]);
        let source = SqliteCatalog::new(&path);

        assert_eq!(source.load().unwrap(), source.load().unwrap());
    }

    #[test]
    fn test_missing_database_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = SqliteCatalog::new(dir.path().join("missing.db"));

        let err = source.load().unwrap_err();
        assert!(matches!(err, CatalogError::SourceUnavailable { .. }));
        assert!(!dir.path().join("missing.db").exists());
    }

    #[test]
    fn test_null_field_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unlockables.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE unlockables (id TEXT, name TEXT, category TEXT, rarity TEXT, notes TEXT, type TEXT);
             CREATE TABLE killers (name TEXT);
             INSERT INTO unlockables VALUES ('iconPerks_bond', NULL, 'survivor', 'rare', NULL, 'perk');",
        )
        .unwrap();
        drop(conn);

        let err = SqliteCatalog::new(&path).load().unwrap_err();
        match err {
            CatalogError::MalformedRecord { row, reason } => {
                assert!(row.contains("iconPerks_bond"));
                assert!(reason.contains("name"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_rarity_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, &[("iconPerks_bond", "Bond", "survivor", "legendary", None, "perk")]);

        let err = SqliteCatalog::new(&path).load().unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { .. }));
    }

    #[test]
    fn test_open_recovers_from_unavailable_store() {
        let source = FakeSource::Unavailable;

        let catalog = Catalog::open(&source).unwrap();

        assert!(catalog.rows().is_empty());
        assert!(!catalog.is_available());
        assert!(matches!(catalog.status(), LoadStatus::Unavailable { .. }));
        // Taxonomy still works on an empty catalog
        assert_eq!(catalog.characters(), vec!["survivor".to_string()]);
    }

    #[test]
    fn test_open_propagates_malformed_record() {
        assert!(Catalog::open(&FakeSource::Malformed).is_err());
    }

    #[test]
    fn test_empty_store_is_available() {
        let source = FakeSource::Rows(CatalogSnapshot::default());
        let catalog = Catalog::open(&source).unwrap();

        assert!(catalog.rows().is_empty());
        assert!(catalog.is_available());
    }

    #[test]
    fn test_reload_replaces_rows() {
        let mut catalog = Catalog::open(&FakeSource::Rows(CatalogSnapshot::default())).unwrap();
        let snapshot = CatalogSnapshot {
            unlockables: vec![row("a", "bubba")],
            characters: vec!["bubba".to_string()],
        };

        catalog.reload(&FakeSource::Rows(snapshot)).unwrap();

        assert_eq!(catalog.rows().len(), 1);
        assert_eq!(
            catalog.categories(),
            vec!["universal", "survivor", "killer", "bubba"]
        );
    }

    #[test]
    fn test_restore_default_order() {
        let catalog = Catalog::from_snapshot(CatalogSnapshot {
            unlockables: vec![row("a", "survivor"), row("b", "survivor"), row("c", "bubba")],
            characters: vec!["bubba".to_string()],
        });
        let mut items = vec![
            item("zzz", "survivor"),
            item("c", "bubba"),
            item("a", "survivor"),
            item("b", "survivor"),
        ];

        catalog.restore_default_order(&mut items);

        let order: Vec<&str> = items.iter().map(|i| i.unlockable().id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c", "zzz"]);
    }
}
