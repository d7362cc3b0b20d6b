//! Filename index of a folder tree
//!
//! The whole tree is walked once per resolution pass; every catalog row is
//! then matched against the in-memory list instead of re-walking the disk.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One file found during the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFile {
    /// Directory containing the file
    pub dir: PathBuf,
    pub file_name: String,
}

impl IndexedFile {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Directory path as text, used for collision markers
    pub fn dir_text(&self) -> String {
        self.dir.to_string_lossy().into_owned()
    }
}

/// Every file under a root folder, in walk order
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    files: Vec<IndexedFile>,
}

impl AssetIndex {
    /// Recursively list every file under `root`.
    ///
    /// Symlinks are not followed and unreadable entries are skipped;
    /// a missing root produces an empty index.
    pub fn scan(root: &Path) -> Self {
        if !root.is_dir() {
            debug!(root = %root.display(), "unlockables folder is not a directory, nothing to scan");
            return Self::default();
        }

        let files: Vec<IndexedFile> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let dir = entry.path().parent()?.to_path_buf();
                let file_name = entry.file_name().to_string_lossy().into_owned();
                Some(IndexedFile { dir, file_name })
            })
            .collect();

        debug!(root = %root.display(), files = files.len(), "scanned unlockables folder");

        Self { files }
    }

    pub fn from_files(files: Vec<IndexedFile>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[IndexedFile] {
        &self.files
    }

    /// Files whose name contains `id`, in walk order
    pub fn candidates<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a IndexedFile> + 'a {
        self.files.iter().filter(move |file| file.file_name.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_lists_nested_files_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("pack/addons")).unwrap();
        fs::write(dir.path().join("top.png"), b"").unwrap();
        fs::write(dir.path().join("pack/addons/iconAddon_rope.png"), b"").unwrap();

        let index = AssetIndex::scan(dir.path());

        assert_eq!(index.len(), 2);
        let nested = index.candidates("iconAddon_rope").next().unwrap();
        assert_eq!(nested.dir, dir.path().join("pack/addons"));
        assert_eq!(nested.path(), dir.path().join("pack/addons/iconAddon_rope.png"));
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let index = AssetIndex::scan(&dir.path().join("nope"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_candidates_match_substrings() {
        let index = AssetIndex::from_files(vec![
            IndexedFile {
                dir: PathBuf::from("/a"),
                file_name: "T_UI_iconPerks_bond.png".to_string(),
            },
            IndexedFile {
                dir: PathBuf::from("/a"),
                file_name: "iconPerks_botany.png".to_string(),
            },
        ]);

        let names: Vec<&str> = index
            .candidates("iconPerks_bond")
            .map(|f| f.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["T_UI_iconPerks_bond.png"]);
        assert_eq!(index.candidates("iconPerks_").count(), 2);
    }
}
