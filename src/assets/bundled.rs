use std::path::{Component, Path, PathBuf};

/// Image extension of the bundled icons
const BUNDLED_EXTENSION: &str = "png";

/// File name of the bundled catalog database
pub const DATABASE_FILE: &str = "unlockables.db";

/// Layout of the assets shipped with the application:
///
/// ```text
/// <root>/unlockables.db
/// <root>/<category>/<id>.png
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledAssets {
    root: PathBuf,
}

impl BundledAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    /// Fallback image for a catalog entry
    pub fn asset_file(&self, category: &str, id: &str) -> PathBuf {
        self.root
            .join(category)
            .join(format!("{}.{}", id, BUNDLED_EXTENSION))
    }
}

/// Make `path` absolute and drop `.` / `..` components without touching
/// the filesystem (symlinks are left as they are).
pub fn normalize_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
