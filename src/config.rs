//! Application settings
//!
//! Stored as JSON in the user's config directory:
//! - Linux: ~/.config/unlockable-catalog/config.json
//! - macOS: ~/Library/Application Support/unlockable-catalog/config.json
//! - Windows: %APPDATA%\unlockable-catalog\config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::assets::BundledAssets;
use crate::error::{CatalogError, Result};
use crate::validate::{verify_path_is_directory, verify_settings_resolution};

const APP_DIR: &str = "unlockable-catalog";
const CONFIG_FILE: &str = "config.json";

/// Game display settings, used to locate icons on screen
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub width: i64,
    pub height: i64,
    /// Percent, 70 to 100
    pub ui_scale: i64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            ui_scale: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Folder holding the user's unlockable icons
    pub unlockables_folder: Option<PathBuf>,
    /// Folder with the bundled catalog database and fallback icons
    pub assets_root: PathBuf,
    pub display: DisplaySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unlockables_folder: None,
            assets_root: PathBuf::from("assets"),
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    /// Default location of the settings file
    pub fn default_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| CatalogError::Config("could not determine config directory".into()))?;

        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Read settings from `path`, or the defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn bundled_assets(&self) -> BundledAssets {
        BundledAssets::new(&self.assets_root)
    }

    /// Folder scanned for icons; an unset folder scans nothing
    pub fn scan_root(&self) -> PathBuf {
        self.unlockables_folder.clone().unwrap_or_default()
    }

    /// Store display settings typed by the user.
    ///
    /// Nothing changes unless all three values are valid. Width and height
    /// beyond what `DisplaySettings` can hold are rejected.
    pub fn apply_display(&mut self, width: &str, height: &str, ui_scale: &str) -> Result<()> {
        if !verify_settings_resolution(width, height, ui_scale) {
            return Err(CatalogError::Config(format!(
                "invalid display settings {}x{} at {}%",
                width, height, ui_scale
            )));
        }

        let parse = |value: &str| {
            let value = value.trim();
            value
                .parse::<i64>()
                .map_err(|e| CatalogError::Config(format!("display value '{}': {}", value, e)))
        };
        self.display = DisplaySettings {
            width: parse(width)?,
            height: parse(height)?,
            ui_scale: parse(ui_scale)?,
        };
        Ok(())
    }

    /// Set the unlockables folder, which must be an existing directory
    pub fn set_unlockables_folder(&mut self, folder: impl Into<PathBuf>) -> Result<()> {
        let folder = folder.into();
        if !verify_path_is_directory(&folder) {
            return Err(CatalogError::Config(format!(
                "{} is not a directory",
                folder.display()
            )));
        }
        self.unlockables_folder = Some(folder);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.json");
        let mut config = Config::default();
        config.set_unlockables_folder(dir.path()).unwrap();
        config.apply_display("2560", "1440", " 85 ").unwrap();

        config.save(&path).unwrap();
        let restored = Config::load(&path).unwrap();

        assert_eq!(restored, config);
        assert_eq!(restored.display.ui_scale, 85);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "assets_root": "/opt/app/assets" }"#).unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.assets_root, PathBuf::from("/opt/app/assets"));
        assert_eq!(config.unlockables_folder, None);
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn test_invalid_display_is_rejected() {
        let mut config = Config::default();
        assert!(config.apply_display("1920", "1080", "60").is_err());
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn test_oversized_width_is_rejected() {
        let mut config = Config::default();

        let err = config
            .apply_display("99999999999999999999", "1080", "85")
            .unwrap_err();

        assert!(matches!(err, CatalogError::Config(_)));
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn test_unlockables_folder_must_exist() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        assert!(config.set_unlockables_folder(dir.path().join("missing")).is_err());
        assert_eq!(config.unlockables_folder, None);
    }
}
