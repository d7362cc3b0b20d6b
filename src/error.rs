use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the catalog, resolver and settings layers.
///
/// Missing assets are not represented here: a row without an image is
/// logged and dropped by the resolver.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog store unavailable at {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("malformed catalog record {row}: {reason}")]
    MalformedRecord { row: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl CatalogError {
    pub(crate) fn malformed(row: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::MalformedRecord {
            row: row.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
