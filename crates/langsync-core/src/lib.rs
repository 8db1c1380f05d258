use std::path::PathBuf;

use thiserror::Error;

mod keystore;
mod layout;

pub use keystore::KeyStore;
pub use layout::{parse_language, CatalogLayout, DEFAULT_CATALOG_DIR, DEFAULT_EXTENSION};

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// One row of the persistent store. `(key, language)` is unique there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    pub key: String,
    pub language: String,
    pub text: String,
}

impl TranslationRecord {
    pub fn new(
        key: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Typed failures that callers may want to match on.
/// Everything else travels as a plain `eyre::Report`.
#[derive(Debug, Error)]
pub enum LangSyncError {
    #[error("{} must be writable", path.display())]
    CatalogNotWritable { path: PathBuf },
    #[error("malformed catalog file {}: {reason}", path.display())]
    MalformedCatalog { path: PathBuf, reason: String },
    #[error("invalid file mode `{0}` (expected octal, e.g. 644)")]
    InvalidFileMode(String),
}
