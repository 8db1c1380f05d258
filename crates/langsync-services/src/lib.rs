//! High-level orchestration layer over the lower-level crates.
//! Intentionally thin: the CLI calls these and only formats the results.

pub mod diff;
pub mod generate;
pub mod merge;
pub mod sync;

pub use diff::{diff, diff_keys, KeyDiff};
pub use generate::{generate, GenerateOptions};
pub use merge::{copy_keys, merge, MergeMode, Merged};
pub use sync::{db_export, db_import, export_catalog, import_catalog, ExportReport, ImportReport};

pub use langsync_core::{CatalogLayout, KeyStore, Result};
