//! Persistent store of `(key, language, text)` records.
//!
//! `(key, language)` is unique; a second insert for the same pair is
//! skipped, never turned into an update.

use langsync_core::Result;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait TranslationStore {
    fn exists(&self, key: &str, lang: &str) -> Result<bool>;

    /// Returns `false` when the pair was already present (nothing written).
    fn insert(&mut self, key: &str, lang: &str, text: &str) -> Result<bool>;

    /// Distinct languages, sorted.
    fn languages(&self) -> Result<Vec<String>>;

    /// `(key, text)` pairs of one language in insertion order.
    fn records_for(&self, lang: &str) -> Result<Vec<(String, String)>>;

    fn delete_all(&mut self) -> Result<usize>;

    fn count(&self) -> Result<usize>;

    /// Group the following inserts; stores without transactions ignore it.
    fn begin_batch(&mut self) -> Result<()> {
        Ok(())
    }

    fn commit_batch(&mut self) -> Result<()> {
        Ok(())
    }
}
