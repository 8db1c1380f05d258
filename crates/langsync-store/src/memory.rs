use crate::TranslationStore;
use langsync_core::{Result, TranslationRecord};
use std::collections::{BTreeSet, HashSet};

/// In-memory store for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    rows: Vec<TranslationRecord>,
    index: HashSet<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranslationStore for MemoryStore {
    fn exists(&self, key: &str, lang: &str) -> Result<bool> {
        Ok(self.index.contains(&(key.to_string(), lang.to_string())))
    }

    fn insert(&mut self, key: &str, lang: &str, text: &str) -> Result<bool> {
        if !self.index.insert((key.to_string(), lang.to_string())) {
            return Ok(false);
        }
        self.rows.push(TranslationRecord::new(key, lang, text));
        Ok(true)
    }

    fn languages(&self) -> Result<Vec<String>> {
        let langs: BTreeSet<&str> = self.rows.iter().map(|r| r.language.as_str()).collect();
        Ok(langs.into_iter().map(str::to_string).collect())
    }

    fn records_for(&self, lang: &str) -> Result<Vec<(String, String)>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.language == lang)
            .map(|r| (r.key.clone(), r.text.clone()))
            .collect())
    }

    fn delete_all(&mut self) -> Result<usize> {
        let n = self.rows.len();
        self.rows.clear();
        self.index.clear();
        Ok(n)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.rows.len())
    }
}
