use indexmap::IndexMap;

/// Ordered key → text table for exactly one language.
///
/// Keys are unique. Iteration follows first insertion: re-inserting an
/// existing key replaces its text but keeps its original position, which is
/// the tie-break every producer (extractor, catalog reader, store export)
/// relies on for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStore {
    entries: IndexMap<String, String>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite in place. Returns `true` when the key was new.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> bool {
        self.entries.insert(key.into(), text.into()).is_none()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = KeyStore::new();
        for (k, v) in iter {
            store.insert(k, v);
        }
        store
    }
}

impl IntoIterator for KeyStore {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_keeps_first_position_and_last_text() {
        let mut store = KeyStore::new();
        assert!(store.insert("greeting", "greeting"));
        assert!(store.insert("farewell", "farewell"));
        assert!(!store.insert("greeting", "Hello"));

        let pairs: Vec<_> = store.iter().collect();
        assert_eq!(pairs, vec![("greeting", "Hello"), ("farewell", "farewell")]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn collects_from_pairs_in_order() {
        let store: KeyStore = [("b", "2"), ("a", "1"), ("b", "3")].into_iter().collect();
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(store.get("b"), Some("3"));
        assert!(store.contains_key("a"));
        assert!(!store.contains_key("c"));
    }
}
