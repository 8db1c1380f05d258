//! Language-file access behind a trait, so the sync and merge flows can run
//! against a real directory or an in-memory catalog.

use crate::{list_catalog_files, read_catalog_or_empty, render_catalog_bytes, write_catalog, FileMode};
use langsync_core::{CatalogLayout, KeyStore, LangSyncError, Result};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// A language file found in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub lang: String,
    pub path: PathBuf,
}

pub trait LanguageFiles {
    fn layout(&self) -> &CatalogLayout;

    /// Every language file currently present, sorted by path.
    fn entries(&self) -> Result<Vec<CatalogEntry>>;

    /// Parse one file; a missing file is an empty store.
    fn read(&self, path: &Path) -> Result<KeyStore>;

    fn load(&self, lang: &str) -> Result<KeyStore> {
        self.read(&self.layout().location(lang))
    }

    /// Write the store to the language's location and return that location.
    fn save(&mut self, lang: &str, store: &KeyStore) -> Result<PathBuf>;

    /// Fails with [`LangSyncError::CatalogNotWritable`] when the catalog
    /// root cannot be written to.
    fn check_writable(&self) -> Result<()>;

    /// Make the catalog hold exactly `stores`. Returns removed file paths.
    fn replace_all(&mut self, stores: &[(String, KeyStore)]) -> Result<Vec<PathBuf>>;
}

/// Catalog stored as XML files under `<app_root>/<catalog_dir>`.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    layout: CatalogLayout,
    mode: FileMode,
}

impl FsCatalog {
    pub fn new(layout: CatalogLayout, mode: FileMode) -> Self {
        Self { layout, mode }
    }

    fn not_writable(&self) -> LangSyncError {
        LangSyncError::CatalogNotWritable {
            path: self.layout.catalog_root(),
        }
    }

    /// Remove directories emptied by deletions, up to (not including) the root.
    fn prune_empty_parents(&self, path: &Path) {
        let root = self.layout.catalog_root();
        let mut dir = path.parent();
        while let Some(d) = dir {
            if d == root || !d.starts_with(&root) || fs::remove_dir(d).is_err() {
                break;
            }
            dir = d.parent();
        }
    }
}

impl LanguageFiles for FsCatalog {
    fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    fn entries(&self) -> Result<Vec<CatalogEntry>> {
        Ok(list_catalog_files(&self.layout)?
            .into_iter()
            .filter_map(|path| {
                self.layout
                    .language(&path)
                    .map(|lang| CatalogEntry { lang, path })
            })
            .collect())
    }

    fn read(&self, path: &Path) -> Result<KeyStore> {
        read_catalog_or_empty(path)
    }

    fn save(&mut self, lang: &str, store: &KeyStore) -> Result<PathBuf> {
        let path = self.layout.location(lang);
        write_catalog(&path, store, self.mode)?;
        Ok(path)
    }

    fn check_writable(&self) -> Result<()> {
        let root = self.layout.catalog_root();
        if !root.is_dir() {
            return Err(self.not_writable().into());
        }
        // permission bits lie on some filesystems; actually try
        match tempfile::tempfile_in(&root) {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::debug!(event = "catalog_probe_failed", path = %root.display(), error = %e);
                Err(self.not_writable().into())
            }
        }
    }

    /// Staged replacement: everything is rendered first, written into a
    /// hidden staging directory inside the catalog root, renamed into place
    /// file by file, and only then are stale files removed. An interruption
    /// leaves old and new files side by side, never a missing language.
    fn replace_all(&mut self, stores: &[(String, KeyStore)]) -> Result<Vec<PathBuf>> {
        self.check_writable()?;
        let root = self.layout.catalog_root();
        let previous = list_catalog_files(&self.layout)?;

        let mut rendered = Vec::with_capacity(stores.len());
        for (lang, store) in stores {
            rendered.push((self.layout.location(lang), render_catalog_bytes(store)?));
        }

        let staging = tempfile::Builder::new()
            .prefix(".langsync-export-")
            .tempdir_in(&root)?;
        let mut staged = Vec::with_capacity(rendered.len());
        for (i, (dest, bytes)) in rendered.iter().enumerate() {
            let tmp = staging.path().join(format!("{i}.{}", self.layout.extension()));
            fs::write(&tmp, bytes)?;
            self.mode.apply(&tmp)?;
            staged.push((tmp, dest));
        }

        for (tmp, dest) in &staged {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::rename(tmp, dest)?;
            tracing::debug!(event = "export_file_placed", path = %dest.display());
        }

        let written: HashSet<&PathBuf> = rendered.iter().map(|(p, _)| p).collect();
        let mut removed = Vec::new();
        for path in previous {
            if written.contains(&path) {
                continue;
            }
            fs::remove_file(&path)?;
            self.prune_empty_parents(&path);
            removed.push(path);
        }
        Ok(removed)
    }
}

/// In-memory catalog keyed by the paths the layout would produce.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    layout: CatalogLayout,
    files: BTreeMap<PathBuf, KeyStore>,
    writable: bool,
}

impl MemoryCatalog {
    pub fn new(layout: CatalogLayout) -> Self {
        Self {
            layout,
            files: BTreeMap::new(),
            writable: true,
        }
    }

    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl LanguageFiles for MemoryCatalog {
    fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    fn entries(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self
            .files
            .keys()
            .filter_map(|path| {
                self.layout.language(path).map(|lang| CatalogEntry {
                    lang,
                    path: path.clone(),
                })
            })
            .collect())
    }

    fn read(&self, path: &Path) -> Result<KeyStore> {
        Ok(self.files.get(path).cloned().unwrap_or_default())
    }

    fn save(&mut self, lang: &str, store: &KeyStore) -> Result<PathBuf> {
        let path = self.layout.location(lang);
        self.files.insert(path.clone(), store.clone());
        Ok(path)
    }

    fn check_writable(&self) -> Result<()> {
        if self.writable {
            Ok(())
        } else {
            Err(LangSyncError::CatalogNotWritable {
                path: self.layout.catalog_root(),
            }
            .into())
        }
    }

    fn replace_all(&mut self, stores: &[(String, KeyStore)]) -> Result<Vec<PathBuf>> {
        self.check_writable()?;
        let mut next = BTreeMap::new();
        for (lang, store) in stores {
            next.insert(self.layout.location(lang), store.clone());
        }
        let removed = self
            .files
            .keys()
            .filter(|p| !next.contains_key(*p))
            .cloned()
            .collect();
        self.files = next;
        Ok(removed)
    }
}
