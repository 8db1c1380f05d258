//! Catalog ⇄ persistent store synchronization.
//!
//! Import is insert-only and idempotent. Export regenerates the whole
//! catalog from the store.

use crate::Result;
use langsync_catalog::LanguageFiles;
use langsync_core::KeyStore;
use langsync_domain::{ExportSummary, ImportSummary, SCHEMA_VERSION};
use langsync_store::TranslationStore;
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub files: usize,
    pub languages: Vec<String>,
    pub inserted: usize,
    /// `(key, language)` pairs already in the store; their text is untouched.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub languages: Vec<String>,
    pub written: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub keys: usize,
}

/// Insert every `(key, language)` found in the catalog that the store does
/// not have yet. Existing records are never overwritten.
pub fn import_catalog<F, S>(files: &F, store: &mut S, dry_run: bool) -> Result<ImportReport>
where
    F: LanguageFiles + ?Sized,
    S: TranslationStore + ?Sized,
{
    let mut report = ImportReport::default();
    let mut languages = BTreeSet::new();
    // dry-run only: pairs we would have inserted earlier in this run
    let mut planned: HashSet<(String, String)> = HashSet::new();

    for entry in files.entries()? {
        let data = files.read(&entry.path)?;
        report.files += 1;
        languages.insert(entry.lang.clone());
        let (mut inserted, mut skipped) = (0usize, 0usize);

        if !dry_run {
            store.begin_batch()?;
        }
        for (key, text) in data.iter() {
            if store.exists(key, &entry.lang)? {
                skipped += 1;
                continue;
            }
            let fresh = if dry_run {
                planned.insert((key.to_string(), entry.lang.clone()))
            } else {
                store.insert(key, &entry.lang, text)?
            };
            if fresh {
                inserted += 1;
            } else {
                skipped += 1;
            }
        }
        if !dry_run {
            store.commit_batch()?;
        }

        tracing::debug!(event = "import_file", path = %entry.path.display(), lang = %entry.lang, inserted = inserted, skipped = skipped);
        report.inserted += inserted;
        report.skipped += skipped;
    }

    report.languages = languages.into_iter().collect();
    tracing::info!(event = "import_done", files = report.files, inserted = report.inserted, skipped = report.skipped);
    Ok(report)
}

/// Regenerate the catalog from the store: one file per stored language,
/// language files the store does not know about are removed.
///
/// Fails before touching anything when the catalog root is not writable.
pub fn export_catalog<F, S>(files: &mut F, store: &S, dry_run: bool) -> Result<ExportReport>
where
    F: LanguageFiles + ?Sized,
    S: TranslationStore + ?Sized,
{
    files.check_writable()?;

    let mut report = ExportReport::default();
    let mut stores: Vec<(String, KeyStore)> = Vec::new();
    for lang in store.languages()? {
        let data: KeyStore = store.records_for(&lang)?.into_iter().collect();
        report.keys += data.len();
        report.written.push(files.layout().location(&lang));
        report.languages.push(lang.clone());
        stores.push((lang, data));
    }

    report.removed = if dry_run {
        let keep: HashSet<&PathBuf> = report.written.iter().collect();
        files
            .entries()?
            .into_iter()
            .map(|e| e.path)
            .filter(|p| !keep.contains(p))
            .collect()
    } else {
        files.replace_all(&stores)?
    };

    tracing::info!(
        event = "export_done",
        languages = report.languages.len(),
        written = report.written.len(),
        removed = report.removed.len(),
        keys = report.keys,
        dry_run = dry_run
    );
    Ok(report)
}

pub fn db_import<F, S>(files: &F, store: &mut S, dry_run: bool) -> Result<ImportSummary>
where
    F: LanguageFiles + ?Sized,
    S: TranslationStore + ?Sized,
{
    let r = import_catalog(files, store, dry_run)?;
    Ok(ImportSummary {
        schema_version: SCHEMA_VERSION,
        dry_run,
        files: r.files,
        languages: r.languages,
        inserted: r.inserted,
        skipped: r.skipped,
    })
}

pub fn db_export<F, S>(files: &mut F, store: &S, dry_run: bool) -> Result<ExportSummary>
where
    F: LanguageFiles + ?Sized,
    S: TranslationStore + ?Sized,
{
    let r = export_catalog(files, store, dry_run)?;
    let show = |paths: Vec<PathBuf>| -> Vec<String> {
        paths.iter().map(|p| p.display().to_string()).collect()
    };
    Ok(ExportSummary {
        schema_version: SCHEMA_VERSION,
        dry_run,
        languages: r.languages,
        files_written: show(r.written),
        files_removed: show(r.removed),
        keys: r.keys,
    })
}
