use crate::Result;
use langsync_catalog::LanguageFiles;
use langsync_domain::{GenerateSummary, KeyUsage, SCHEMA_VERSION};
use langsync_parsers_source::{extract, scan_source_tree, DuplicatePolicy, ScanOptions};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub source_root: PathBuf,
    /// Empty means every file.
    pub extensions: Vec<String>,
    pub duplicates: DuplicatePolicy,
    pub dry_run: bool,
}

/// Scan the source tree for `__('...')` keys and write them as the
/// catalog of `lang` (text = key). The catalog directory is never scanned.
pub fn generate<F: LanguageFiles + ?Sized>(
    files: &mut F,
    lang: &str,
    opts: &GenerateOptions,
) -> Result<GenerateSummary> {
    let scan = ScanOptions {
        extensions: opts.extensions.clone(),
        exclude: vec![files.layout().catalog_root()],
    };
    let sources = scan_source_tree(&opts.source_root, &scan)?;
    let ex = extract(sources, opts.duplicates);
    tracing::info!(
        event = "generate_extracted",
        lang = lang,
        files = ex.files_scanned,
        occurrences = ex.occurrences,
        keys = ex.store.len()
    );

    let path = if opts.dry_run {
        files.layout().location(lang)
    } else {
        files.save(lang, &ex.store)?
    };

    Ok(GenerateSummary {
        schema_version: SCHEMA_VERSION,
        lang: lang.to_string(),
        path: path.display().to_string(),
        files_scanned: ex.files_scanned,
        occurrences: ex.occurrences,
        keys: ex.store.len(),
        repeated: ex
            .repeated
            .into_iter()
            .map(|(key, count)| KeyUsage { key, count })
            .collect(),
    })
}
