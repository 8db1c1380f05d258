use crate::Result;
use langsync_catalog::LanguageFiles;
use langsync_core::KeyStore;
use langsync_domain::{DiffOutput, SCHEMA_VERSION};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDiff {
    pub source_len: usize,
    pub target_len: usize,
    /// Keys in source but not in target, in source order.
    pub missing: Vec<String>,
}

/// Only key presence counts: a key present on both sides with different
/// text is not reported.
pub fn diff(source: &KeyStore, target: &KeyStore) -> KeyDiff {
    KeyDiff {
        source_len: source.len(),
        target_len: target.len(),
        missing: source
            .keys()
            .filter(|k| !target.contains_key(k))
            .map(str::to_string)
            .collect(),
    }
}

pub fn diff_keys<F: LanguageFiles + ?Sized>(
    files: &F,
    source: &str,
    target: &str,
) -> Result<DiffOutput> {
    let src = files.load(source)?;
    let trg = files.load(target)?;
    let d = diff(&src, &trg);
    tracing::info!(event = "diff_keys", source = source, target = target, missing = d.missing.len());

    Ok(DiffOutput {
        schema_version: SCHEMA_VERSION,
        source: source.to_string(),
        target: target.to_string(),
        source_keys: d.source_len,
        target_keys: d.target_len,
        missing: d.missing,
    })
}
