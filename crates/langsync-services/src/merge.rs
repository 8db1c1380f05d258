use crate::Result;
use langsync_catalog::LanguageFiles;
use langsync_core::KeyStore;
use langsync_domain::{CopySummary, SCHEMA_VERSION};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Keep the target's translation for every key it already has.
    #[default]
    Overwrite,
    /// Ignore the target entirely; every key gets the source text.
    Clear,
}

impl MergeMode {
    pub fn from_clear(clear: bool) -> Self {
        if clear {
            Self::Clear
        } else {
            Self::Overwrite
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Merged {
    pub store: KeyStore,
    /// Keys whose text came from the target.
    pub kept_translations: usize,
    /// Target keys absent from the source, lost in the result.
    pub dropped: usize,
}

/// Result has exactly the source's keys, in source order.
pub fn merge(source: &KeyStore, target: &KeyStore, mode: MergeMode) -> Merged {
    let mut out = Merged::default();
    for (key, text) in source.iter() {
        let carried = match mode {
            MergeMode::Overwrite => target.get(key),
            MergeMode::Clear => None,
        };
        if carried.is_some() {
            out.kept_translations += 1;
        }
        out.store.insert(key, carried.unwrap_or(text));
    }
    out.dropped = target.keys().filter(|k| !source.contains_key(k)).count();
    out
}

/// Carry `source`'s key set onto `target` and write the result to the
/// target's location. Missing files count as empty.
pub fn copy_keys<F: LanguageFiles + ?Sized>(
    files: &mut F,
    source: &str,
    target: &str,
    mode: MergeMode,
) -> Result<CopySummary> {
    let src = files.load(source)?;
    let trg = files.load(target)?;
    tracing::info!(event = "copy_keys_loaded", source = source, target = target, source_keys = src.len(), target_keys = trg.len());

    let merged = merge(&src, &trg, mode);
    let path = files.save(target, &merged.store)?;

    Ok(CopySummary {
        schema_version: SCHEMA_VERSION,
        source: source.to_string(),
        target: target.to_string(),
        source_keys: src.len(),
        target_keys: trg.len(),
        written: merged.store.len(),
        kept_translations: merged.kept_translations,
        dropped: merged.dropped,
        cleared: mode == MergeMode::Clear,
        path: path.display().to_string(),
    })
}
