use langsync_core::{KeyStore, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use walkdir::{DirEntry, WalkDir};

/// What to do when the same key is used more than once.
///
/// Whatever the policy, the resulting store holds each key once, at the
/// position of its first occurrence; the policies only differ in reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Collapse,
    Warn,
    Count,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collapse" => Ok(Self::Collapse),
            "warn" => Ok(Self::Warn),
            "count" => Ok(Self::Count),
            other => Err(format!(
                "unknown duplicate policy `{other}` (expected collapse, warn or count)"
            )),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Collapse => "collapse",
            Self::Warn => "warn",
            Self::Count => "count",
        })
    }
}

/// One source file handed to the extractor.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Discovered keys, text defaulting to the key itself.
    pub store: KeyStore,
    /// Marker occurrences seen, repeats included.
    pub occurrences: usize,
    pub files_scanned: usize,
    /// Keys used more than once with their usage count, in store order.
    /// Filled only under [`DuplicatePolicy::Count`].
    pub repeated: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Allowed file extensions without the dot; empty means every file.
    pub extensions: Vec<String>,
    /// Directories skipped entirely (the catalog itself, build output, ...).
    pub exclude: Vec<PathBuf>,
}

fn marker_re() -> &'static Regex {
    static MARKER_RE: OnceLock<Regex> = OnceLock::new();
    MARKER_RE.get_or_init(|| Regex::new(r"__\('([^']*)'\)").expect("static marker regex"))
}

/// All `__('<literal>')` keys in `text`, in order of appearance.
pub fn marker_keys(text: &str) -> impl Iterator<Item = &str> {
    marker_re()
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

/// Build a key store from a collection of source files.
pub fn extract<I>(sources: I, policy: DuplicatePolicy) -> Extraction
where
    I: IntoIterator<Item = SourceFile>,
{
    let mut out = Extraction::default();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for src in sources {
        out.files_scanned += 1;
        for key in marker_keys(&src.text) {
            out.occurrences += 1;
            let seen = counts.entry(key.to_string()).or_insert(0);
            *seen += 1;
            if *seen == 2 && policy == DuplicatePolicy::Warn {
                tracing::warn!(event = "duplicate_key", key = key, path = %src.path.display());
            }
            out.store.insert(key, key);
        }
    }

    if policy == DuplicatePolicy::Count {
        out.repeated = out
            .store
            .keys()
            .filter_map(|k| {
                counts
                    .get(k)
                    .copied()
                    .filter(|n| *n > 1)
                    .map(|n| (k.to_string(), n))
            })
            .collect();
    }
    out
}

/// Read every text file under `root`, sorted by name for stable output.
/// Hidden directories, excluded directories and non-UTF-8 files are skipped.
pub fn scan_source_tree(root: &Path, opts: &ScanOptions) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e, root, &opts.exclude));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(event = "scan_walk_error", error = %e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_allowed_extension(entry.path(), &opts.extensions) {
            continue;
        }
        match std::fs::read_to_string(entry.path()) {
            Ok(text) => files.push(SourceFile {
                path: entry.path().to_path_buf(),
                text,
            }),
            Err(e) => {
                tracing::debug!(event = "scan_skip_file", path = %entry.path().display(), error = %e);
            }
        }
    }
    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry, root: &Path, exclude: &[PathBuf]) -> bool {
    if !entry.file_type().is_dir() || entry.path() == root {
        return false;
    }
    let hidden = entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false);
    hidden || exclude.iter().any(|ex| same_dir(entry.path(), ex))
}

fn same_dir(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            allowed
                .iter()
                .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
