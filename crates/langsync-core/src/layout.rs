use std::path::{Component, Path, PathBuf};

pub const DEFAULT_CATALOG_DIR: &str = "i18n";
pub const DEFAULT_EXTENSION: &str = "xml";

/// Bidirectional mapping between a language identifier (`en-us`) and the
/// file holding its catalog (`<app_root>/i18n/en/us.xml`).
///
/// Each dash-separated segment becomes one path segment. Segments that
/// themselves contain a path separator do not round-trip; that input is not
/// rejected, it simply maps to a different language on the way back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    app_root: PathBuf,
    catalog_dir: PathBuf,
    extension: String,
}

impl CatalogLayout {
    pub fn new(app_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            catalog_dir: PathBuf::from(DEFAULT_CATALOG_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// `./res/lang/` and `res/lang` name the same directory; `.` segments
    /// and trailing separators are dropped so both map identically.
    pub fn with_catalog_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.catalog_dir = dir
            .as_ref()
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        self
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Directory that holds every language file.
    pub fn catalog_root(&self) -> PathBuf {
        self.app_root.join(&self.catalog_dir)
    }

    /// `en-us` → `i18n/en/us.xml`, relative to the application root.
    pub fn relative_location(&self, lang: &str) -> PathBuf {
        let mut path = self.catalog_dir.clone();
        let segments: Vec<&str> = lang.split('-').collect();
        if let Some((last, parents)) = segments.split_last() {
            for seg in parents {
                path.push(seg);
            }
            // push instead of set_extension: a dot inside the segment must survive
            path.push(format!("{last}.{}", self.extension));
        }
        path
    }

    /// `en-us` → `<app_root>/i18n/en/us.xml`.
    pub fn location(&self, lang: &str) -> PathBuf {
        self.app_root.join(self.relative_location(lang))
    }

    /// Inverse of [`CatalogLayout::location`]. Accepts paths under the
    /// catalog root as well as paths relative to the application root.
    ///
    /// Returns `None` for files with another extension or with nothing
    /// below the catalog directory.
    pub fn language(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let stem = path.with_extension("");

        let below_catalog = stem
            .strip_prefix(self.catalog_root())
            .or_else(|_| stem.strip_prefix(&self.catalog_dir))
            .ok();
        let parts = match below_catalog {
            Some(rest) => segments(rest),
            None => {
                let rel = stem.strip_prefix(&self.app_root).unwrap_or(&stem);
                let mut parts = segments(rel);
                // drop whatever names the base catalog directory
                if parts.len() < 2 {
                    return None;
                }
                parts.remove(0);
                parts
            }
        };
        if parts.is_empty() {
            return None;
        }
        Some(parts.join("-"))
    }
}

fn segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Language ids accepted from the command line. Every dash-separated
/// segment must be non-empty and must stay inside the catalog directory,
/// otherwise the file would be invisible to catalog enumeration.
pub fn parse_language(raw: &str) -> std::result::Result<String, String> {
    if raw.is_empty() {
        return Err("language must not be empty".to_string());
    }
    for seg in raw.split('-') {
        if seg.is_empty() {
            return Err(format!("`{raw}` has an empty segment"));
        }
        if seg == "." || seg == ".." || seg.contains(['/', '\\']) {
            return Err(format!("`{raw}`: segment `{seg}` is not a plain name"));
        }
    }
    Ok(raw.to_string())
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
