use langsync_parsers_source::DuplicatePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "langsync.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LangSyncConfig {
    pub app_root: Option<String>,
    pub catalog_dir: Option<String>,
    pub database: Option<String>,
    /// Octal permission bits, e.g. "644".
    pub file_mode: Option<String>,
    pub log_dir: Option<String>,
    pub generate: Option<GenerateCfg>,
    pub diff: Option<DiffCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateCfg {
    pub source_root: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub duplicates: Option<DuplicatePolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiffCfg {
    pub strict: Option<bool>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Search order: `./langsync.toml`, then `$CONFIG_DIR/langsync/langsync.toml`.
/// Earlier files win field by field. Unreadable or invalid files are skipped.
pub fn load_config() -> Result<LangSyncConfig, ConfigError> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE));
    }
    if let Some(base) = dirs::config_dir() {
        candidates.push(base.join("langsync").join(CONFIG_FILE));
    }

    let mut merged = LangSyncConfig::default();
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match load_config_file(&path) {
            Ok(cfg) => {
                tracing::debug!(event = "config_loaded", path = %path.display());
                merged = merge(merged, cfg);
            }
            Err(e) => tracing::debug!(event = "config_skipped", error = %e),
        }
    }
    Ok(merged)
}

pub fn load_config_file(path: &Path) -> Result<LangSyncConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn merge(mut a: LangSyncConfig, b: LangSyncConfig) -> LangSyncConfig {
    if a.app_root.is_none() {
        a.app_root = b.app_root;
    }
    if a.catalog_dir.is_none() {
        a.catalog_dir = b.catalog_dir;
    }
    if a.database.is_none() {
        a.database = b.database;
    }
    if a.file_mode.is_none() {
        a.file_mode = b.file_mode;
    }
    if a.log_dir.is_none() {
        a.log_dir = b.log_dir;
    }
    a.generate = merge_opt(a.generate, b.generate, merge_generate);
    a.diff = merge_opt(a.diff, b.diff, merge_diff);
    a
}

fn merge_opt<T>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_generate(mut a: GenerateCfg, b: GenerateCfg) -> GenerateCfg {
    if a.source_root.is_none() {
        a.source_root = b.source_root;
    }
    if a.extensions.is_none() {
        a.extensions = b.extensions;
    }
    if a.duplicates.is_none() {
        a.duplicates = b.duplicates;
    }
    a
}

fn merge_diff(mut a: DiffCfg, b: DiffCfg) -> DiffCfg {
    if a.strict.is_none() {
        a.strict = b.strict;
    }
    a
}
