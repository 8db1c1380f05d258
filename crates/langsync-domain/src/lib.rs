use serde::{Deserialize, Serialize};

/// Bumped whenever a report struct changes shape.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyUsage {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSummary {
    pub schema_version: u32,
    pub lang: String,
    pub path: String,
    pub files_scanned: usize,
    pub occurrences: usize,
    pub keys: usize,
    /// Only filled under the `count` duplicate policy.
    pub repeated: Vec<KeyUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopySummary {
    pub schema_version: u32,
    pub source: String,
    pub target: String,
    pub source_keys: usize,
    pub target_keys: usize,
    pub written: usize,
    pub kept_translations: usize,
    pub dropped: usize,
    pub cleared: bool,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffOutput {
    pub schema_version: u32,
    pub source: String,
    pub target: String,
    pub source_keys: usize,
    pub target_keys: usize,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub schema_version: u32,
    pub dry_run: bool,
    pub files: usize,
    pub languages: Vec<String>,
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSummary {
    pub schema_version: u32,
    pub dry_run: bool,
    pub languages: Vec<String>,
    pub files_written: Vec<String>,
    pub files_removed: Vec<String>,
    pub keys: usize,
}
