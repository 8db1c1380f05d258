#![allow(dead_code)]

use assert_cmd::prelude::*;
use langsync_catalog::{read_catalog, write_catalog, FileMode};
use langsync_core::KeyStore;
use std::path::Path;
use std::process::Command;

/// The binary, isolated from any real `langsync.toml`: cwd and the user
/// config dir both point into the scratch directory.
pub fn langsync(root: &Path) -> Command {
    langsync_ui(root, "en")
}

pub fn langsync_ui(root: &Path, ui_lang: &str) -> Command {
    let mut cmd = Command::cargo_bin("langsync").expect("langsync binary is built");
    cmd.current_dir(root)
        .env("XDG_CONFIG_HOME", root.join(".config"))
        .env("HOME", root)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .args(["--ui-lang", ui_lang, "--app-root"])
        .arg(root);
    cmd
}

pub fn put_catalog(root: &Path, rel: &str, entries: &[(&str, &str)]) {
    let store: KeyStore = entries.iter().map(|(k, v)| (*k, *v)).collect();
    write_catalog(&root.join(rel), &store, FileMode::DEFAULT).unwrap();
}

pub fn catalog_pairs(root: &Path, rel: &str) -> Vec<(String, String)> {
    read_catalog(&root.join(rel))
        .unwrap()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn stdout_of(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

/// The last non-empty stdout line, parsed as JSON.
pub fn json_of(out: &std::process::Output) -> serde_json::Value {
    let text = stdout_of(out);
    let line = text
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or_else(|| panic!("no JSON on stdout:\n{text}"));
    serde_json::from_str(line).unwrap_or_else(|e| panic!("bad JSON ({e}): {line}"))
}

pub fn assert_contains_with_context(haystack: &str, needle: &str, context_msg: &str) {
    if haystack.contains(needle) {
        return;
    }
    let head = haystack.lines().take(15).collect::<Vec<_>>().join("\n");
    panic!("{context_msg}\n--- needle ---\n{needle}\n--- head(15) ---\n{head}");
}
