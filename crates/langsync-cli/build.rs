use std::path::{Path, PathBuf};
use std::{env, fs};

fn is_ftl(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ftl"))
}

/// `(locale, its .ftl files)` for every directory under `i18n_dir`.
fn bundles(i18n_dir: &Path) -> Vec<(String, Vec<PathBuf>)> {
    let Ok(dirs) = fs::read_dir(i18n_dir) else {
        return Vec::new();
    };
    let mut found: Vec<(String, Vec<PathBuf>)> = dirs
        .flatten()
        .filter(|d| d.path().is_dir())
        .map(|d| {
            let files: Vec<PathBuf> = fs::read_dir(d.path())
                .map(|rd| rd.flatten().map(|f| f.path()).filter(|p| is_ftl(p)).collect())
                .unwrap_or_default();
            (d.file_name().to_string_lossy().into_owned(), files)
        })
        .filter(|(_, files)| !files.is_empty())
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0));
    found
}

fn main() {
    let manifest = env::var_os("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR");
    let bundles = bundles(&Path::new(&manifest).join("i18n"));

    for (_, files) in &bundles {
        for file in files {
            cargo_emit::rerun_if_changed!(file.display());
        }
    }
    cargo_emit::rerun_if_changed!("i18n/", "build.rs");

    let names: Vec<&str> = bundles.iter().map(|(name, _)| name.as_str()).collect();
    let out = Path::new(&env::var_os("OUT_DIR").expect("cargo sets OUT_DIR")).join("supported_locales.rs");
    fs::write(out, format!("pub static SUPPORTED_LOCALES: &[&str] = &{names:?};\n"))
        .expect("write supported_locales.rs");
}
