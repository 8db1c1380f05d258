use assert_cmd::prelude::*;
use langsync_store::{SqliteStore, TranslationStore};
use predicates::prelude::*;
use std::fs;

mod helpers;
use helpers::*;

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn row_count(db: &std::path::Path) -> i64 {
    let conn = rusqlite::Connection::open(db).unwrap();
    conn.query_row("SELECT COUNT(*) FROM translations", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn help_lists_every_command() {
    let tmp = tempfile::tempdir().unwrap();
    langsync(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("generate")
                .and(predicate::str::contains("copy-keys"))
                .and(predicate::str::contains("diff-keys"))
                .and(predicate::str::contains("db-import"))
                .and(predicate::str::contains("db-export")),
        );
}

#[test]
fn generate_without_lang_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    langsync(tmp.path())
        .arg("generate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--lang"));
    assert!(!tmp.path().join("i18n").exists());
}

#[test]
fn copy_keys_without_target_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    put_catalog(tmp.path(), "i18n/en.xml", &[("a", "a")]);
    langsync(tmp.path())
        .args(["copy-keys", "--source", "en"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--target"));
}

#[test]
fn generate_writes_keys_in_first_seen_order() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("src/views")).unwrap();
    fs::write(
        root.join("src/a.php"),
        "<?php echo __('Hello'); echo __('Bye'); echo __('Hello');",
    )
    .unwrap();
    fs::write(root.join("src/views/b.php"), "<?= __('Total') ?>").unwrap();
    fs::write(root.join("src/notes.txt"), "__('Ignored')").unwrap();

    let out = langsync(root)
        .args(["generate", "--lang", "en-us", "--ext", "php"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = stdout_of(&out);
    assert_contains_with_context(&stdout, "+ ---------- start ----------- +", "start banner");
    assert_contains_with_context(&stdout, "+ --------- complete --------- +", "complete banner");
    assert_contains_with_context(&stdout, "3 unique key(s)", "summary line");

    assert_eq!(
        catalog_pairs(root, "i18n/en/us.xml"),
        pairs(&[("Hello", "Hello"), ("Bye", "Bye"), ("Total", "Total")])
    );
}

#[test]
fn generate_dry_run_leaves_disk_alone() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("page.php"), "__('One')").unwrap();

    let out = langsync(tmp.path())
        .args(["generate", "--lang", "en", "--dry-run", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let json = json_of(&out);
    assert_eq!(json["keys"], 1);
    assert!(!tmp.path().join("i18n/en.xml").exists());
}

#[test]
fn copy_keys_keeps_translations_and_drops_stale_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    put_catalog(root, "i18n/en.xml", &[("Hello", "Hello"), ("Bye", "Bye"), ("New", "New")]);
    put_catalog(root, "i18n/fr.xml", &[("Old", "Vieux"), ("Hello", "Bonjour")]);

    langsync(root)
        .args(["copy-keys", "--source", "en", "--target", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept 1 translation(s)"));

    assert_eq!(
        catalog_pairs(root, "i18n/fr.xml"),
        pairs(&[("Hello", "Bonjour"), ("Bye", "Bye"), ("New", "New")])
    );
}

#[test]
fn copy_keys_clear_resets_texts() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    put_catalog(root, "i18n/en.xml", &[("Hello", "Hello")]);
    put_catalog(root, "i18n/fr.xml", &[("Hello", "Bonjour")]);

    langsync(root)
        .args(["copy-keys", "--source", "en", "--target", "fr", "--clear"])
        .assert()
        .success();
    assert_eq!(catalog_pairs(root, "i18n/fr.xml"), pairs(&[("Hello", "Hello")]));
}

#[test]
fn copy_keys_into_missing_target_creates_it() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    put_catalog(root, "i18n/en.xml", &[("A", "A"), ("B", "B")]);

    langsync(root)
        .args(["copy-keys", "--source", "en", "--target", "pt-br"])
        .assert()
        .success();
    assert_eq!(catalog_pairs(root, "i18n/pt/br.xml"), pairs(&[("A", "A"), ("B", "B")]));
}

#[test]
fn diff_keys_prints_counts_and_missing_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    put_catalog(root, "i18n/en.xml", &[("a", "a"), ("b", "b"), ("c", "c")]);
    put_catalog(root, "i18n/de.xml", &[("b", "B"), ("zzz", "Z")]);

    let out = langsync(root)
        .args(["diff-keys", "--source", "en", "--target", "de"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = stdout_of(&out);
    assert_contains_with_context(&stdout, "[en=3 de=2]", "counts line");
    assert_contains_with_context(
        &stdout,
        "Keys present in 'en' but not in 'de':\na\nc\n",
        "missing listing",
    );
    assert!(!stdout.contains("zzz"));
    // diff never writes
    assert_eq!(catalog_pairs(root, "i18n/de.xml").len(), 2);
}

#[test]
fn diff_keys_json_and_strict() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    put_catalog(root, "i18n/en.xml", &[("a", "a"), ("b", "b")]);

    let out = langsync(root)
        .args(["diff-keys", "--source", "en", "--target", "ja", "--format", "json", "--strict"])
        .output()
        .unwrap();
    assert!(!out.status.success(), "strict diff with missing keys must fail");
    let json = json_of(&out);
    assert_eq!(json["source_keys"], 2);
    assert_eq!(json["target_keys"], 0);
    assert_eq!(json["missing"], serde_json::json!(["a", "b"]));
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing from 'ja'"));

    langsync(root)
        .args(["diff-keys", "--source", "en", "--target", "en", "--strict"])
        .assert()
        .success();
}

#[test]
fn db_import_twice_adds_nothing_the_second_time() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    put_catalog(root, "i18n/en.xml", &[("a", "a"), ("b", "b")]);
    put_catalog(root, "i18n/fr/ca.xml", &[("a", "A-ca")]);

    let first = langsync(root)
        .args(["db-import", "--format", "json"])
        .output()
        .unwrap();
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    let first = json_of(&first);
    assert_eq!(first["inserted"], 3);
    assert_eq!(first["languages"], serde_json::json!(["en", "fr-ca"]));

    let second = langsync(root)
        .args(["db-import", "--format", "json"])
        .output()
        .unwrap();
    let second = json_of(&second);
    assert_eq!(second["inserted"], 0);
    assert_eq!(second["skipped"], 3);
    assert_eq!(row_count(&root.join("langsync.db")), 3);
}

#[test]
fn db_import_never_overwrites_existing_text() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let db = root.join("langsync.db");
    {
        let mut store = SqliteStore::open(&db).unwrap();
        store.insert("a", "fr", "from-db").unwrap();
    }
    put_catalog(root, "i18n/fr.xml", &[("a", "from-file"), ("b", "b")]);

    langsync(root).arg("db-import").assert().success();

    let store = SqliteStore::open(&db).unwrap();
    assert_eq!(
        store.records_for("fr").unwrap(),
        pairs(&[("a", "from-db"), ("b", "b")])
    );
}

#[test]
fn db_import_dry_run_creates_no_database() {
    let tmp = tempfile::tempdir().unwrap();
    put_catalog(tmp.path(), "i18n/en.xml", &[("a", "a")]);

    let out = langsync(tmp.path())
        .args(["db-import", "--dry-run", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(json_of(&out)["inserted"], 1);
    assert!(!tmp.path().join("langsync.db").exists());
}

#[test]
fn db_export_rebuilds_catalog_and_removes_stale_languages() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    {
        let mut store = SqliteStore::open(&root.join("langsync.db")).unwrap();
        store.insert("Hello", "en", "Hello").unwrap();
        store.insert("Hello", "pt-br", "Olá").unwrap();
        store.insert("Bye", "pt-br", "Tchau").unwrap();
    }
    put_catalog(root, "i18n/en.xml", &[("Old", "Old")]);
    put_catalog(root, "i18n/de.xml", &[("Hallo", "Hallo")]);

    let out = langsync(root)
        .args(["db-export", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json = json_of(&out);
    assert_eq!(json["languages"], serde_json::json!(["en", "pt-br"]));
    assert_eq!(json["files_removed"].as_array().unwrap().len(), 1);

    assert_eq!(catalog_pairs(root, "i18n/en.xml"), pairs(&[("Hello", "Hello")]));
    assert_eq!(
        catalog_pairs(root, "i18n/pt/br.xml"),
        pairs(&[("Hello", "Olá"), ("Bye", "Tchau")])
    );
    assert!(!root.join("i18n/de.xml").exists());
}

#[test]
fn db_export_dry_run_touches_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    {
        let mut store = SqliteStore::open(&root.join("langsync.db")).unwrap();
        store.insert("k", "en", "v").unwrap();
    }
    put_catalog(root, "i18n/de.xml", &[("Hallo", "Hallo")]);

    langsync(root)
        .args(["db-export", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remove"));
    assert!(root.join("i18n/de.xml").exists());
    assert!(!root.join("i18n/en.xml").exists());
}

#[test]
fn db_export_without_catalog_dir_fails_before_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    {
        let mut store = SqliteStore::open(&root.join("langsync.db")).unwrap();
        store.insert("k", "en", "v").unwrap();
    }

    langsync(root)
        .arg("db-export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be writable"));
    assert!(!root.join("i18n").exists());
}

#[test]
fn db_export_without_database_fails() {
    let tmp = tempfile::tempdir().unwrap();
    put_catalog(tmp.path(), "i18n/en.xml", &[("a", "a")]);

    langsync(tmp.path())
        .arg("db-export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database not found"));
    assert!(tmp.path().join("i18n/en.xml").exists());
    assert!(!tmp.path().join("langsync.db").exists());
}

#[test]
fn quiet_suppresses_banners() {
    let tmp = tempfile::tempdir().unwrap();
    put_catalog(tmp.path(), "i18n/en.xml", &[("a", "a")]);
    langsync(tmp.path())
        .args(["--quiet", "diff-keys", "--source", "en", "--target", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start").not());
}

#[test]
fn russian_ui_is_selectable() {
    let tmp = tempfile::tempdir().unwrap();
    put_catalog(tmp.path(), "i18n/en.xml", &[("a", "a")]);
    langsync_ui(tmp.path(), "ru")
        .args(["diff-keys", "--source", "en", "--target", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ключи, которые есть в 'en'"));
}

#[test]
fn config_file_sets_catalog_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("langsync.toml"), "catalog_dir = \"lang\"\n").unwrap();
    put_catalog(root, "lang/en.xml", &[("a", "a"), ("b", "b")]);

    let out = langsync(root)
        .args(["diff-keys", "--source", "en", "--target", "fr", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(json_of(&out)["source_keys"], 2);
}

#[test]
fn dot_prefixed_catalog_dir_survives_import_then_export() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    put_catalog(root, "res/lang/en/us.xml", &[("Hello", "Howdy")]);

    let import = langsync(root)
        .args(["--catalog-dir", "./res/lang", "db-import", "--format", "json"])
        .output()
        .unwrap();
    assert!(import.status.success(), "{}", String::from_utf8_lossy(&import.stderr));
    assert_eq!(json_of(&import)["languages"], serde_json::json!(["en-us"]));

    let export = langsync(root)
        .args(["--catalog-dir", "./res/lang", "db-export", "--format", "json"])
        .output()
        .unwrap();
    assert!(export.status.success(), "{}", String::from_utf8_lossy(&export.stderr));
    let json = json_of(&export);
    assert_eq!(json["files_removed"], serde_json::json!([]));

    assert_eq!(catalog_pairs(root, "res/lang/en/us.xml"), pairs(&[("Hello", "Howdy")]));
    assert!(!root.join("res/lang/lang").exists());
}

#[test]
fn language_ids_with_empty_segments_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("page.php"), "__('One')").unwrap();
    for bad in ["en-", "", "en--us", "en-.."] {
        langsync(tmp.path())
            .args(["generate", "--lang", bad])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--lang"));
    }
    langsync(tmp.path())
        .args(["diff-keys", "--source", "en", "--target=fr-"])
        .assert()
        .code(2);
    assert!(!tmp.path().join("i18n").exists());
}
