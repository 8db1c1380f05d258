use crate::context::Context;
use crate::OutputFormat;
use color_eyre::eyre::Result;
use langsync_domain::ImportSummary;
use langsync_store::{MemoryStore, SqliteStore};

pub fn run_db_import(ctx: &Context, dry_run: bool, format: OutputFormat) -> Result<()> {
    let files = ctx.catalog();
    let summary = if dry_run && !ctx.database.exists() {
        // a dry run must not create the database file
        let mut empty = MemoryStore::new();
        langsync_services::db_import(&files, &mut empty, true)?
    } else {
        let mut store = SqliteStore::open(&ctx.database)?;
        langsync_services::db_import(&files, &mut store, dry_run)?
    };

    if format == OutputFormat::Json {
        return super::emit_json(&summary);
    }
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    let languages = summary.languages.join(", ");
    if summary.dry_run {
        crate::ui_info!(
            "import-dry-run",
            files = summary.files,
            inserted = summary.inserted,
            skipped = summary.skipped
        );
    } else {
        crate::ui_ok!(
            "import-done",
            files = summary.files,
            inserted = summary.inserted,
            skipped = summary.skipped
        );
    }
    if !languages.is_empty() {
        crate::ui_out!("import-languages", languages = languages);
    }
}
