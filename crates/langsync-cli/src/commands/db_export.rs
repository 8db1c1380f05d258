use crate::context::Context;
use crate::OutputFormat;
use color_eyre::eyre::{bail, Result};
use langsync_store::SqliteStore;

pub fn run_db_export(ctx: &Context, dry_run: bool, format: OutputFormat) -> Result<()> {
    // opening a missing path would create an empty database and the export
    // would then delete the whole catalog
    if !ctx.database.is_file() {
        bail!(crate::tr!(
            "export-no-database",
            path = ctx.database.display()
        ));
    }
    let store = SqliteStore::open(&ctx.database)?;
    let mut files = ctx.catalog();
    let summary = langsync_services::db_export(&mut files, &store, dry_run)?;

    if format == OutputFormat::Json {
        return super::emit_json(&summary);
    }

    if summary.dry_run {
        crate::ui_info!("export-dry-run-header");
        for path in &summary.files_written {
            crate::ui_out!("export-plan-write", path = path);
        }
        for path in &summary.files_removed {
            crate::ui_out!("export-plan-remove", path = path);
        }
    } else {
        for path in &summary.files_removed {
            crate::ui_warn!("export-removed", path = path);
        }
        crate::ui_ok!(
            "export-done",
            languages = summary.languages.len(),
            keys = summary.keys,
            written = summary.files_written.len(),
            removed = summary.files_removed.len()
        );
    }
    Ok(())
}
