use crate::context::Context;
use crate::OutputFormat;
use color_eyre::eyre::Result;
use langsync_services::MergeMode;

pub fn run_copy_keys(
    ctx: &Context,
    source: &str,
    target: &str,
    clear: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut files = ctx.catalog();
    let summary =
        langsync_services::copy_keys(&mut files, source, target, MergeMode::from_clear(clear))?;

    if format == OutputFormat::Json {
        return super::emit_json(&summary);
    }

    crate::ui_out!(
        "copy-counts",
        source = source,
        source_count = summary.source_keys,
        target = target,
        target_count = summary.target_keys
    );
    if summary.cleared {
        crate::ui_info!("copy-cleared", target = target);
    }
    crate::ui_ok!(
        "copy-saved",
        written = summary.written,
        kept = summary.kept_translations,
        dropped = summary.dropped,
        path = &summary.path
    );
    Ok(())
}
