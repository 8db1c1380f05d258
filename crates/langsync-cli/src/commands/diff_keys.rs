use crate::context::Context;
use crate::OutputFormat;
use color_eyre::eyre::{bail, Result};

pub fn run_diff_keys(
    ctx: &Context,
    source: &str,
    target: &str,
    strict: bool,
    format: OutputFormat,
) -> Result<()> {
    let strict = strict || ctx.config.diff.as_ref().and_then(|d| d.strict).unwrap_or(false);
    let files = ctx.catalog();
    let out = langsync_services::diff_keys(&files, source, target)?;

    if format == OutputFormat::Json {
        super::emit_json(&out)?;
    } else {
        crate::ui_out!(
            "diff-counts",
            source = source,
            source_count = out.source_keys,
            target = target,
            target_count = out.target_keys
        );
        crate::ui_out!("diff-header", source = source, target = target);
        // keys are printed as-is, one per line, so the listing can be piped
        for key in &out.missing {
            if ctx.use_color {
                use owo_colors::OwoColorize;
                println!("{}", key.yellow());
            } else {
                println!("{key}");
            }
        }
    }

    if strict && !out.missing.is_empty() {
        bail!(crate::tr!(
            "diff-strict-failed",
            count = out.missing.len(),
            target = target
        ));
    }
    Ok(())
}
