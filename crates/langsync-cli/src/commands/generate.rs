use crate::context::Context;
use crate::OutputFormat;
use color_eyre::eyre::Result;
use langsync_parsers_source::DuplicatePolicy;
use langsync_services::GenerateOptions;
use std::path::PathBuf;

pub struct GenerateArgs {
    pub lang: String,
    pub root: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub duplicates: Option<DuplicatePolicy>,
    pub dry_run: bool,
}

pub fn run_generate(ctx: &Context, args: GenerateArgs, format: OutputFormat) -> Result<()> {
    let cfg = ctx.config.generate.clone().unwrap_or_default();
    let extensions = if args.extensions.is_empty() {
        cfg.extensions.unwrap_or_default()
    } else {
        args.extensions
    };
    let opts = GenerateOptions {
        source_root: ctx.source_root(args.root),
        extensions,
        duplicates: args.duplicates.or(cfg.duplicates).unwrap_or_default(),
        dry_run: args.dry_run,
    };
    tracing::debug!(event = "generate_options", ?opts);

    let mut files = ctx.catalog();
    let summary = langsync_services::generate(&mut files, &args.lang, &opts)?;

    if format == OutputFormat::Json {
        return super::emit_json(&summary);
    }

    crate::ui_out!(
        "generate-scanned",
        files = summary.files_scanned,
        occurrences = summary.occurrences,
        keys = summary.keys
    );
    if !summary.repeated.is_empty() {
        crate::ui_out!("generate-repeated-header");
        for usage in &summary.repeated {
            println!("{} × {}", usage.key, usage.count);
        }
    }
    if opts.dry_run {
        crate::ui_info!("generate-dry-run", keys = summary.keys, path = &summary.path);
    } else {
        crate::ui_ok!("generate-saved", keys = summary.keys, path = &summary.path);
    }
    Ok(())
}
