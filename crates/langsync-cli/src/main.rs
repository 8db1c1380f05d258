use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use langsync_core::parse_language;
use langsync_parsers_source::DuplicatePolicy;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod context;
mod i18n;
mod ui;

use context::{Context, GlobalOverrides};

#[derive(Parser)]
#[command(
    name = "langsync",
    version,
    about = "Keeps translation catalogs in sync with the source tree and a translation database"
)]
struct Cli {
    /// Disable colored output (NO_COLOR is honoured as well).
    #[arg(long, global = true)]
    no_color: bool,

    /// Only warnings and errors; no banners.
    #[arg(long, global = true)]
    quiet: bool,

    /// Language of console messages (en, ru).
    #[arg(long, global = true, value_name = "LANG")]
    ui_lang: Option<String>,

    /// Application root that holds the catalog directory.
    #[arg(long, global = true, value_name = "DIR")]
    app_root: Option<PathBuf>,

    /// Catalog directory, relative to the application root.
    #[arg(long, global = true, value_name = "DIR")]
    catalog_dir: Option<String>,

    /// SQLite database with translation records.
    #[arg(long, global = true, value_name = "FILE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the source tree for __('...') keys and write the catalog of one language.
    Generate {
        /// Language the generated file belongs to, e.g. `en` or `en-us`.
        #[arg(long, value_parser = parse_language)]
        lang: String,
        /// Source tree to scan (default: application root).
        #[arg(long)]
        root: Option<PathBuf>,
        /// File extensions to scan; repeat or comma-separate.
        #[arg(long = "ext", value_delimiter = ',')]
        extensions: Vec<String>,
        /// What to do with keys used more than once.
        #[arg(long)]
        duplicates: Option<DuplicatePolicy>,
        #[arg(long)]
        dry_run: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Bring the key set of the target language in line with the source language.
    CopyKeys {
        #[arg(long, value_parser = parse_language)]
        source: String,
        #[arg(long, value_parser = parse_language)]
        target: String,
        /// Reset every target text to its key instead of keeping translations.
        #[arg(long)]
        clear: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List keys present in the source language but missing from the target.
    DiffKeys {
        #[arg(long, value_parser = parse_language)]
        source: String,
        #[arg(long, value_parser = parse_language)]
        target: String,
        /// Exit with an error when any key is missing.
        #[arg(long)]
        strict: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Insert every catalog entry the database does not have yet.
    DbImport {
        #[arg(long)]
        dry_run: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Rebuild the whole catalog from the database.
    DbExport {
        #[arg(long)]
        dry_run: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Generate { .. } => "generate",
            Commands::CopyKeys { .. } => "copy-keys",
            Commands::DiffKeys { .. } => "diff-keys",
            Commands::DbImport { .. } => "db-import",
            Commands::DbExport { .. } => "db-export",
        }
    }

    fn format(&self) -> OutputFormat {
        match self {
            Commands::Generate { format, .. }
            | Commands::CopyKeys { format, .. }
            | Commands::DiffKeys { format, .. }
            | Commands::DbImport { format, .. }
            | Commands::DbExport { format, .. } => *format,
        }
    }
}

trait Runnable {
    fn run(self, ctx: &Context) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, ctx: &Context) -> Result<()> {
        let name = self.name();
        // banners would break machine-readable stdout
        let banners = !ctx.quiet && self.format() == OutputFormat::Text;
        info!(event = "command_start", command = name);
        if banners {
            ui_out!("banner-start");
        }

        let result = match self {
            Commands::Generate {
                lang,
                root,
                extensions,
                duplicates,
                dry_run,
                format,
            } => commands::generate::run_generate(
                ctx,
                commands::generate::GenerateArgs {
                    lang,
                    root,
                    extensions,
                    duplicates,
                    dry_run,
                },
                format,
            ),
            Commands::CopyKeys {
                source,
                target,
                clear,
                format,
            } => commands::copy_keys::run_copy_keys(ctx, &source, &target, clear, format),
            Commands::DiffKeys {
                source,
                target,
                strict,
                format,
            } => commands::diff_keys::run_diff_keys(ctx, &source, &target, strict, format),
            Commands::DbImport { dry_run, format } => {
                commands::db_import::run_db_import(ctx, dry_run, format)
            }
            Commands::DbExport { dry_run, format } => {
                commands::db_export::run_db_export(ctx, dry_run, format)
            }
        };

        match &result {
            Ok(()) => {
                info!(event = "command_done", command = name);
                if banners {
                    ui_out!("banner-complete");
                }
            }
            Err(e) => error!(event = "command_failed", command = name, error = %e),
        }
        result
    }
}

/// Console layer on stderr, plus a daily rolling file when `log_dir` is set.
/// The returned guard must live until exit or buffered file lines are lost.
fn init_tracing(quiet: bool, use_color: bool, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let default_level = if quiet { "warn" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let console_layer = fmt::layer()
        .with_target(false)
        .with_ansi(use_color)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "langsync.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn colors_enabled(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none()
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let use_color = colors_enabled(cli.no_color);

    // a broken langsync.toml is skipped inside load_config; only I/O on the
    // search path itself can fail here
    let config = langsync_config::load_config().unwrap_or_default();
    let _guard = init_tracing(cli.quiet, use_color, config.log_dir.as_deref());
    i18n::init(cli.ui_lang.as_deref())?;

    let ctx = Context::resolve(
        GlobalOverrides {
            app_root: cli.app_root,
            catalog_dir: cli.catalog_dir,
            database: cli.database,
        },
        config,
        use_color,
        cli.quiet,
    )?;
    info!(
        event = "context",
        app_root = %ctx.layout.app_root().display(),
        catalog = %ctx.layout.catalog_root().display(),
        database = %ctx.database.display(),
    );

    cli.cmd.run(&ctx)
}
