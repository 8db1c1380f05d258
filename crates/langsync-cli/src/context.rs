use color_eyre::eyre::WrapErr;
use langsync_catalog::{FileMode, FsCatalog};
use langsync_config::LangSyncConfig;
use langsync_core::{CatalogLayout, Result, DEFAULT_CATALOG_DIR};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "langsync.db";

/// Global flags that feed into [`Context::resolve`].
#[derive(Debug, Clone, Default)]
pub struct GlobalOverrides {
    pub app_root: Option<PathBuf>,
    pub catalog_dir: Option<String>,
    pub database: Option<PathBuf>,
}

/// Everything a command needs after CLI flags, `langsync.toml` and the
/// built-in defaults have been folded together (in that order).
#[derive(Debug, Clone)]
pub struct Context {
    pub layout: CatalogLayout,
    pub file_mode: FileMode,
    pub database: PathBuf,
    pub config: LangSyncConfig,
    pub use_color: bool,
    pub quiet: bool,
}

impl Context {
    pub fn resolve(
        flags: GlobalOverrides,
        config: LangSyncConfig,
        use_color: bool,
        quiet: bool,
    ) -> Result<Self> {
        let app_root = flags
            .app_root
            .or_else(|| config.app_root.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let catalog_dir = flags
            .catalog_dir
            .or_else(|| config.catalog_dir.clone())
            .unwrap_or_else(|| DEFAULT_CATALOG_DIR.to_string());
        let file_mode = match config.file_mode.as_deref() {
            Some(raw) => raw
                .parse::<FileMode>()
                .wrap_err("Invalid `file_mode` in langsync.toml")?,
            None => FileMode::DEFAULT,
        };
        // relative database paths hang off the application root
        let database = flags
            .database
            .or_else(|| config.database.as_ref().map(PathBuf::from))
            .map(|p| anchor(&app_root, p))
            .unwrap_or_else(|| app_root.join(DEFAULT_DATABASE));

        Ok(Self {
            layout: CatalogLayout::new(app_root).with_catalog_dir(catalog_dir),
            file_mode,
            database,
            config,
            use_color,
            quiet,
        })
    }

    pub fn catalog(&self) -> FsCatalog {
        FsCatalog::new(self.layout.clone(), self.file_mode)
    }

    /// `[generate] source_root` is relative to the application root.
    pub fn source_root(&self, flag: Option<PathBuf>) -> PathBuf {
        match flag {
            Some(p) => p,
            None => match self.config.generate.as_ref().and_then(|g| g.source_root.as_ref()) {
                Some(p) => anchor(self.layout.app_root(), PathBuf::from(p)),
                None => self.layout.app_root().to_path_buf(),
            },
        }
    }
}

fn anchor(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}
