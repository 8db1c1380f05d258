use langsync_core::{CatalogLayout, KeyStore, LangSyncError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

mod files;

pub use files::{CatalogEntry, FsCatalog, LanguageFiles, MemoryCatalog};

const ROOT_TAG: &str = "LanguageData";
const ENTRY_TAG: &str = "entry";
const KEY_ATTR: &str = "key";

/// Permission bits applied to every catalog file after it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode(pub u32);

impl FileMode {
    pub const DEFAULT: FileMode = FileMode(0o644);

    #[cfg(unix)]
    pub fn apply(self, path: &Path) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(self.0))
    }

    #[cfg(not(unix))]
    pub fn apply(self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for FileMode {
    type Err = LangSyncError;

    /// Octal, with or without a `0o` / `0` prefix: `644`, `0755`, `0o600`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let t = s.trim();
        let digits = t.strip_prefix("0o").unwrap_or(t);
        match u32::from_str_radix(digits, 8) {
            Ok(bits) if !digits.is_empty() && bits <= 0o7777 => Ok(FileMode(bits)),
            _ => Err(LangSyncError::InvalidFileMode(s.to_string())),
        }
    }
}

/// Serialize a key store into catalog XML, preserving its order.
pub fn render_catalog_bytes(store: &KeyStore) -> Result<Vec<u8>> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;

    for (key, text) in store.iter() {
        let mut tag = BytesStart::new(ENTRY_TAG);
        tag.push_attribute((KEY_ATTR, key));
        w.write_event(Event::Start(tag))?;
        w.write_event(Event::Text(BytesText::new(text)))?;
        w.write_event(Event::End(BytesEnd::new(ENTRY_TAG)))?;
    }

    w.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
    let mut bytes = w.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse catalog XML. `path` is only used in error messages.
///
/// Entry text is kept verbatim (no trimming). A key repeated within one
/// file keeps its first position and its last text.
pub fn parse_catalog(content: &str, path: &Path) -> Result<KeyStore> {
    let malformed = |reason: String| LangSyncError::MalformedCatalog {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = Reader::from_str(content);
    let mut store = KeyStore::new();
    // (key, text) of the entry being read
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == ENTRY_TAG.as_bytes() => {
                current = Some((entry_key(&e).map_err(malformed)?, String::new()));
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == ENTRY_TAG.as_bytes() => {
                store.insert(entry_key(&e).map_err(malformed)?, String::new());
            }
            Ok(Event::Text(t)) => {
                if let Some((_, text)) = current.as_mut() {
                    let chunk = t.unescape().map_err(|e| malformed(e.to_string()))?;
                    text.push_str(&chunk);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == ENTRY_TAG.as_bytes() => {
                if let Some((key, text)) = current.take() {
                    store.insert(key, text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(malformed(format!("at byte {}: {e}", reader.buffer_position())).into())
            }
            _ => {}
        }
    }
    Ok(store)
}

fn entry_key(e: &BytesStart<'_>) -> std::result::Result<String, String> {
    let attr = e
        .try_get_attribute(KEY_ATTR)
        .map_err(|err| err.to_string())?
        .ok_or_else(|| format!("<{ENTRY_TAG}> without `{KEY_ATTR}` attribute"))?;
    let value = attr.unescape_value().map_err(|err| err.to_string())?;
    Ok(value.into_owned())
}

pub fn read_catalog(path: &Path) -> Result<KeyStore> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content, path)
}

/// Like [`read_catalog`], but a missing file is an empty store.
pub fn read_catalog_or_empty(path: &Path) -> Result<KeyStore> {
    if !path.is_file() {
        tracing::debug!(event = "catalog_missing", path = %path.display());
        return Ok(KeyStore::new());
    }
    read_catalog(path)
}

/// Write through a temporary file in the same directory, then rename over
/// `path`, so readers never observe a half-written file.
pub fn write_atomic(path: &Path, bytes: &[u8], mode: FileMode) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    mode.apply(path)?;
    Ok(())
}

pub fn write_catalog(path: &Path, store: &KeyStore, mode: FileMode) -> Result<()> {
    let bytes = render_catalog_bytes(store)?;
    write_atomic(path, &bytes, mode)?;
    tracing::debug!(event = "catalog_written", path = %path.display(), keys = store.len());
    Ok(())
}

/// Every language file under the catalog root, sorted by path.
/// Hidden entries (e.g. an export staging directory) are ignored.
pub fn list_catalog_files(layout: &CatalogLayout) -> Result<Vec<PathBuf>> {
    let root = layout.catalog_root();
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && layout.language(entry.path()).is_some() {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}
