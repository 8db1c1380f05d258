use crate::TranslationStore;
use color_eyre::eyre::WrapErr;
use langsync_core::Result;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite-backed store. The schema is created on open.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .wrap_err_with(|| format!("Failed to open database at {}", path.display()))?;
        tracing::debug!(event = "store_open", path = %path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                "key" TEXT NOT NULL,
                language TEXT NOT NULL,
                text TEXT NOT NULL,
                UNIQUE ("key", language)
            )"#,
            [],
        )
        .wrap_err("Failed to create translations table")?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_translations_language ON translations (language)",
            [],
        )
        .wrap_err("Failed to create language index")?;
        Ok(Self { conn })
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl TranslationStore for SqliteStore {
    fn exists(&self, key: &str, lang: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            r#"SELECT COUNT(*) FROM translations WHERE "key" = ?1 AND language = ?2"#,
            params![key, lang],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn insert(&mut self, key: &str, lang: &str, text: &str) -> Result<bool> {
        // OR IGNORE: a concurrent writer may have inserted the pair after our
        // existence check; that must still never become an update.
        let changed = self.conn.execute(
            r#"INSERT OR IGNORE INTO translations ("key", language, text) VALUES (?1, ?2, ?3)"#,
            params![key, lang, text],
        )?;
        Ok(changed == 1)
    }

    fn languages(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT language FROM translations GROUP BY language ORDER BY language")?;
        let langs = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(langs)
    }

    fn records_for(&self, lang: &str) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare_cached(
            r#"SELECT "key", text FROM translations WHERE language = ?1 ORDER BY id"#,
        )?;
        let rows = stmt
            .query_map(params![lang], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(String, String)>>>()?;
        Ok(rows)
    }

    fn delete_all(&mut self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM translations", [])?)
    }

    fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn begin_batch(&mut self) -> Result<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit_batch(&mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }
}
