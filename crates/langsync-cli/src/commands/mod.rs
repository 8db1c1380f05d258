pub mod copy_keys;
pub mod db_export;
pub mod db_import;
pub mod diff_keys;
pub mod generate;

use color_eyre::eyre::Result;
use serde::Serialize;
use std::io::Write;

/// One JSON document per invocation, newline-terminated.
pub(crate) fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
