//! Whole-file replacement.
//!
//! Bytes go to a temporary file in the target's directory, are synced, then
//! renamed over the target. A crash mid-save leaves the previous file intact.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Replaces `path` with `bytes`, creating parent directories as needed.
pub fn write_file(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
    tmp.write_all(bytes).map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "File replaced");
    Ok(())
}
