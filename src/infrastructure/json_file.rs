//! Whole-file JSON documents: read as a vector, write pretty-printed.
//!
//! Writes go to a temporary file in the target's directory and are renamed
//! into place, so readers see either the old document or the new one.

use crate::infrastructure::{StorageError, StorageResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Create `dir` and its parents. Safe to call on every operation.
pub fn ensure_dir(dir: &Path) -> StorageResult<()> {
    fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))
}

/// Read a JSON array, treating an absent file as empty.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> StorageResult<Vec<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> StorageResult<()> {
    let json = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
    tmp.write_all(&json)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| StorageError::io(tmp.path(), e))?;
    #[cfg(unix)]
    set_target_permissions(&tmp, path)?;
    tmp.persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;

    Ok(())
}

/// Temp files are created `0600`; keep an existing document's mode, or use
/// `0644` for a new one.
#[cfg(unix)]
fn set_target_permissions(tmp: &NamedTempFile, path: &Path) -> StorageResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => metadata.permissions(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => fs::Permissions::from_mode(0o644),
        Err(e) => return Err(StorageError::io(path, e)),
    };
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(|e| StorageError::io(tmp.path(), e))
}
