//! Finding cache files on disk
//!
//! Exact lookups compute the file name from a full key. Prefix lookups scan
//! a single shard directory for names that start with the hex of the known
//! bytes. When several names share a prefix the lexicographically smallest
//! one wins, so results do not depend on directory listing order.

use super::key::{file_name, shard_name, CacheKey, EntryKind};
use crate::error::{CarryError, CarryResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locate the file for a full key, returning its path relative to `root`
pub fn locate_by_exact_key(root: &Path, key: &CacheKey, kind: EntryKind) -> CarryResult<PathBuf> {
    let relative = file_name(key, kind);
    let full = root.join(&relative);

    match fs::metadata(&full) {
        Ok(meta) if meta.is_file() => Ok(relative),
        Ok(_) => Err(CarryError::NotFound(relative)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(CarryError::NotFound(relative)),
        Err(e) => Err(CarryError::io(format!("inspecting {}", full.display()), e)),
    }
}

/// Locate a file whose key starts with `prefix`, returning its path relative to `root`
pub fn locate_by_prefix(root: &Path, prefix: &[u8], kind: EntryKind) -> CarryResult<PathBuf> {
    let Some(&first) = prefix.first() else {
        return Err(CarryError::NotFound(PathBuf::new()));
    };

    let shard = shard_name(first);
    let hex_prefix = hex::encode(prefix);
    let not_found = || CarryError::NotFound(PathBuf::from(&shard).join(&hex_prefix));
    let dir = root.join(&shard);

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(CarryError::io(format!("listing {}", dir.display()), e)),
    };

    let suffix = format!("-{}", kind.suffix());
    let mut best: Option<String> = None;

    for entry in entries {
        let entry = entry.map_err(|e| CarryError::io(format!("listing {}", dir.display()), e))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.starts_with(&hex_prefix) || !name.ends_with(&suffix) {
            continue;
        }
        if best.as_ref().is_some_and(|current| *current <= name) {
            debug!("Ignoring duplicate prefix match {}", name);
            continue;
        }
        best = Some(name);
    }

    best.map(|name| PathBuf::from(&shard).join(name))
        .ok_or_else(not_found)
}
