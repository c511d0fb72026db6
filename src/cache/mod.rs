//! Build cache layout
//!
//! A cache root holds one directory per first key byte, and inside each
//! shard a file per entry:
//!
//! | File | Content |
//! |------|---------|
//! | `<shard>/<action id>-a` | Index record pointing at an output id |
//! | `<shard>/<output id>-d` | Output blob |
//!
//! Entries are written once by the build tool and only read here.

pub mod index;
pub mod key;
pub mod locate;

pub use index::{parse_index_record, read_index_record, IndexEntry, INDEX_VERSION};
pub use key::{
    decode_key, decode_key_prefix, encode_key, file_name, ActionId, CacheKey, EntryKind,
    KeyError, OutputId, HASH_SIZE,
};
pub use locate::{locate_by_exact_key, locate_by_prefix};

use std::path::{Path, PathBuf};

/// Cache root under a base directory: `<base>/<cache_dir>/<tool>-build`
pub fn cache_root(base: &Path, cache_dir: &str, tool: &str) -> PathBuf {
    base.join(cache_dir).join(format!("{}-build", tool))
}
