//! Cache key encoding
//!
//! Keys travel as URL-safe base64 in build plans and live on disk as
//! lowercase hex file names sharded by their first byte.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Number of bytes in a cache key
pub const HASH_SIZE: usize = 32;

/// URL-safe base64 that accepts both padded and unpadded input
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Standard alphabet, as written by encoders that serialize raw bytes
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Reasons a key fails to decode
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("expected 32 bytes, got {0}")]
    Length(usize),

    #[error("empty key")]
    Empty,
}

/// A 32-byte cache key
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey([u8; HASH_SIZE]);

/// Hash of a complete description of a repeatable computation
pub type ActionId = CacheKey;

/// Hash of the output of a computation
pub type OutputId = CacheKey;

impl CacheKey {
    /// Wrap an exact-length byte array
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a key from a slice, rejecting anything that is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let array: [u8; HASH_SIZE] = bytes
            .try_into()
            .map_err(|_| KeyError::Length(bytes.len()))?;
        Ok(Self(array))
    }

    /// Parse a 64-character hex key
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", self.to_hex())
    }
}

/// Kind of cache file, encoded as the file name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Index record mapping an action to its output (`-a`)
    Action,
    /// Output data blob (`-d`)
    Data,
}

impl EntryKind {
    pub fn suffix(&self) -> char {
        match self {
            Self::Action => 'a',
            Self::Data => 'd',
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Action => "action",
            Self::Data => "data",
        };
        write!(f, "{}", name)
    }
}

/// Decode base64 bytes, URL-safe first with the standard alphabet as fallback
fn decode_bytes(encoded: &str) -> Result<Vec<u8>, KeyError> {
    match URL_SAFE_LENIENT.decode(encoded) {
        Ok(bytes) => Ok(bytes),
        Err(url_err) => STANDARD_LENIENT.decode(encoded).map_err(|_| url_err.into()),
    }
}

/// Decode a base64 key that must be exactly 32 bytes
pub fn decode_key(encoded: &str) -> Result<CacheKey, KeyError> {
    let bytes = decode_bytes(encoded)?;
    CacheKey::from_slice(&bytes)
}

/// Decode a base64 key prefix of 1 to 32 bytes
pub fn decode_key_prefix(encoded: &str) -> Result<Vec<u8>, KeyError> {
    let bytes = decode_bytes(encoded)?;
    match bytes.len() {
        0 => Err(KeyError::Empty),
        n if n > HASH_SIZE => Err(KeyError::Length(n)),
        _ => Ok(bytes),
    }
}

/// Encode a key the way build plans carry it
pub fn encode_key(key: &CacheKey) -> String {
    URL_SAFE_LENIENT.encode(key.as_bytes())
}

/// Relative path of a cache file: `<shard>/<hex key>-<suffix>`
pub fn file_name(key: &CacheKey, kind: EntryKind) -> PathBuf {
    PathBuf::from(shard_name(key.as_bytes()[0]))
        .join(format!("{}-{}", key.to_hex(), kind.suffix()))
}

/// Shard directory name for a key's first byte
pub fn shard_name(first: u8) -> String {
    format!("{:02x}", first)
}
