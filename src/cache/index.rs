//! Index record parsing
//!
//! An action entry is a single text line:
//!
//! ```text
//! v1 <hex action id> <hex output id> <size> <unix nanos>
//! ```
//!
//! Only the version tag and both ids are required. Size and time are kept
//! when present and well-formed, and ignored otherwise.

use super::key::{ActionId, CacheKey, OutputId};
use crate::error::{CarryError, CarryResult};
use chrono::{DateTime, Utc};
use std::io::{Read, Seek, SeekFrom};

/// The only index record version this tool understands
pub const INDEX_VERSION: &str = "v1";

/// A parsed action index record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub action: ActionId,
    pub output: OutputId,
    /// Size of the output blob in bytes
    pub size: Option<u64>,
    /// When the entry was written
    pub time: Option<DateTime<Utc>>,
}

impl IndexEntry {
    /// Parse the first line of an index record
    pub fn parse(content: &[u8]) -> CarryResult<Self> {
        let line = content.split(|b| *b == b'\n').next().unwrap_or_default();
        let line = std::str::from_utf8(line).map_err(|_| CarryError::NoOutputId)?;
        let mut fields = line.split_ascii_whitespace();

        if fields.next() != Some(INDEX_VERSION) {
            return Err(CarryError::NoOutputId);
        }

        let action = next_key(&mut fields)?;
        let output = next_key(&mut fields)?;
        let size = fields.next().and_then(|f| f.parse::<u64>().ok());
        let time = fields
            .next()
            .and_then(|f| f.parse::<i64>().ok())
            .map(DateTime::from_timestamp_nanos);

        Ok(Self {
            action,
            output,
            size,
            time,
        })
    }
}

fn next_key<'a>(fields: &mut impl Iterator<Item = &'a str>) -> CarryResult<CacheKey> {
    fields
        .next()
        .and_then(|f| CacheKey::from_hex(f).ok())
        .ok_or(CarryError::NoOutputId)
}

/// Extract the output id referenced by an index record
pub fn parse_index_record(content: &[u8]) -> CarryResult<OutputId> {
    IndexEntry::parse(content).map(|entry| entry.output)
}

/// Read an index record from the start of `source`
///
/// The source is rewound first, so callers may pass a handle that has
/// already been written to or read from.
pub fn read_index_record<R: Read + Seek>(source: &mut R) -> CarryResult<IndexEntry> {
    source
        .seek(SeekFrom::Start(0))
        .map_err(|e| CarryError::io("rewinding index record", e))?;

    let mut content = Vec::new();
    source
        .read_to_end(&mut content)
        .map_err(|e| CarryError::io("reading index record", e))?;

    IndexEntry::parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(version: &str, action: u8, output: u8) -> String {
        format!(
            "{} {} {}",
            version,
            hex::encode([action; 32]),
            hex::encode([output; 32])
        )
    }

    #[test]
    fn parse_minimal_record() {
        let output = parse_index_record(record("v1", 0, 0x11).as_bytes()).unwrap();
        assert_eq!(output, CacheKey::new([0x11; 32]));
    }

    #[test]
    fn parse_full_record() {
        let line = format!(
            "{} {:>20} {:>20}\n",
            record("v1", 1, 2),
            1234,
            1_700_000_000_000_000_000i64
        );
        let entry = IndexEntry::parse(line.as_bytes()).unwrap();

        assert_eq!(entry.action, CacheKey::new([1; 32]));
        assert_eq!(entry.output, CacheKey::new([2; 32]));
        assert_eq!(entry.size, Some(1234));
        assert_eq!(entry.time.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn malformed_optional_fields_ignored() {
        let line = format!("{} big yesterday", record("v1", 1, 2));
        let entry = IndexEntry::parse(line.as_bytes()).unwrap();
        assert_eq!(entry.size, None);
        assert_eq!(entry.time, None);
    }

    #[test]
    fn wrong_version_has_no_output() {
        let result = parse_index_record(record("v2", 0, 0x11).as_bytes());
        assert!(matches!(result, Err(CarryError::NoOutputId)));
    }

    #[test]
    fn missing_version_has_no_output() {
        let line = format!("{} {}", hex::encode([0u8; 32]), hex::encode([1u8; 32]));
        assert!(matches!(
            parse_index_record(line.as_bytes()),
            Err(CarryError::NoOutputId)
        ));
    }

    #[test]
    fn single_hex_field_has_no_output() {
        let line = format!("v1 {}", hex::encode([0u8; 32]));
        assert!(matches!(
            parse_index_record(line.as_bytes()),
            Err(CarryError::NoOutputId)
        ));
    }

    #[test]
    fn short_or_bad_hex_has_no_output() {
        let short = format!("v1 {} abcd", hex::encode([0u8; 32]));
        assert!(parse_index_record(short.as_bytes()).is_err());

        let bad = format!("v1 {} {}", hex::encode([0u8; 32]), "zz".repeat(32));
        assert!(parse_index_record(bad.as_bytes()).is_err());
    }

    #[test]
    fn empty_and_binary_content() {
        assert!(matches!(parse_index_record(b""), Err(CarryError::NoOutputId)));
        assert!(matches!(
            parse_index_record(&[0xff, 0xfe, 0x00]),
            Err(CarryError::NoOutputId)
        ));
    }

    #[test]
    fn read_rewinds_source() {
        let mut cursor = Cursor::new(record("v1", 3, 4).into_bytes());
        cursor.seek(SeekFrom::End(0)).unwrap();

        let entry = read_index_record(&mut cursor).unwrap();
        assert_eq!(entry.output, CacheKey::new([4; 32]));
    }
}
