//! Fixed-length Tycho-2 record codec.
//!
//! Each record is 33 bytes, little-endian on every host:
//!
//! | Bytes     | Field       | Type              |
//! |-----------|-------------|-------------------|
//! | `[0,2)`   | `id1`       | `i16`             |
//! | `[2,4)`   | `id2`       | `i16`             |
//! | `4`       | `id3`       | raw byte          |
//! | `[5,29)`  | reserved    |                   |
//! | `[29,33)` | `magnitude` | IEEE-754 `f32`    |
//!
//! Decoding is permissive: no field is range-checked and NaN magnitudes pass
//! through untouched.

use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

pub const RECORD_LEN: usize = 33;

const ID1_OFFSET: usize = 0;
const ID2_OFFSET: usize = 2;
const ID3_OFFSET: usize = 4;
const MAG_OFFSET: usize = 29;

/// One decoded catalog record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogRecord {
    pub id1: i16,
    pub id2: i16,
    /// Component disambiguator, kept as the raw byte. Any value 0–255 is legal.
    pub id3: u8,
    pub magnitude: f32,
}

impl CatalogRecord {
    /// The compound identifier of this record.
    pub fn tyc_id(&self) -> TycId {
        TycId {
            id1: self.id1,
            id2: self.id2,
            id3: self.id3,
        }
    }

    /// `id3` as a character (Latin-1 interpretation of the byte).
    pub fn id3_char(&self) -> char {
        self.id3 as char
    }
}

/// Decode the record starting at `offset` within `buf`.
///
/// # Panics
/// If `buf` holds fewer than `offset + RECORD_LEN` bytes.
pub fn decode(buf: &[u8], offset: usize) -> CatalogRecord {
    let rec = &buf[offset..offset + RECORD_LEN];
    CatalogRecord {
        id1: LittleEndian::read_i16(&rec[ID1_OFFSET..]),
        id2: LittleEndian::read_i16(&rec[ID2_OFFSET..]),
        id3: rec[ID3_OFFSET],
        magnitude: LittleEndian::read_f32(&rec[MAG_OFFSET..]),
    }
}

/// Encode a record into its 33-byte on-disk form. Reserved bytes are zero.
pub fn encode(record: &CatalogRecord) -> [u8; RECORD_LEN] {
    let mut buf = [0u8; RECORD_LEN];
    LittleEndian::write_i16(&mut buf[ID1_OFFSET..], record.id1);
    LittleEndian::write_i16(&mut buf[ID2_OFFSET..], record.id2);
    buf[ID3_OFFSET] = record.id3;
    LittleEndian::write_f32(&mut buf[MAG_OFFSET..], record.magnitude);
    buf
}

/// Check `id2`/`id3` of the record at `offset` without decoding it.
///
/// Reads bytes `[2,5)` only. `id2_filter = None` matches any `id2`; `id3` is
/// always compared exactly.
#[inline]
pub fn peek_match(buf: &[u8], offset: usize, id2_filter: Option<i16>, id3_filter: u8) -> bool {
    if buf[offset + ID3_OFFSET] != id3_filter {
        return false;
    }
    match id2_filter {
        Some(id2) => LittleEndian::read_i16(&buf[offset + ID2_OFFSET..]) == id2,
        None => true,
    }
}

/// Compound Tycho identifier `(id1, id2, id3)`.
///
/// Parses from the whitespace-separated form used by cross-reference tables
/// (`"4662 1037 1"`) and prints in the hyphenated catalog form (`"4662-1037-1"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TycId {
    pub id1: i16,
    pub id2: i16,
    pub id3: u8,
}

impl TycId {
    pub fn new(id1: i16, id2: i16, id3: u8) -> Self {
        Self { id1, id2, id3 }
    }

    pub fn matches(&self, record: &CatalogRecord) -> bool {
        record.id1 == self.id1 && record.id2 == self.id2 && record.id3 == self.id3
    }
}

impl fmt::Display for TycId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.id1, self.id2, self.id3 as char)
    }
}

impl FromStr for TycId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| CatalogError::InvalidId { reason };

        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [id1, id2, id3] = tokens[..] else {
            return Err(invalid(format!(
                "expected \"<id1> <id2> <id3>\", got {:?}",
                s
            )));
        };

        let id1: i16 = id1
            .parse()
            .map_err(|e| invalid(format!("invalid id1 {:?}: {}", id1, e)))?;
        let id2: i16 = id2
            .parse()
            .map_err(|e| invalid(format!("invalid id2 {:?}: {}", id2, e)))?;
        let id3 = parse_id3(id3).ok_or_else(|| {
            invalid(format!("id3 must be a single-byte character, got {:?}", id3))
        })?;

        Ok(Self { id1, id2, id3 })
    }
}

fn parse_id3(token: &str) -> Option<u8> {
    let mut chars = token.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    u8::try_from(u32::from(c)).ok()
}
