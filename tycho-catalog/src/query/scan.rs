//! Bounded linear scan over one region of the catalog file.
//!
//! Records inside a region are in no particular order, so a lookup reads the
//! whole region in a single bulk read and walks it front to back. A cheap
//! peek at the id bytes decides whether a record is worth decoding.

use log::{debug, trace};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use super::index::RegionEntry;
use super::record::{decode, peek_match, CatalogRecord, RECORD_LEN};
use crate::error::{CatalogError, Result};

/// Default cap on decoded matches per scan.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Filters applied to every record of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanFilter {
    /// `None` matches any `id2`.
    pub id2: Option<i16>,
    pub id3: u8,
    pub max_results: usize,
}

impl ScanFilter {
    pub fn new(id2: Option<i16>, id3: u8) -> Self {
        Self {
            id2,
            id3,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Scan `region` of `reader` for records passing `filter`.
///
/// Seeks to `RECORD_LEN * (first_record_id - 1)`, reads exactly
/// `RECORD_LEN * (last_record_id - first_record_id)` bytes and returns the
/// matching records in file order, stopping once `filter.max_results` have
/// been collected.
///
/// `file_len` is the catalog size in bytes, measured once by the caller. The
/// region's byte span is checked against it before any buffer is allocated.
///
/// # Errors
/// - [`CatalogError::SeekOutOfBounds`] if the region starts past end of file
/// - [`CatalogError::Truncated`] if the file ends inside the region
/// - [`CatalogError::Io`] for any other read or seek failure
pub fn scan_region<R: Read + Seek>(
    reader: &mut R,
    file_len: u64,
    region: &RegionEntry,
    filter: &ScanFilter,
) -> Result<Vec<CatalogRecord>> {
    let start = region
        .first_record_id
        .saturating_sub(1)
        .checked_mul(RECORD_LEN as u64);
    let start = match start {
        Some(offset) if offset <= file_len => offset,
        past_end => {
            return Err(CatalogError::SeekOutOfBounds {
                offset: past_end.unwrap_or(u64::MAX),
                file_len,
            })
        }
    };
    let available = file_len - start;

    let expected = region.record_count().checked_mul(RECORD_LEN as u64);
    let expected = match expected {
        Some(n) if n <= available => n,
        too_big => {
            return Err(CatalogError::Truncated {
                expected: too_big.unwrap_or(u64::MAX),
                actual: available,
            })
        }
    };

    reader.seek(SeekFrom::Start(start))?;
    let mut buf = vec![0u8; expected as usize];
    if let Err(e) = reader.read_exact(&mut buf) {
        return Err(match e.kind() {
            // The file shrank after it was measured.
            ErrorKind::UnexpectedEof => CatalogError::Truncated {
                expected,
                actual: available,
            },
            _ => CatalogError::Io(e),
        });
    }

    debug!(
        "Scanning records {}..{} ({} bytes at offset {})",
        region.first_record_id, region.last_record_id, expected, start
    );

    let mut results = Vec::new();
    for offset in (0..buf.len()).step_by(RECORD_LEN) {
        if results.len() >= filter.max_results {
            debug!(
                "Scan stopped at {} matches, {} records unread",
                results.len(),
                (buf.len() - offset) / RECORD_LEN
            );
            break;
        }
        if !peek_match(&buf, offset, filter.id2, filter.id3) {
            continue;
        }
        let record = decode(&buf, offset);
        trace!(
            "Hit at record {}: {}",
            region.first_record_id + (offset / RECORD_LEN) as u64,
            record.tyc_id()
        );
        results.push(record);
    }

    Ok(results)
}
