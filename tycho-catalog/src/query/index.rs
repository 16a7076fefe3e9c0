//! Region index mapping each `tyc1` group to its span of catalog records.
//!
//! The index file is plain text, one line per group, in group order:
//!
//! ```text
//! 1; 4503
//! 4503; 8952
//! 8952; 13405
//! ```
//!
//! Each line holds the 1-based record ids bounding the group's region. The
//! region is half-open: the record at `last_record_id` belongs to the next
//! group. Line `n` describes group `n`, so lookups go through `entries[tyc1 - 1]`.

use log::info;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, Result};

/// Record span of one `tyc1` group, in 1-based record ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionEntry {
    pub first_record_id: u64,
    pub last_record_id: u64,
}

impl RegionEntry {
    /// Number of records the region covers (`last - first`).
    ///
    /// An inverted entry yields zero rather than an error; the index is
    /// not validated beyond parsing.
    pub fn record_count(&self) -> u64 {
        self.last_record_id.saturating_sub(self.first_record_id)
    }
}

/// Ordered table of [`RegionEntry`] values, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    entries: Vec<RegionEntry>,
}

impl RegionIndex {
    /// Read and parse an index file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let index = Self::parse(&text)?;
        info!(
            "Loaded region index {:?}: {} groups, {} records",
            path,
            index.len(),
            index.total_records()
        );
        Ok(index)
    }

    /// Parse index text, one `"<first>; <last>"` entry per line.
    ///
    /// Blank lines are skipped. Any other line that does not hold exactly two
    /// integer fields fails with [`CatalogError::Format`], carrying its
    /// 1-based line number.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (line_num, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            entries.push(parse_entry(line, line_num + 1)?);
        }
        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<RegionEntry>) -> Self {
        Self { entries }
    }

    /// Number of groups in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    /// Region for a 1-based group id.
    ///
    /// # Errors
    /// [`CatalogError::OutOfRange`] when `tyc1 < 1` or `tyc1 > self.len()`.
    pub fn region(&self, tyc1: i64) -> Result<&RegionEntry> {
        let out_of_range = || CatalogError::OutOfRange {
            id1: tyc1,
            groups: self.entries.len(),
        };
        if tyc1 < 1 {
            return Err(out_of_range());
        }
        self.entries
            .get((tyc1 - 1) as usize)
            .ok_or_else(out_of_range)
    }

    /// Sum of region sizes across all groups.
    pub fn total_records(&self) -> u64 {
        self.entries.iter().map(RegionEntry::record_count).sum()
    }

    /// Group id and entry of the region with the most records.
    pub fn largest_region(&self) -> Option<(usize, &RegionEntry)> {
        self.entries
            .iter()
            .enumerate()
            .max_by_key(|(_, e)| e.record_count())
            .map(|(i, e)| (i + 1, e))
    }
}

impl fmt::Display for RegionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_records();
        let avg = if self.entries.is_empty() {
            0.0
        } else {
            total as f64 / self.entries.len() as f64
        };
        writeln!(f, "Groups: {}", self.entries.len())?;
        writeln!(f, "Indexed records: {}", total)?;
        if let Some((tyc1, entry)) = self.largest_region() {
            writeln!(
                f,
                "Largest region: group {} ({} records)",
                tyc1,
                entry.record_count()
            )?;
        }
        write!(f, "Average records per group: {:.1}", avg)
    }
}

fn parse_entry(line: &str, line_num: usize) -> Result<RegionEntry> {
    let format_error = |reason: String| CatalogError::Format {
        line: line_num,
        reason,
    };

    let mut fields = line.split(';');
    let (Some(first), Some(last), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format_error(format!(
            "expected two ';'-separated fields, got {:?}",
            line
        )));
    };

    let parse = |field: &str| {
        field
            .trim()
            .parse::<u64>()
            .map_err(|e| format_error(format!("invalid record id {:?}: {}", field.trim(), e)))
    };

    Ok(RegionEntry {
        first_record_id: parse(first)?,
        last_record_id: parse(last)?,
    })
}
