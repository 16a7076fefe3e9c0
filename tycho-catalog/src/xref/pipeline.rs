//! BSC → Tycho-2 cross-reference run.
//!
//! Every BSC line is copied to the corrected catalog, with its magnitude
//! field rewritten when the matched Tycho-2 record disagrees. Matches are
//! also written to the cross-reference output as `"<hr> <id1>-<id2>-<id3>"`.

use log::{info, warn};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use super::bsc::{needs_correction, with_magnitude, SourceStar};
use super::mapping::HdMapping;
use crate::error::Result;
use crate::query::CatalogSearchEngine;

/// Outcome counters of one cross-reference run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XrefStats {
    pub total: u64,
    pub placeholders: u64,
    pub unparsed: u64,
    pub unmapped: u64,
    pub out_of_range: u64,
    pub not_found: u64,
    pub matched: u64,
    pub corrected: u64,
}

impl fmt::Display for XrefStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total lines: {}", self.total)?;
        writeln!(f, "Placeholders: {}", self.placeholders)?;
        writeln!(f, "Unparsed: {}", self.unparsed)?;
        writeln!(f, "No HD mapping: {}", self.unmapped)?;
        writeln!(f, "Group out of range: {}", self.out_of_range)?;
        writeln!(f, "Not found: {}", self.not_found)?;
        writeln!(f, "Matched: {}", self.matched)?;
        write!(f, "Magnitudes corrected: {}", self.corrected)
    }
}

/// Cross-reference every line of `bsc` against the catalog.
///
/// Lookups that fail with a recoverable error are counted and skipped; any
/// other error aborts the run.
pub fn run<R, B, X, C>(
    engine: &mut CatalogSearchEngine<R>,
    mapping: &HdMapping,
    bsc: B,
    xref_out: &mut X,
    bsc_out: &mut C,
) -> Result<XrefStats>
where
    R: Read + Seek,
    B: BufRead,
    X: Write,
    C: Write,
{
    let mut stats = XrefStats::default();

    for line in bsc.lines() {
        let line = line?;
        stats.total += 1;
        let corrected = process_line(engine, mapping, &line, xref_out, &mut stats)?;
        writeln!(bsc_out, "{}", corrected.as_deref().unwrap_or(&line))?;
    }

    xref_out.flush()?;
    bsc_out.flush()?;
    info!(
        "Cross-reference complete: {} of {} lines matched, {} corrected",
        stats.matched, stats.total, stats.corrected
    );
    Ok(stats)
}

/// [`run`] over files on disk.
pub fn run_files<R: Read + Seek>(
    engine: &mut CatalogSearchEngine<R>,
    mapping: &HdMapping,
    bsc_path: impl AsRef<Path>,
    xref_path: impl AsRef<Path>,
    bsc_out_path: impl AsRef<Path>,
) -> Result<XrefStats> {
    let bsc = BufReader::new(File::open(bsc_path)?);
    let mut xref_out = BufWriter::new(File::create(xref_path)?);
    let mut bsc_out = BufWriter::new(File::create(bsc_out_path)?);
    run(engine, mapping, bsc, &mut xref_out, &mut bsc_out)
}

/// Resolve one line. Returns the corrected line when the magnitude changed.
fn process_line<R: Read + Seek, X: Write>(
    engine: &mut CatalogSearchEngine<R>,
    mapping: &HdMapping,
    line: &str,
    xref_out: &mut X,
    stats: &mut XrefStats,
) -> Result<Option<String>> {
    let Some(star) = SourceStar::parse(line) else {
        stats.unparsed += 1;
        return Ok(None);
    };
    if star.is_placeholder {
        stats.placeholders += 1;
        return Ok(None);
    }
    let Some(id) = star.hd_id.and_then(|hd| mapping.get(hd)) else {
        stats.unmapped += 1;
        return Ok(None);
    };

    let record = match engine.lookup_id(id) {
        Ok(Some(record)) => record,
        Ok(None) => {
            stats.not_found += 1;
            return Ok(None);
        }
        Err(e) if e.is_recoverable() => {
            warn!("HR {}: {}", star.hr_id, e);
            stats.out_of_range += 1;
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    stats.matched += 1;
    writeln!(xref_out, "{} {}", star.hr_id, id)?;

    if !needs_correction(star.magnitude, record.magnitude) {
        return Ok(None);
    }
    match with_magnitude(line, record.magnitude) {
        Some(fixed) => {
            stats.corrected += 1;
            Ok(Some(fixed))
        }
        None => {
            warn!(
                "HR {}: cannot write magnitude {} into fixed-width line",
                star.hr_id, record.magnitude
            );
            Ok(None)
        }
    }
}
