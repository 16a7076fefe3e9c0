//! Catalog search engine: resolves a compound identifier to a single record.
//!
//! The engine owns the catalog handle and the [`RegionIndex`]. A lookup picks
//! the region of the queried `id1` group, scans it with the `id2`/`id3`
//! filters and keeps the first record whose full identifier matches.
//!
//! ```ignore
//! use tycho_catalog::query::CatalogSearchEngine;
//!
//! let mut engine = CatalogSearchEngine::open("tyc2.idx", "tyc2.bin")?;
//! if let Some(star) = engine.lookup(4662, 1037, b'1')? {
//!     println!("{} mag {:.2}", star.tyc_id(), star.magnitude);
//! }
//! ```

use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::index::RegionIndex;
use super::record::{CatalogRecord, TycId};
use super::scan::{scan_region, ScanFilter, DEFAULT_MAX_RESULTS};
use crate::error::Result;

/// Tunables for [`CatalogSearchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Upper bound on candidate records decoded per region scan.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Region-indexed search over a binary Tycho-2 catalog.
///
/// Lookups take `&mut self`: every scan seeks the shared handle and then
/// reads from it, and the two steps must not interleave with another lookup.
/// The catalog size is measured once at construction; the file is assumed not
/// to change underneath the engine. The handle is closed when the engine is
/// dropped.
pub struct CatalogSearchEngine<R = BufReader<File>> {
    reader: R,
    file_len: u64,
    index: RegionIndex,
    config: SearchConfig,
}

impl CatalogSearchEngine {
    /// Load the region index and open the catalog file.
    ///
    /// # Errors
    /// Returns an error if either file cannot be read or the index is malformed.
    pub fn open(index_path: impl AsRef<Path>, catalog_path: impl AsRef<Path>) -> Result<Self> {
        let index = RegionIndex::open(index_path)?;
        let catalog_path = catalog_path.as_ref();
        let file = File::open(catalog_path)?;
        let engine = Self::new(BufReader::new(file), index)?;
        info!("Opened catalog {:?} ({} bytes)", catalog_path, engine.file_len);
        Ok(engine)
    }
}

impl<R: Read + Seek> CatalogSearchEngine<R> {
    /// Wrap an open catalog handle, measuring its length once.
    pub fn new(mut reader: R, index: RegionIndex) -> Result<Self> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        Ok(Self {
            reader,
            file_len,
            index,
            config: SearchConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn index(&self) -> &RegionIndex {
        &self.index
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Catalog size in bytes, as measured when the engine was built.
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Find the record identified by `(id1, id2, id3)`.
    ///
    /// Returns `Ok(None)` when the group's region holds no record with that
    /// exact identifier among the first `max_results` candidates.
    ///
    /// # Errors
    /// - [`CatalogError::OutOfRange`](crate::CatalogError::OutOfRange) when
    ///   `id1 < 1` or `id1` exceeds the number of indexed groups
    /// - I/O variants when the region cannot be read
    pub fn lookup(&mut self, id1: i16, id2: i16, id3: u8) -> Result<Option<CatalogRecord>> {
        self.lookup_id(&TycId::new(id1, id2, id3))
    }

    /// [`lookup`](Self::lookup) taking a parsed identifier.
    pub fn lookup_id(&mut self, id: &TycId) -> Result<Option<CatalogRecord>> {
        let region = *self.index.region(i64::from(id.id1))?;
        let filter = ScanFilter::new(Some(id.id2), id.id3).with_max_results(self.config.max_results);

        let candidates = scan_region(&mut self.reader, self.file_len, &region, &filter)?;
        // Peek-match ignores id1, and a region may hold records of other groups.
        let found = candidates.into_iter().find(|r| id.matches(r));

        debug!(
            "Lookup {}: {}",
            id,
            if found.is_some() { "found" } else { "not found" }
        );
        Ok(found)
    }

    /// Return the underlying reader, consuming the engine.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
