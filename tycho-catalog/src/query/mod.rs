//! Query interface for the region-indexed Tycho-2 catalog.
//!
//! Four submodules, leaf first:
//!
//! - [`index`] — load the region index, map a `tyc1` group to its record span
//! - [`record`] — decode 33-byte records, peek-match, compound identifiers
//! - [`scan`] — bounded linear scan over one region of the catalog file
//! - [`catalog`] — the search engine tying index and scanner together

pub mod catalog;
pub mod index;
pub mod record;
pub mod scan;

pub use catalog::{CatalogSearchEngine, SearchConfig};
pub use index::{RegionEntry, RegionIndex};
pub use record::{CatalogRecord, TycId, RECORD_LEN};
pub use scan::{scan_region, ScanFilter, DEFAULT_MAX_RESULTS};
