//! Region-indexed Tycho-2 catalog search and Bright Star Catalogue
//! cross-referencing.
//!
//! The Tycho-2 catalog is read as a flat file of fixed 33-byte records plus a
//! small text index giving, for every `tyc1` group, the span of records that
//! belong to it. Resolving an identifier means seeking to the group's region,
//! reading it in one go and scanning it linearly. Nothing is loaded up front
//! beyond the index.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`query::index`] | [`RegionIndex`](query::RegionIndex) loader, [`RegionEntry`](query::RegionEntry) |
//! | [`query::record`] | [`CatalogRecord`](query::CatalogRecord) codec, peek-match, [`TycId`](query::TycId) |
//! | [`query::scan`] | [`scan_region`](query::scan_region), bounded by [`ScanFilter::max_results`](query::ScanFilter) |
//! | [`query::catalog`] | [`CatalogSearchEngine`](query::CatalogSearchEngine) lookups |
//! | [`xref`] | BSC parsing, HD→Tycho-2 mapping, the cross-reference pipeline |
//!
//! # Quick Start
//!
//! ```ignore
//! use tycho_catalog::query::CatalogSearchEngine;
//! use tycho_catalog::xref::{self, HdMapping};
//!
//! let mut engine = CatalogSearchEngine::open("tyc2.idx", "tyc2.bin")?;
//! let mapping = HdMapping::open("hd_tyc.txt")?;
//!
//! let stats = xref::run_files(&mut engine, &mapping, "catalog", "bsc_tyc.txt", "catalog.corrected")?;
//! println!("{}", stats);
//! ```
//!
//! # Binary Format
//!
//! Records are 33 bytes, little-endian: `id1` (`i16`) at 0, `id2` (`i16`)
//! at 2, `id3` (one byte) at 4, magnitude (`f32`) at 29. Record 1 starts at
//! byte 0.
//!
//! # Features
//!
//! - **`cli`** (default) — builds the `tycho-xref` binary.

pub mod error;
pub mod query;
pub mod xref;

pub use error::{CatalogError, Result};
