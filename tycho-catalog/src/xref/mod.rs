//! Bright Star Catalogue ↔ Tycho-2 cross-referencing.
//!
//! - [`bsc`] — fixed-width BSC5 line fields and magnitude rewriting
//! - [`mapping`] — HD number → Tycho-2 identifier table
//! - [`pipeline`] — the per-line lookup loop and its counters

pub mod bsc;
pub mod mapping;
pub mod pipeline;

pub use bsc::SourceStar;
pub use mapping::HdMapping;
pub use pipeline::{run, run_files, XrefStats};
