//! # Chatlens
//!
//! A Rust library for generating descriptive analytics reports from
//! Telegram chat exports.
//!
//! ## Overview
//!
//! Chatlens reads one exported chat archive (the `result.json` a Telegram
//! Desktop export produces), flattens its `messages` collection into a
//! table, computes twelve descriptive aggregates — message volume over
//! time, actor/message-type/media-type distributions, word frequencies,
//! reply and forward patterns — and writes one chart image per aggregate
//! plus a flattened CSV of the whole table.
//!
//! The pipeline is strictly sequential and single-pass:
//!
//! ```text
//! load → flatten → aggregate (×12, independent) → render (×12) → export
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatlens::archive::Archive;
//! use chatlens::table::FlatTable;
//! use chatlens::{aggregate, export, loader, render};
//!
//! fn main() -> chatlens::Result<()> {
//!     let root = loader::load("result.json".as_ref())?;
//!     let table = FlatTable::from_archive(Archive::from_value(root)?)?;
//!
//!     let aggregates = aggregate::compute_all(&table);
//!     render::render_all(&aggregates, "outputs/graphs".as_ref())?;
//!     export::write_csv(&table, "outputs/graphs/process.csv".as_ref(), b',')?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`loader`] — reads and JSON-parses the input file, keeping the two
//!   recoverable failure modes (missing file, undecodable JSON) distinct
//! - [`archive`] — [`Archive`](archive::Archive), the parsed export, and
//!   rich-text coercion
//! - [`table`] — [`FlatTable`](table::FlatTable) and [`Row`](table::Row):
//!   the flattened, typed, derived-column-bearing view of the export
//! - [`text`] — punctuation stripping and stop-word removal
//! - [`aggregate`] — the twelve grouped statistics and
//!   [`compute_all`](aggregate::compute_all)
//! - [`render`] — chart rasterization (line/bar/pie PNGs)
//! - [`export`] — the flattened CSV writer
//! - [`cli`] — CLI argument types (requires the `cli` feature)
//! - [`error`] — [`ReportError`] and [`Result`]

#[cfg(feature = "cli")]
pub mod cli;

pub mod aggregate;
pub mod archive;
pub mod error;
pub mod export;
pub mod loader;
pub mod render;
pub mod table;
pub mod text;

// Re-export the main types at the crate root for convenience
pub use error::{ReportError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ReportError, Result};

    // Pipeline stages
    pub use crate::aggregate::{Aggregate, ChartKind, compute_all};
    pub use crate::archive::Archive;
    pub use crate::export::write_csv;
    pub use crate::loader::load;
    pub use crate::render::render_all;
    pub use crate::table::{FlatTable, Row};
}
