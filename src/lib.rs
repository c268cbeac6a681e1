//! # sheetblocks
//!
//! Reassembles semi-structured spreadsheet extracts into tidy, column-named
//! tables. Source files address their data by fixed row/column position
//! rather than a clean header-plus-rows layout; a declarative specification
//! per table says where repeated "blocks" of data start and end, where each
//! block's header row lives, and where scalar block-ID values sit. A second
//! stage maps raw imported column names to canonical names using a shared
//! column-info metadata table.
//!
//! ## Pipeline
//!
//! 1. [`loader`] turns a file + sheet selection into raw position-addressed
//!    grids (Excel/ODS via calamine, CSV via the csv crate).
//! 2. [`parse`] locates block boundaries and reassembles blocks into a
//!    [`table::ParsedTable`], either row-major blocks
//!    ([`parse::row_major::parse_row_major`]) or interleaved column blocks
//!    ([`parse::interleaved::parse_interleaved`]), injecting per-block ID
//!    columns along the way.
//! 3. [`schema`] subsets and renames the parsed columns to canonical names
//!    driven by a [`schema::ColumnInfo`] metadata table.
//!
//! Everything is single-threaded and deterministic: a parse pass owns its
//! grid, runs to completion or returns an error, and never shares mutable
//! state.

pub mod error;
pub mod grid;
pub mod loader;
pub mod parse;
pub mod schema;
pub mod table;

pub use crate::error::SheetBlocksError;
pub use crate::grid::range::CellRange;
pub use crate::grid::{RawGrid, Value};
pub use crate::loader::{load_grids, LoadOptions, SheetSelector};
pub use crate::parse::interleaved::parse_interleaved;
pub use crate::parse::row_major::parse_row_major;
pub use crate::parse::{
    BlockIdVar, EndFlag, InterleavedSpec, ParseError, ParseLayout, RowMajorSpec,
};
pub use crate::schema::{ColumnInfo, ColumnInfoEntry, SchemaError};
pub use crate::table::import::{ImportSpec, TableDef};
pub use crate::table::{ParsedTable, UnknownColumnError};
