//! Per-table import facade: ties a parse layout and import options to a
//! name, runs the load-parse-concatenate pass, and hands back one table.

use crate::error::{ResultMessage, SheetBlocksError};
use crate::grid::RawGrid;
use crate::loader::{load_grids, LoadOptions};
use crate::parse::interleaved::parse_interleaved;
use crate::parse::row_major::parse_row_major;
use crate::parse::ParseLayout;
use crate::table::ParsedTable;
use std::path::PathBuf;

/// Converts a structured grid (first row header, rest data) to a table.
///
/// Shares the block parsers' blank-header rule: a blank-headed column is
/// dropped when all of its data is blank, otherwise kept under a positional
/// `column{N}` name.
pub fn structured_table(grid: &RawGrid) -> ParsedTable {
    let headers: Vec<Option<String>> = (0..grid.n_cols())
        .map(|col| grid.value(0, col).to_header_name())
        .collect();
    let keep: Vec<usize> = (0..grid.n_cols())
        .filter(|col| {
            headers[*col].is_some()
                || (1..grid.n_rows()).any(|row| !grid.value(row, *col).is_empty())
        })
        .collect();
    let names = keep.iter().map(|col| match &headers[*col] {
        Some(name) => name.clone(),
        None => format!("column{}", col + 1),
    });
    let mut table = ParsedTable::with_columns(names);
    for row in 1..grid.n_rows() {
        table.push_row(keep.iter().map(|col| grid.value(row, *col).clone()).collect());
    }
    table
}

/// Where a table's raw data comes from: one or more files, one set of
/// loading options shared by all of them.
#[derive(Clone, Debug, Default)]
pub struct ImportSpec {
    pub files: Vec<PathBuf>,
    pub options: LoadOptions,
}

impl ImportSpec {
    /// Single-file convenience; more files can be pushed onto `files`.
    pub fn file<P: Into<PathBuf>>(path: P, options: LoadOptions) -> Self {
        Self {
            files: vec![path.into()],
            options,
        }
    }
}

/// A declared table: name, where to load it from, and how to parse it.
#[derive(Clone, Debug)]
pub struct TableDef {
    /// Table name, also the key into the column-info metadata
    pub name: String,
    pub import: ImportSpec,
    pub layout: ParseLayout,
}

impl TableDef {
    pub fn new<S: Into<String>>(name: S, import: ImportSpec, layout: ParseLayout) -> Self {
        Self {
            name: name.into(),
            import,
            layout,
        }
    }

    /// Loads and parses every declared file/sheet, concatenating the results
    /// in declaration order. Any failure is prefixed with the table name.
    pub fn import(&self) -> Result<ParsedTable, SheetBlocksError> {
        self.import_files()
            .with_prefix(&format!("importing table '{}'", self.name))
    }

    fn import_files(&self) -> Result<ParsedTable, SheetBlocksError> {
        let mut table = ParsedTable::new();
        for file in &self.import.files {
            for grid in load_grids(file, &self.import.options)? {
                table.append(self.parse_grid(&grid)?);
            }
        }
        log::debug!("imported table '{}': {} row(s)", self.name, table.n_rows());
        Ok(table)
    }

    /// Parses one raw grid according to the declared layout.
    pub fn parse_grid(&self, grid: &RawGrid) -> Result<ParsedTable, SheetBlocksError> {
        Ok(match &self.layout {
            ParseLayout::None => structured_table(grid),
            ParseLayout::RowMajor(spec) => parse_row_major(grid, spec)?,
            ParseLayout::Interleaved(spec) => parse_interleaved(grid, spec)?,
        })
    }
}
