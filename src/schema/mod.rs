//! Column-info schema mapping: renaming and subsetting parsed tables using a
//! shared metadata table of canonical variable names, per-table import names,
//! and keep/calculated flags.

use crate::grid::{RawGrid, Value};
use crate::table::{ParsedTable, UnknownColumnError};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while loading or applying column metadata.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The metadata table lacks a column the schema stage requires.
    #[error("Column-info table is missing required column '{name}'")]
    MissingMetadataColumn { name: String },

    /// A flag cell holds something that is not interpretable as boolean.
    #[error("Cannot coerce '{value}' to boolean in column '{column}', entry {row}")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
    },

    #[error("{0}")]
    UnknownColumn(#[from] UnknownColumnError),
}

/// Column of the metadata table holding canonical variable names.
const NAME_COL: &str = "name";
/// Boolean flag columns; blanks default to false.
const FLAG_COLS: [&str; 2] = ["keep_col_import", "IsCalculated"];

/// One canonical variable: its name, flags, and per-table import names.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnInfoEntry {
    /// Canonical variable name
    pub name: String,
    /// Whether the variable survives import
    pub keep_col_import: bool,
    /// Whether the variable is computed downstream rather than imported
    pub is_calculated: bool,
    /// Import name per table; absent means "not present in that table"
    import_names: HashMap<String, String>,
}

impl ColumnInfoEntry {
    /// The variable's import name in `table_name`, if it has one there.
    pub fn import_name(&self, table_name: &str) -> Option<&str> {
        self.import_names.get(table_name).map(String::as_str)
    }
}

/// The shared column-info metadata table.
///
/// Loaded once, read many times; entry order is the order of the source rows
/// and decides output column order after mapping. Every column of the source
/// other than `name` and the flag columns is treated as a per-table
/// import-name column.
#[derive(Clone, Debug, Default)]
pub struct ColumnInfo {
    entries: Vec<ColumnInfoEntry>,
}

impl ColumnInfo {
    /// Builds column info from an already-structured metadata table.
    ///
    /// Flag cells are normalized here: blank coerces to `false`, anything
    /// else must read as a boolean.
    pub fn from_table(table: &ParsedTable) -> Result<Self, SchemaError> {
        if table.column_index(NAME_COL).is_none() {
            return Err(SchemaError::MissingMetadataColumn {
                name: NAME_COL.to_owned(),
            });
        }
        let table_cols: Vec<&String> = table
            .columns()
            .iter()
            .filter(|column| *column != NAME_COL && !FLAG_COLS.contains(&column.as_str()))
            .collect();

        let mut entries = Vec::with_capacity(table.n_rows());
        for row in 0..table.n_rows() {
            let name = match table.value(row, NAME_COL) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => continue, // blank name row carries no variable
            };
            let mut import_names = HashMap::new();
            for column in &table_cols {
                if let Some(value) = table.value(row, column) {
                    if let Some(import_name) = value.to_header_name() {
                        import_names.insert((*column).clone(), import_name);
                    }
                }
            }
            entries.push(ColumnInfoEntry {
                name,
                keep_col_import: flag_value(table, row, FLAG_COLS[0])?,
                is_calculated: flag_value(table, row, FLAG_COLS[1])?,
                import_names,
            });
        }
        Ok(Self { entries })
    }

    /// Builds column info straight from a raw grid whose first row is the
    /// header (the shape the loader returns for a structured sheet).
    pub fn from_grid(grid: &RawGrid) -> Result<Self, SchemaError> {
        Self::from_table(&crate::table::import::structured_table(grid))
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[ColumnInfoEntry] {
        &self.entries
    }

    /// Looks up an entry by canonical name.
    pub fn entry(&self, name: &str) -> Option<&ColumnInfoEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Subsets and renames `table`'s columns for `table_name`.
    ///
    /// Keeps the import names whose entry has `keep_col_import` set and a
    /// non-blank import name for this table, outputs them in metadata entry
    /// order under their canonical names. The whole import-to-canonical
    /// mapping applies in one step, so a canonical name that equals another
    /// entry's import name never aliases. Import names absent from the parsed
    /// table are skipped: partial schema coverage across heterogeneous tables
    /// is the normal case, not an error.
    pub fn apply(&self, table_name: &str, table: &mut ParsedTable) -> Result<(), SchemaError> {
        let mut renames: Vec<(String, String)> = Vec::new();
        for entry in &self.entries {
            if !entry.keep_col_import {
                continue;
            }
            let Some(import_name) = entry.import_name(table_name) else {
                continue;
            };
            if table.column_index(import_name).is_none() {
                log::debug!(
                    "column info: '{}' has no column '{}' to map to '{}'",
                    table_name,
                    import_name,
                    entry.name
                );
                continue;
            }
            renames.push((import_name.to_owned(), entry.name.clone()));
        }

        *table = table.select_as(&renames)?;
        Ok(())
    }
}

/// Reads one boolean flag cell, defaulting blanks (and a wholly absent flag
/// column) to false.
fn flag_value(table: &ParsedTable, row: usize, column: &str) -> Result<bool, SchemaError> {
    match table.value(row, column) {
        None | Some(Value::Empty) => Ok(false),
        Some(value) => value.as_bool().ok_or_else(|| SchemaError::TypeCoercion {
            column: column.to_owned(),
            row,
            value: value.to_string(),
        }),
    }
}
