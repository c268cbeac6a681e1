//! Interleaved-column block parsing: a metadata band followed by repeating
//! fixed-width column groups, unpivoted into long form.
//!
//! Layout by grid row: row 0 carries a block name in the first column of each
//! group, row 1 carries the metadata column names and the per-group variable
//! names, rows 2.. carry one entity per row. The output is long-form: one row
//! per (entity, block, variable) tagged `block_name` / `var_name`, variable
//! data in a `values` column. Downstream consumers re-pivot as needed.

use crate::grid::{RawGrid, Value};
use crate::parse::{InterleavedSpec, ParseError};
use crate::table::ParsedTable;

/// Row index carrying block names.
const NAME_ROW: usize = 0;
/// Row index carrying metadata column names and variable names.
const HEADER_ROW: usize = 1;
/// First entity data row.
const DATA_ROW: usize = 2;

/// Parses every interleaved column block of `grid` into one long-form table.
///
/// Scanning starts after the metadata band and stops at the first group
/// position whose name cell is blank. A grid with no entity rows or no named
/// groups yields an empty table.
pub fn parse_interleaved(grid: &RawGrid, spec: &InterleavedSpec) -> Result<ParsedTable, ParseError> {
    let meta_cols: Vec<usize> =
        (spec.start_col..spec.start_col + spec.n_cols_metadata).collect();

    // Entity rows end at the last row with any non-blank metadata cell
    let n_entities = (DATA_ROW..grid.n_rows())
        .rev()
        .find(|row| meta_cols.iter().any(|col| !grid.value(*row, *col).is_empty()))
        .map(|row| row - DATA_ROW + 1)
        .unwrap_or(0);

    let meta_names: Vec<String> = meta_cols
        .iter()
        .map(|col| match grid.value(HEADER_ROW, *col).to_header_name() {
            Some(name) => name,
            None => format!("column{}", col + 1),
        })
        .collect();

    let mut columns = meta_names.clone();
    columns.extend(["block_name".to_owned(), "var_name".to_owned(), "values".to_owned()]);
    let mut table = ParsedTable::with_columns(columns);

    let mut col = spec.start_col + spec.n_cols_metadata;
    let mut n_blocks = 0usize;
    while col < grid.n_cols() && !grid.value(NAME_ROW, col).is_empty() {
        let block_name = grid.value(NAME_ROW, col).clone();
        for var_col in col..col + spec.n_cols_block {
            let var_name = grid.value(HEADER_ROW, var_col).clone();
            for entity in 0..n_entities {
                let row = DATA_ROW + entity;
                let mut record: Vec<Value> = meta_cols
                    .iter()
                    .map(|meta_col| grid.value(row, *meta_col).clone())
                    .collect();
                record.push(block_name.clone());
                record.push(var_name.clone());
                record.push(grid.value(row, var_col).clone());
                table.push_row(record);
            }
        }
        n_blocks += 1;
        col += spec.n_cols_block;
    }
    log::debug!(
        "interleaved parse: {} block(s), {} entities, {} rows",
        n_blocks,
        n_entities,
        table.n_rows()
    );
    Ok(table)
}
