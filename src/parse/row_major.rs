//! Row-major block parsing: repeated vertical blocks, each with its own
//! header row, reassembled into one accumulating table.

use crate::grid::RawGrid;
use crate::parse::block_id::inject_block_ids;
use crate::parse::boundary::{end_bound_row, start_bound_rows};
use crate::parse::{ParseError, RowMajorSpec};
use crate::table::ParsedTable;

/// Parses every row-major block of `grid` into one table.
///
/// Blocks are parsed independently, strictly in start-boundary order, and
/// appended to the accumulating result; zero start-flag matches yields an
/// empty table. Any boundary failure aborts the whole parse.
pub fn parse_row_major(grid: &RawGrid, spec: &RowMajorSpec) -> Result<ParsedTable, ParseError> {
    // Terminator row guarantees a <blank> end bound exists for the last block
    let grid = grid.with_trailing_blank_row();

    let starts = start_bound_rows(&grid, spec.start_col, &spec.start_flag);
    log::debug!(
        "row-major parse: {} block(s) flagged in column {}",
        starts.len(),
        spec.start_col
    );

    let mut table = ParsedTable::new();
    for start in starts {
        let fragment = parse_block(&grid, spec, start)?;
        table.append(fragment);
    }
    Ok(table)
}

/// Parses the single block starting at `start` into a fragment.
fn parse_block(
    grid: &RawGrid,
    spec: &RowMajorSpec,
    start: usize,
) -> Result<ParsedTable, ParseError> {
    let header_row = start + spec.header_row_offset;
    let data_start = start + spec.data_row_offset;
    let end = end_bound_row(grid, data_start, spec.end_col, &spec.end_flag, start)?;
    log::trace!("block at row {}: data rows [{}, {})", start, data_start, end);

    // Header cells become column names; blank headers carry a positional
    // fallback name until the drop rule below decides their fate
    let headers: Vec<Option<String>> = (0..grid.n_cols())
        .map(|col| grid.value(header_row, col).to_header_name())
        .collect();

    let keep: Vec<usize> = (0..grid.n_cols())
        .filter(|col| {
            headers[*col].is_some()
                || (data_start..end).any(|row| !grid.value(row, *col).is_empty())
        })
        .collect();

    let names = keep.iter().map(|col| match &headers[*col] {
        Some(name) => name.clone(),
        None => format!("column{}", col + 1),
    });
    let mut fragment = ParsedTable::with_columns(names);
    for row in data_start..end {
        fragment.push_row(keep.iter().map(|col| grid.value(row, *col).clone()).collect());
    }

    inject_block_ids(grid, data_start, &spec.block_id_vars, &mut fragment);
    Ok(fragment)
}
