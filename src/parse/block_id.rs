//! Per-block scalar ID extraction.

use crate::grid::{RawGrid, Value};
use crate::parse::BlockIdVar;
use crate::table::ParsedTable;

/// Injects each declared block-ID value into `fragment` as a constant column.
///
/// The scalar for a variable is read at `(data_start + row_offset, col)` of
/// the raw grid, where `data_start` is this block's own first data row and
/// negative offsets address the flag/header rows above it; every row of the
/// fragment receives the same value, so an ID column holds exactly one
/// distinct value per block. An offset pointing above the grid reads as
/// blank, like any other out-of-range cell. An empty declaration list is a
/// no-op.
pub fn inject_block_ids(
    grid: &RawGrid,
    data_start: usize,
    vars: &[BlockIdVar],
    fragment: &mut ParsedTable,
) {
    for var in vars {
        let value = match data_start.checked_add_signed(var.row_offset) {
            Some(row) => grid.value(row, var.col).clone(),
            None => Value::Empty,
        };
        fragment.set_const_column(&var.name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> RawGrid {
        RawGrid::from_rows(vec![
            vec!["hdr".into(), Value::Empty, "Survey A".into()],
            vec!["r1".into(), 1.0.into(), 2024.0.into()],
            vec!["r2".into(), 2.0.into(), Value::Empty],
        ])
    }

    fn fragment() -> ParsedTable {
        let mut fragment = ParsedTable::with_columns(["name", "score"]);
        fragment.push_row(vec!["r1".into(), 1.0.into()]);
        fragment.push_row(vec!["r2".into(), 2.0.into()]);
        fragment
    }

    #[test]
    fn ids_are_constant_across_block_rows() {
        let mut fragment = fragment();
        let vars = vec![BlockIdVar::new("survey", 0, 2)];
        inject_block_ids(&grid(), 0, &vars, &mut fragment);

        assert_eq!(fragment.columns(), &["name", "score", "survey"]);
        assert_eq!(fragment.value(0, "survey"), Some(&Value::text("Survey A")));
        assert_eq!(fragment.value(1, "survey"), Some(&Value::text("Survey A")));
    }

    #[test]
    fn offsets_are_relative_to_data_start() {
        let mut fragment = fragment();
        let vars = vec![BlockIdVar::new("year", 0, 2)];
        inject_block_ids(&grid(), 1, &vars, &mut fragment);
        assert_eq!(fragment.value(0, "year"), Some(&Value::Number(2024.0)));
    }

    #[test]
    fn negative_offsets_read_above_the_data_start() {
        let mut fragment = fragment();
        let vars = vec![BlockIdVar::new("survey", -1, 2)];
        inject_block_ids(&grid(), 1, &vars, &mut fragment);
        assert_eq!(fragment.value(0, "survey"), Some(&Value::text("Survey A")));
        assert_eq!(fragment.value(1, "survey"), Some(&Value::text("Survey A")));
    }

    #[test]
    fn offset_above_the_grid_reads_blank() {
        let mut fragment = fragment();
        let vars = vec![BlockIdVar::new("missing", -5, 2)];
        inject_block_ids(&grid(), 1, &vars, &mut fragment);
        assert_eq!(fragment.value(0, "missing"), Some(&Value::Empty));
    }

    #[test]
    fn no_vars_leaves_fragment_unchanged() {
        let mut fragment = fragment();
        inject_block_ids(&grid(), 0, &[], &mut fragment);
        assert_eq!(fragment.columns(), &["name", "score"]);
    }
}
