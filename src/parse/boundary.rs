//! Flag-cell boundary detection within one grid column.

use crate::grid::{RawGrid, Value};
use crate::parse::{EndFlag, ParseError};

/// Returns the ordered row indices where `col` holds the start flag.
///
/// Zero matches is a legitimate result (the grid simply contains no blocks),
/// not an error.
pub fn start_bound_rows(grid: &RawGrid, col: usize, flag: &Value) -> Vec<usize> {
    (0..grid.n_rows())
        .filter(|row| grid.value(*row, col) == flag)
        .collect()
}

/// Finds the first row at or after `from_row` whose cell in `col` matches the
/// end flag (`Blank` matches the first empty cell).
///
/// Callers search a grid with a synthetic blank terminator row appended, so a
/// `Blank` flag always terminates. A flag value that never appears is an
/// explicit error rather than a silently degenerate block; `start_row` is
/// carried only for the error message.
pub fn end_bound_row(
    grid: &RawGrid,
    from_row: usize,
    col: usize,
    flag: &EndFlag,
    start_row: usize,
) -> Result<usize, ParseError> {
    (from_row..grid.n_rows())
        .find(|row| match flag {
            EndFlag::Blank => grid.value(*row, col).is_empty(),
            EndFlag::Value(value) => grid.value(*row, col) == value,
        })
        .ok_or_else(|| ParseError::BoundaryNotFound {
            flag: flag.describe(),
            col,
            from_row,
            start_row,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> RawGrid {
        RawGrid::from_rows(vec![
            vec!["Block".into(), 1.0.into()],
            vec!["x".into(), 2.0.into()],
            vec![Value::Empty, 3.0.into()],
            vec!["Block".into(), 4.0.into()],
            vec!["y".into(), Value::Empty],
        ])
    }

    #[test]
    fn start_rows_in_order() {
        let rows = start_bound_rows(&grid(), 0, &"Block".into());
        assert_eq!(rows, vec![0, 3]);
    }

    #[test]
    fn start_rows_none_is_empty() {
        let rows = start_bound_rows(&grid(), 0, &"Missing".into());
        assert!(rows.is_empty());
    }

    #[test]
    fn end_row_blank_flag() {
        let row = end_bound_row(&grid(), 1, 0, &EndFlag::Blank, 0).unwrap();
        assert_eq!(row, 2);
    }

    #[test]
    fn end_row_value_flag_searches_at_or_after() {
        let flag = EndFlag::Value("Block".into());
        let row = end_bound_row(&grid(), 1, 0, &flag, 0).unwrap();
        assert_eq!(row, 3);
    }

    #[test]
    fn end_row_missing_flag_is_an_error() {
        let flag = EndFlag::Value("Total".into());
        let err = end_bound_row(&grid(), 0, 0, &flag, 0).unwrap_err();
        assert!(matches!(err, ParseError::BoundaryNotFound { col: 0, .. }));
    }

    #[test]
    fn end_row_blank_needs_terminator_row() {
        // Column 1 has no blank cell until the synthetic terminator is added
        let grid = RawGrid::from_rows(vec![
            vec!["a".into(), 1.0.into()],
            vec!["b".into(), 2.0.into()],
        ]);
        assert!(end_bound_row(&grid, 0, 1, &EndFlag::Blank, 0).is_err());
        let grid = grid.with_trailing_blank_row();
        assert_eq!(end_bound_row(&grid, 0, 1, &EndFlag::Blank, 0).unwrap(), 2);
    }
}
