//! Position-addressed raw grids as produced by the loaders.
//!
//! A [`RawGrid`] is the unparsed form of one file/sheet: a rectangular block
//! of scalar [`Value`]s addressed by zero-based `(row, col)`. Parsing never
//! mutates a grid; the one structural operation, appending a synthetic blank
//! terminator row, returns a copy.

pub mod range;
pub mod value;

pub use value::Value;

/// An immutable 2-D grid of cell values.
///
/// Constructed once per file/sheet and discarded after parsing. Rows are
/// rectangularized on construction; reads outside the stored area yield
/// `Empty`, i.e. the grid behaves as if surrounded by blank cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<Value>>,
    n_cols: usize,
}

const EMPTY: Value = Value::Empty;

impl RawGrid {
    /// Builds a grid from row vectors, padding short rows with `Empty`.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(n_cols, Value::Empty);
                row
            })
            .collect();
        Self { rows, n_cols }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (width of the widest source row).
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns true when the grid holds no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value at `(row, col)`; `Empty` outside the stored area.
    pub fn value(&self, row: usize, col: usize) -> &Value {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Borrows one full row, if present.
    pub fn row(&self, row: usize) -> Option<&[Value]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Returns true when every cell in the row is blank.
    /// Rows outside the stored area count as blank.
    pub fn is_row_blank(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .map(|cells| cells.iter().all(Value::is_empty))
            .unwrap_or(true)
    }

    /// Copy of the grid with one fully blank row appended.
    ///
    /// End-bound search runs against this copy so that a `<blank>` terminator
    /// exists even for the final block of a sheet.
    pub fn with_trailing_blank_row(&self) -> Self {
        let mut rows = self.rows.clone();
        rows.push(vec![Value::Empty; self.n_cols]);
        Self {
            rows,
            n_cols: self.n_cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> RawGrid {
        RawGrid::from_rows(vec![
            vec!["a".into(), 1.0.into()],
            vec!["b".into()],
            vec![Value::Empty, Value::Empty],
        ])
    }

    #[test]
    fn grid_rectangularizes_short_rows() {
        let grid = grid();
        assert_eq!(grid.n_rows(), 3);
        assert_eq!(grid.n_cols(), 2);
        assert_eq!(*grid.value(1, 1), Value::Empty);
    }

    #[test]
    fn grid_out_of_range_reads_are_blank() {
        let grid = grid();
        assert_eq!(*grid.value(99, 0), Value::Empty);
        assert_eq!(*grid.value(0, 99), Value::Empty);
        assert!(grid.is_row_blank(99));
    }

    #[test]
    fn grid_blank_row_detection() {
        let grid = grid();
        assert!(!grid.is_row_blank(0));
        assert!(grid.is_row_blank(2));
    }

    #[test]
    fn grid_trailing_blank_row() {
        let grid = grid().with_trailing_blank_row();
        assert_eq!(grid.n_rows(), 4);
        assert!(grid.is_row_blank(3));
    }
}
