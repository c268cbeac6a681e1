//! Ordered, column-named tables assembled from parsed blocks.

pub mod import;

use crate::grid::Value;
use thiserror::Error;

/// Raised when a column operation names a column the table does not have.
#[derive(Error, Debug)]
#[error("Unknown column '{name}'")]
pub struct UnknownColumnError {
    pub name: String,
}

/// An ordered sequence of named-column rows.
///
/// Row order is significant: it reflects original block order, then
/// within-block row order. Per-block fragments are appended in place with
/// name alignment, so assembling a long block list stays linear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ParsedTable {
    /// Creates an empty table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with the given column names.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name (first match when names repeat).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Borrows one row of values, in column order.
    pub fn row(&self, row: usize) -> Option<&[Value]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Cell value at `(row, column-name)`; `None` when either is absent.
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let index = self.column_index(name)?;
        self.rows.get(row).and_then(|cells| cells.get(index))
    }

    /// All values of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Result<Vec<&Value>, UnknownColumnError> {
        let index = self.column_index(name).ok_or_else(|| UnknownColumnError {
            name: name.to_owned(),
        })?;
        Ok(self.rows.iter().map(|cells| &cells[index]).collect())
    }

    /// Appends one row, padding or truncating to the current column count.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Empty);
        self.rows.push(row);
    }

    /// Appends another table's rows, aligning columns by name.
    ///
    /// Columns the fragment introduces are added on the right and back-filled
    /// with `Empty` for existing rows; columns the fragment lacks are filled
    /// with `Empty` for its rows. Fragment row order is preserved.
    pub fn append(&mut self, fragment: ParsedTable) {
        // Map each fragment column to a position in self, extending as needed
        let mut targets = Vec::with_capacity(fragment.columns.len());
        for column in &fragment.columns {
            let index = match self.column_index(column) {
                Some(index) => index,
                None => {
                    self.columns.push(column.clone());
                    for row in &mut self.rows {
                        row.push(Value::Empty);
                    }
                    self.columns.len() - 1
                }
            };
            targets.push(index);
        }
        for row in fragment.rows {
            let mut aligned = vec![Value::Empty; self.columns.len()];
            for (value, target) in row.into_iter().zip(&targets) {
                aligned[*target] = value;
            }
            self.rows.push(aligned);
        }
    }

    /// Sets every row's value in `name` to a constant, adding the column if
    /// it does not exist yet.
    pub fn set_const_column(&mut self, name: &str, value: Value) {
        match self.column_index(name) {
            Some(index) => {
                for row in &mut self.rows {
                    row[index] = value.clone();
                }
            }
            None => {
                self.columns.push(name.to_owned());
                for row in &mut self.rows {
                    row.push(value.clone());
                }
            }
        }
    }

    /// Returns a copy subset to the `(source, target)` pairs: source columns
    /// selected in pair order, each relabeled to its target name.
    ///
    /// All relabelings happen in one step, so a target name that equals
    /// another pair's source name never aliases.
    pub fn select_as(&self, pairs: &[(String, String)]) -> Result<ParsedTable, UnknownColumnError> {
        let indices = pairs
            .iter()
            .map(|(source, _)| {
                self.column_index(source).ok_or_else(|| UnknownColumnError {
                    name: source.to_owned(),
                })
            })
            .collect::<Result<Vec<usize>, UnknownColumnError>>()?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|index| row[*index].clone()).collect())
            .collect();
        Ok(ParsedTable {
            columns: pairs.iter().map(|(_, target)| target.clone()).collect(),
            rows,
        })
    }
}
