//! # Raw grid loading
//!
//! Turns a file plus sheet selection into position-addressed [`RawGrid`]s.
//! Excel and OpenDocument files go through calamine; CSV files go through the
//! csv crate. Every cell is reduced to a generic scalar [`Value`]; an option
//! forces all cells to their string representation, which keeps integer-like
//! codes from being auto-coerced to numbers.

pub mod csv;
pub mod excel;

use crate::grid::range::CellRange;
use crate::grid::{RawGrid, Value};
use glob::Pattern;
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading raw grids from files.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("{0}")]
    CsvError(#[from] ::csv::Error),

    /// Unsupported or unrecognized file format
    #[error("Cannot detect file format for '{name}'")]
    InvalidFileFormat { name: String },

    /// Requested sheet not present in the workbook
    #[error("Sheet '{name}' not found")]
    SheetNotFound { name: String },

    /// Workbook contains no sheets at all
    #[error("Workbook has no sheets")]
    EmptyWorkbook,
}

/// Which sheet(s) of a workbook to load, each producing its own grid.
#[derive(Clone, Debug, Default)]
pub enum SheetSelector {
    /// The workbook's first sheet
    #[default]
    First,
    /// A sheet by exact name
    Name(String),
    /// Every sheet, in workbook order
    All,
    /// Every sheet whose name matches the glob pattern
    Matching(Pattern),
}

impl SheetSelector {
    /// Resolves the selector against a workbook's sheet names.
    fn resolve(&self, names: &[String]) -> Result<Vec<String>, LoaderError> {
        match self {
            Self::First => names
                .first()
                .cloned()
                .map(|name| vec![name])
                .ok_or(LoaderError::EmptyWorkbook),
            Self::Name(name) => {
                if names.iter().any(|candidate| candidate == name) {
                    Ok(vec![name.clone()])
                } else {
                    Err(LoaderError::SheetNotFound { name: name.clone() })
                }
            }
            Self::All => Ok(names.to_vec()),
            Self::Matching(pattern) => Ok(names
                .iter()
                .filter(|name| pattern.matches(name))
                .cloned()
                .collect()),
        }
    }
}

/// Options controlling how raw grids are read.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Sheet selection; ignored for CSV files
    pub sheets: SheetSelector,
    /// Rows dropped from the top of each grid before parsing
    pub skip_rows: usize,
    /// Optional window; cells outside it read as blank
    pub window: Option<CellRange>,
    /// Force every cell to its string representation
    pub force_string: bool,
}

/// Loads every selected sheet of `path` as a separate raw grid.
///
/// The file format is detected from the extension. Each grid keeps absolute
/// A1-origin cell addressing so parse-specification column indices apply
/// unchanged regardless of where the sheet's used range starts.
pub fn load_grids<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Vec<RawGrid>, LoaderError> {
    let path = path.as_ref();
    match path.extension().and_then(OsStr::to_str) {
        Some("xlsx") | Some("xlsm") | Some("xlam") | Some("xlsb") | Some("xls") | Some("xla")
        | Some("ods") => excel::load_grids(path, options),
        Some("csv") => Ok(vec![csv::load_grid(path, options)?]),
        _ => Err(LoaderError::InvalidFileFormat {
            name: path.to_string_lossy().to_string(),
        }),
    }
}

/// Applies skip-rows and windowing to freshly converted rows.
pub(crate) fn apply_options(mut rows: Vec<Vec<Value>>, options: &LoadOptions) -> RawGrid {
    if options.skip_rows > 0 {
        rows.drain(..options.skip_rows.min(rows.len()));
    }
    if let Some(window) = &options.window {
        for (row_index, row) in rows.iter_mut().enumerate() {
            for (col_index, value) in row.iter_mut().enumerate() {
                if !window.contains(row_index, col_index) {
                    *value = Value::Empty;
                }
            }
        }
    }
    RawGrid::from_rows(rows)
}

/// Renders a value as text when string forcing is on, leaving blanks blank.
pub(crate) fn force_string(value: Value) -> Value {
    match value {
        Value::Empty => Value::Empty,
        other => Value::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["data".to_owned(), "cols".to_owned(), "data_2024".to_owned()]
    }

    #[test]
    fn selector_first_and_all() {
        assert_eq!(SheetSelector::First.resolve(&names()).unwrap(), vec!["data"]);
        assert_eq!(SheetSelector::All.resolve(&names()).unwrap().len(), 3);
        assert!(matches!(
            SheetSelector::First.resolve(&[]),
            Err(LoaderError::EmptyWorkbook)
        ));
    }

    #[test]
    fn selector_by_name() {
        let selector = SheetSelector::Name("cols".to_owned());
        assert_eq!(selector.resolve(&names()).unwrap(), vec!["cols"]);
        let selector = SheetSelector::Name("missing".to_owned());
        assert!(matches!(
            selector.resolve(&names()),
            Err(LoaderError::SheetNotFound { .. })
        ));
    }

    #[test]
    fn selector_by_pattern() {
        let selector = SheetSelector::Matching(Pattern::new("data*").unwrap());
        assert_eq!(selector.resolve(&names()).unwrap(), vec!["data", "data_2024"]);
    }

    #[test]
    fn apply_options_skips_and_windows() {
        let rows = vec![
            vec!["skip".into(), "skip".into()],
            vec!["a".into(), "b".into()],
            vec!["c".into(), "d".into()],
        ];
        let options = LoadOptions {
            skip_rows: 1,
            window: Some("A1:A9".parse().unwrap()),
            ..LoadOptions::default()
        };
        let grid = apply_options(rows, &options);
        assert_eq!(grid.n_rows(), 2);
        assert_eq!(*grid.value(0, 0), Value::text("a"));
        assert_eq!(*grid.value(0, 1), Value::Empty); // outside window
    }

    #[test]
    fn force_string_renders_integer_like_codes() {
        assert_eq!(force_string(Value::Number(1039.0)), Value::text("1039"));
        assert_eq!(force_string(Value::Bool(true)), Value::text("true"));
        assert_eq!(force_string(Value::Empty), Value::Empty);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_grids("data.feather", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidFileFormat { .. }));
    }
}
