//! CSV grid loading.

use crate::grid::{RawGrid, Value};
use crate::loader::{apply_options, force_string, LoadOptions, LoaderError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loads a CSV file as one raw grid (headerless: row 0 is just row 0).
pub(crate) fn load_grid(path: &Path, options: &LoadOptions) -> Result<RawGrid, LoaderError> {
    read_grid(File::open(path)?, options)
}

/// Reads a raw grid from any CSV source.
pub fn read_grid<R: Read>(reader: R, options: &LoadOptions) -> Result<RawGrid, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    let value = parse_field(field);
                    if options.force_string {
                        force_string(value)
                    } else {
                        value
                    }
                })
                .collect(),
        );
    }
    log::debug!("read {} csv row(s)", rows.len());
    Ok(apply_options(rows, options))
}

/// Sniffs one CSV field: blank, numeric, boolean, or plain text.
fn parse_field(field: &str) -> Value {
    if field.is_empty() {
        Value::Empty
    } else if let Ok(number) = field.parse::<f64>() {
        Value::Number(number)
    } else if field.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if field.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::Text(field.to_owned())
    }
}
