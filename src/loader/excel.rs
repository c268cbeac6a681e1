//! Excel/OpenDocument grid loading via calamine.

use crate::grid::{RawGrid, Value};
use crate::loader::{apply_options, force_string, LoadOptions, LoaderError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Loads every selected sheet of an Excel/ODS workbook as a raw grid.
pub(crate) fn load_grids(path: &Path, options: &LoadOptions) -> Result<Vec<RawGrid>, LoaderError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let selected = options.sheets.resolve(&sheet_names)?;
    log::debug!(
        "reading {} sheet(s) from '{}'",
        selected.len(),
        path.display()
    );

    selected
        .iter()
        .map(|name| {
            let range = workbook.worksheet_range(name)?;
            Ok(range_to_grid(&range, options))
        })
        .collect()
}

/// Converts a worksheet range to a grid with absolute A1-origin addressing.
///
/// calamine trims leading blank rows/columns from the used range; they are
/// padded back so that parse-specification indices stay absolute.
fn range_to_grid(range: &Range<Data>, options: &LoadOptions) -> RawGrid {
    let Some((start_row, start_col)) = range.start() else {
        return RawGrid::default(); // empty sheet
    };
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(start_row as usize + range.height());
    rows.resize(start_row as usize, Vec::new());
    for source_row in range.rows() {
        let mut row = vec![Value::Empty; start_col as usize];
        row.extend(source_row.iter().map(|data| {
            let value = to_value(data);
            if options.force_string {
                force_string(value)
            } else {
                value
            }
        }));
        rows.push(row);
    }
    apply_options(rows, options)
}

/// Reduces one calamine cell to a scalar value.
///
/// Datetime cells render as ISO text (date-only when there is no time part);
/// error cells read as blank, matching how blank-tolerant the block parsers
/// are about cells they do not understand.
fn to_value(data: &Data) -> Value {
    match data {
        Data::Empty => Value::Empty,
        Data::String(value) if value.is_empty() => Value::Empty,
        Data::String(value) => Value::Text(value.clone()),
        Data::Int(value) => Value::Number(*value as f64),
        Data::Float(value) => Value::Number(*value),
        Data::Bool(value) => Value::Bool(*value),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) if datetime.time() == chrono::NaiveTime::MIN => {
                Value::Text(datetime.date().format("%Y-%m-%d").to_string())
            }
            Some(datetime) => Value::Text(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Value::Number(value.as_f64()),
        },
        Data::DateTimeIso(value) => Value::Text(value.clone()),
        Data::DurationIso(value) => Value::Text(value.clone()),
        Data::Error(error) => {
            log::warn!("error cell '{}' read as blank", error);
            Value::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTime;

    #[test]
    fn scalar_cells_reduce_to_values() {
        assert_eq!(to_value(&Data::Empty), Value::Empty);
        assert_eq!(to_value(&Data::String(String::new())), Value::Empty);
        assert_eq!(to_value(&Data::String("x".to_owned())), Value::text("x"));
        assert_eq!(to_value(&Data::Int(3)), Value::Number(3.0));
        assert_eq!(to_value(&Data::Float(2.5)), Value::Number(2.5));
        assert_eq!(to_value(&Data::Bool(true)), Value::Bool(true));
        assert_eq!(
            to_value(&Data::DateTimeIso("2024-03-01T00:00:00".to_owned())),
            Value::text("2024-03-01T00:00:00")
        );
    }

    #[test]
    fn datetime_cells_render_as_iso_text() {
        // 45292 = 2024-01-01 in the 1900 epoch
        let date = Data::DateTime(ExcelDateTime::new(
            45292.0,
            calamine::ExcelDateTimeType::DateTime,
            false,
        ));
        assert_eq!(to_value(&date), Value::text("2024-01-01"));

        let datetime = Data::DateTime(ExcelDateTime::new(
            45292.5,
            calamine::ExcelDateTimeType::DateTime,
            false,
        ));
        assert_eq!(to_value(&datetime), Value::text("2024-01-01 12:00:00"));
    }
}
