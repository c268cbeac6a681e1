use regex::Regex;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to Excel-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),
}

/// An Excel-style cell window with optional open bounds.
///
/// Accepts single cells (`"B3"`), full ranges (`"A1:C5"`), and partial ranges
/// (`"B:D"`, `"2:10"`, `"C3:"`). Loaders use it to clip a sheet whose data of
/// interest does not span the whole used range; cell indices stay absolute.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CellRange {
    /// Lower row bound (0-based), None for unbounded
    pub row_lower: Option<usize>,
    /// Upper row bound (0-based, inclusive), None for unbounded
    pub row_upper: Option<usize>,
    /// Lower column bound (0-based), None for unbounded
    pub col_lower: Option<usize>,
    /// Upper column bound (0-based, inclusive), None for unbounded
    pub col_upper: Option<usize>,
}

impl CellRange {
    /// Checks whether the absolute position `(row, col)` falls in the window.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.row_lower.map(|bound| bound <= row).unwrap_or(true)
            && self.row_upper.map(|bound| row <= bound).unwrap_or(true)
            && self.col_lower.map(|bound| bound <= col).unwrap_or(true)
            && self.col_upper.map(|bound| col <= bound).unwrap_or(true)
    }
}

/// Converts a column label ("A", "BC") to its 0-based index.
fn col_to_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for character in label.chars() {
        index = index * 26 + (character as usize - 'A' as usize + 1);
    }
    Some(index - 1)
}

/// Converts a 1-based row label ("3") to its 0-based index. An empty label
/// is an open bound; row zero (or an unparseable number) is a format error.
fn row_to_index(label: &str, range: &str) -> Result<Option<usize>, RangeError> {
    if label.is_empty() {
        return Ok(None);
    }
    label
        .parse::<usize>()
        .ok()
        .and_then(|row| row.checked_sub(1))
        .map(Some)
        .ok_or_else(|| RangeError::FormatError(range.to_owned()))
}

impl FromStr for CellRange {
    type Err = RangeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let pattern = Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern");
        let value = value.to_ascii_uppercase();
        let captures = pattern
            .captures(value.as_str())
            .ok_or_else(|| RangeError::FormatError(value.to_owned()))?;
        let capture = |index: usize| captures.get(index).map_or("", |m| m.as_str());
        let col_lower = col_to_index(capture(1));
        let row_lower = row_to_index(capture(2), &value)?;
        let (col_upper, row_upper) = if captures.get(3).is_some() {
            (
                col_to_index(capture(4)),
                row_to_index(capture(5), &value)?,
            )
        } else {
            // A single cell reference bounds itself on both ends
            (col_lower, row_lower)
        };
        Ok(Self {
            row_lower,
            row_upper,
            col_lower,
            col_upper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_single_cell() {
        let range: CellRange = "B3".parse().unwrap();
        assert!(range.contains(2, 1));
        assert!(!range.contains(2, 2));
        assert!(!range.contains(3, 1));
    }

    #[test]
    fn range_full() {
        let range: CellRange = "A1:C5".parse().unwrap();
        assert!(range.contains(0, 0));
        assert!(range.contains(4, 2));
        assert!(!range.contains(5, 0));
        assert!(!range.contains(0, 3));
    }

    #[test]
    fn range_open_bounds() {
        let range: CellRange = "B:".parse().unwrap();
        assert!(!range.contains(100, 0));
        assert!(range.contains(100, 1));
        assert!(range.contains(0, 25));

        let range: CellRange = "2:10".parse().unwrap();
        assert!(!range.contains(0, 0));
        assert!(range.contains(1, 99));
        assert!(range.contains(9, 0));
        assert!(!range.contains(10, 0));
    }

    #[test]
    fn range_rejects_garbage() {
        assert!("B3:C5:D7".parse::<CellRange>().is_err());
        assert!("3B".parse::<CellRange>().is_err());
    }

    #[test]
    fn range_rejects_row_zero() {
        // Row labels are 1-based
        assert!("A0:B2".parse::<CellRange>().is_err());
        assert!("0".parse::<CellRange>().is_err());
        assert!("B1:C0".parse::<CellRange>().is_err());
    }

    #[test]
    fn range_multi_letter_column() {
        let range: CellRange = "AA1".parse().unwrap();
        assert_eq!(range.col_lower, Some(26));
    }
}
