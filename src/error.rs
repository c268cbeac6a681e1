use thiserror::Error;

/// Main error type for the sheetblocks crate.
/// Aggregates errors from the standard library, dependencies, and internal modules.
#[derive(Error, Debug)]
pub enum SheetBlocksError {
    #[error("{0}")]
    WithContextError(String),

    #[error("{0}")]
    AnyhowError(#[from] anyhow::Error),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    // Grid module errors
    #[error("{0}")]
    RangeError(#[from] crate::grid::range::RangeError),

    // Loader module errors
    #[error("{0}")]
    LoaderError(#[from] crate::loader::LoaderError),

    // Parse module errors
    #[error("{0}")]
    ParseError(#[from] crate::parse::ParseError),

    // Table module errors
    #[error("{0}")]
    UnknownColumnError(#[from] crate::table::UnknownColumnError),

    // Schema module errors
    #[error("{0}")]
    SchemaError(#[from] crate::schema::SchemaError),
}

pub trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, SheetBlocksError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| SheetBlocksError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParseError;

    #[test]
    fn with_prefix_wraps_the_message() {
        let result: Result<(), SheetBlocksError> = Err(ParseError::MissingSpecField {
            field: "end_flag",
        }
        .into());
        let message = result.with_prefix("parsing 'Tbl1'").unwrap_err().to_string();
        assert_eq!(message, "parsing 'Tbl1': Missing parse specification field 'end_flag'");
    }
}
