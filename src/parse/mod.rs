//! Block-parsing engine: declarative specifications plus the boundary
//! scanner and the two layout parsers driven by them.
//!
//! A specification describes where repeated blocks of data live inside a raw
//! grid. Two layouts exist: row-major (blocks are vertical spans of rows,
//! located by start/end flag cells) and interleaved-column (a metadata band
//! followed by repeating groups of columns, one group per block). Each layout
//! has its own specification type with required fields enforced at
//! construction, so an incomplete specification fails before any grid is
//! touched rather than mid-parse.

pub mod block_id;
pub mod boundary;
pub mod interleaved;
pub mod row_major;

use crate::grid::Value;
use thiserror::Error;

/// Errors raised while building a specification or parsing blocks with one.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A required specification field was never set.
    #[error("Missing parse specification field '{field}'")]
    MissingSpecField { field: &'static str },

    /// No row matched an end-bound flag, even after the synthetic blank
    /// terminator row. The block that started at `start_row` cannot be closed.
    #[error("No end boundary '{flag}' found in column {col} at or after row {from_row} (block start row {start_row})")]
    BoundaryNotFound {
        flag: String,
        col: usize,
        from_row: usize,
        start_row: usize,
    },
}

/// End-of-block marker: either a literal flag value or "first blank cell".
#[derive(Clone, Debug, PartialEq)]
pub enum EndFlag {
    /// The block ends at the first blank cell of the end-bound column.
    Blank,
    /// The block ends at the first cell equal to this value.
    Value(Value),
}

impl EndFlag {
    /// Human-readable form for error messages.
    fn describe(&self) -> String {
        match self {
            Self::Blank => "<blank>".to_owned(),
            Self::Value(value) => value.to_string(),
        }
    }
}

impl From<Value> for EndFlag {
    /// Normalizes the `"<blank>"` sentinel text to [`EndFlag::Blank`].
    fn from(value: Value) -> Self {
        match value.as_text() {
            Some("<blank>") => Self::Blank,
            _ => Self::Value(value),
        }
    }
}

/// One block-ID declaration: a scalar fixed at
/// `(block data start + row_offset, col)` to inject as a constant column.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockIdVar {
    /// Name of the injected column
    pub name: String,
    /// Row offset from the block's first data row; negative offsets address
    /// the flag/header rows above it
    pub row_offset: isize,
    /// Absolute column index in the raw grid
    pub col: usize,
}

impl BlockIdVar {
    pub fn new<S: Into<String>>(name: S, row_offset: isize, col: usize) -> Self {
        Self {
            name: name.into(),
            row_offset,
            col,
        }
    }
}

/// Specification for the row-major layout: repeated vertical blocks located
/// by a start flag, closed by an end flag, each carrying its own header row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowMajorSpec {
    /// Value marking a block start
    pub start_flag: Value,
    /// Column scanned for the start flag
    pub start_col: usize,
    /// Value (or blank) marking the end of a block's data
    pub end_flag: EndFlag,
    /// Column scanned for the end flag
    pub end_col: usize,
    /// Offset from a block's start row to its header row
    pub header_row_offset: usize,
    /// Offset from a block's start row to its first data row
    pub data_row_offset: usize,
    /// Scalar metadata positions injected as constant columns, possibly empty
    pub block_id_vars: Vec<BlockIdVar>,
}

impl RowMajorSpec {
    pub fn builder() -> RowMajorSpecBuilder {
        RowMajorSpecBuilder::default()
    }
}

/// Builder enforcing the required row-major fields at construction.
#[derive(Clone, Debug, Default)]
pub struct RowMajorSpecBuilder {
    start_flag: Option<Value>,
    start_col: Option<usize>,
    end_flag: Option<EndFlag>,
    end_col: Option<usize>,
    header_row_offset: Option<usize>,
    data_row_offset: Option<usize>,
    block_id_vars: Vec<BlockIdVar>,
}

impl RowMajorSpecBuilder {
    /// Value and column marking block starts.
    pub fn start_bound(mut self, flag: impl Into<Value>, col: usize) -> Self {
        self.start_flag = Some(flag.into());
        self.start_col = Some(col);
        self
    }

    /// Value and column marking block ends; `"<blank>"` text means the first
    /// blank cell in the column.
    pub fn end_bound(mut self, flag: impl Into<Value>, col: usize) -> Self {
        self.end_flag = Some(EndFlag::from(flag.into()));
        self.end_col = Some(col);
        self
    }

    /// Offset from a block's start row to its header row.
    pub fn header_row_offset(mut self, offset: usize) -> Self {
        self.header_row_offset = Some(offset);
        self
    }

    /// Offset from a block's start row to its first data row.
    pub fn data_row_offset(mut self, offset: usize) -> Self {
        self.data_row_offset = Some(offset);
        self
    }

    /// Declares one block-ID variable. May be called repeatedly; the built
    /// [`RowMajorSpec`] carries them in declaration order.
    pub fn block_id_var(mut self, name: impl Into<String>, row_offset: isize, col: usize) -> Self {
        self.block_id_vars.push(BlockIdVar::new(name, row_offset, col));
        self
    }

    /// Declares several block-ID variables at once.
    pub fn block_id_vars<I: IntoIterator<Item = BlockIdVar>>(mut self, vars: I) -> Self {
        self.block_id_vars.extend(vars);
        self
    }

    pub fn build(self) -> Result<RowMajorSpec, ParseError> {
        Ok(RowMajorSpec {
            start_flag: self.start_flag.ok_or(ParseError::MissingSpecField {
                field: "start_flag",
            })?,
            start_col: self.start_col.ok_or(ParseError::MissingSpecField {
                field: "start_col",
            })?,
            end_flag: self.end_flag.ok_or(ParseError::MissingSpecField { field: "end_flag" })?,
            end_col: self.end_col.ok_or(ParseError::MissingSpecField { field: "end_col" })?,
            header_row_offset: self.header_row_offset.ok_or(ParseError::MissingSpecField {
                field: "header_row_offset",
            })?,
            data_row_offset: self.data_row_offset.ok_or(ParseError::MissingSpecField {
                field: "data_row_offset",
            })?,
            block_id_vars: self.block_id_vars,
        })
    }
}

/// Specification for the interleaved-column layout: a band of metadata
/// columns followed by repeating fixed-width column groups, one per block.
#[derive(Clone, Debug, PartialEq)]
pub struct InterleavedSpec {
    /// First column of interest, allowing leading unused columns
    pub start_col: usize,
    /// Width of the metadata band preceding the column groups
    pub n_cols_metadata: usize,
    /// Number of columns per block group
    pub n_cols_block: usize,
}

impl InterleavedSpec {
    pub fn builder() -> InterleavedSpecBuilder {
        InterleavedSpecBuilder::default()
    }
}

/// Builder enforcing the required interleaved-layout fields at construction.
#[derive(Clone, Debug, Default)]
pub struct InterleavedSpecBuilder {
    start_col: usize,
    n_cols_metadata: Option<usize>,
    n_cols_block: Option<usize>,
}

impl InterleavedSpecBuilder {
    /// First column of interest; defaults to 0.
    pub fn start_col(mut self, col: usize) -> Self {
        self.start_col = col;
        self
    }

    /// Width of the metadata band.
    pub fn n_cols_metadata(mut self, count: usize) -> Self {
        self.n_cols_metadata = Some(count);
        self
    }

    /// Number of columns per block group.
    pub fn n_cols_block(mut self, count: usize) -> Self {
        self.n_cols_block = Some(count);
        self
    }

    pub fn build(self) -> Result<InterleavedSpec, ParseError> {
        Ok(InterleavedSpec {
            start_col: self.start_col,
            n_cols_metadata: self.n_cols_metadata.ok_or(ParseError::MissingSpecField {
                field: "n_cols_metadata",
            })?,
            // A zero-width block group can never advance the scan
            n_cols_block: self
                .n_cols_block
                .filter(|count| *count > 0)
                .ok_or(ParseError::MissingSpecField {
                    field: "n_cols_block",
                })?,
        })
    }
}

/// How a table's raw grids turn into rows: not at all (already structured),
/// row-major blocks, or interleaved column blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ParseLayout {
    /// First row is the header, remaining rows are data
    #[default]
    None,
    RowMajor(RowMajorSpec),
    Interleaved(InterleavedSpec),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_flag_blank_sentinel() {
        assert_eq!(EndFlag::from(Value::from("<blank>")), EndFlag::Blank);
        assert_eq!(
            EndFlag::from(Value::from("Total")),
            EndFlag::Value(Value::from("Total"))
        );
    }

    #[test]
    fn row_major_builder_requires_bounds() {
        let err = RowMajorSpec::builder()
            .start_bound("Respondent", 0)
            .header_row_offset(1)
            .data_row_offset(2)
            .build()
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingSpecField { field: "end_flag" }));
    }

    #[test]
    fn row_major_builder_collects_id_vars() {
        let spec = RowMajorSpec::builder()
            .start_bound("Respondent", 0)
            .end_bound("<blank>", 0)
            .header_row_offset(1)
            .data_row_offset(2)
            .block_id_var("survey", 0, 3)
            .block_id_vars([BlockIdVar::new("wave", 1, 3)])
            .build()
            .unwrap();
        assert_eq!(spec.end_flag, EndFlag::Blank);
        assert_eq!(spec.block_id_vars.len(), 2);
        assert_eq!(spec.block_id_vars[0].name, "survey");
    }

    #[test]
    fn interleaved_builder_requires_widths() {
        let err = InterleavedSpec::builder().n_cols_metadata(2).build().unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingSpecField {
                field: "n_cols_block"
            }
        ));
    }
}
