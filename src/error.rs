use std::fmt;

/// Why a sample cannot produce a defined line or correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// Every x value is identical, so the slope is undefined.
    ConstantX,
    /// Every y value is identical, so the correlation is undefined.
    ConstantY,
}

impl fmt::Display for Degeneracy {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::ConstantX => write!(f, "all x values are identical"),
            Degeneracy::ConstantY => write!(f, "all y values are identical"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("insufficient data: {0} valid pairs, at least 2 are required")]
    InsufficientData(usize),
    #[error("degenerate input: {0}")]
    DegenerateInput(Degeneracy),
    #[error("fitted line is not representable as finite floating point values")]
    NonFiniteResult,
    #[error("unequal column lengths")]
    UnequalColumnLengths,
    #[error("non-finite value at index {0}")]
    NonFiniteValue(usize),
    #[error("no file name")]
    NoFileName,
    #[error("No file extension")]
    NoFileExtension,
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("empty file")]
    EmptyFile,
    #[error("incomplete file, line {0} does not match the header")]
    IncompleteFile(usize),
    #[error("column name {0} not found")]
    ColumnNameNotFound(String),
    #[error("column {0} is not a numeric column")]
    NonNumericColumn(String),
    #[error("no numeric columns")]
    NoNumericColumns,
    #[error("no explanatory columns")]
    NoExplanatoryColumns,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether the error comes from the data itself rather than from reading it. The
    /// presentation layer should decline to draw a plot or show a prediction form.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::InsufficientData(_)
                | Error::DegenerateInput(_)
                | Error::NonFiniteResult
                | Error::NoNumericColumns
                | Error::NoExplanatoryColumns
        )
    }
}
