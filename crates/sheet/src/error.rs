use thiserror::Error;

/// Errors that can occur while loading or querying a workbook
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid cell reference: '{0}'")]
    InvalidReference(String),

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Index out of range: row {row}, col {col} in sheet '{sheet}'")]
    IndexOutOfRange {
        sheet: String,
        row: isize,
        col: isize,
    },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Sheet already exists: {name}")]
    DuplicateSheet { name: String },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    pub(crate) fn out_of_range(sheet: &str, row: usize, col: usize) -> Self {
        QueryError::IndexOutOfRange {
            sheet: sheet.to_string(),
            row: row as isize,
            col: col as isize,
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
