//! Error types for maf-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in maf-core
///
/// None of these are recovered inside the library; they are handed back to
/// the caller, which decides how the run ends.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to open an input file
    #[error("failed to open file '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output file
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input ended before a header row was found
    #[error("no header row found")]
    MissingHeader,

    /// The row-pass header differs from the header handed to the reader
    #[error("header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A data row does not have one value per header column
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A line that cannot be split into a key and a value
    #[error("line {line}: malformed line '{content}'")]
    MalformedLine { line: usize, content: String },

    /// A required case list field is absent
    #[error("required field '{0}' is missing")]
    MissingField(String),

    /// Unknown case list type tag
    #[error("invalid case list type '{0}', use one of 'all', 'cna', 'seq', or 'cnaseq'")]
    InvalidCaseListType(String),

    /// Unknown case list category
    #[error("unknown case list category '{0}'")]
    UnknownCaseListCategory(String),

    /// A stored case list field disagrees with the value derived from its type
    #[error("case list field '{field}' is '{found}', expected '{expected}'")]
    CaseListMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// A count field holds something other than a non-negative integer
    #[error("field '{field}': '{value}' is not a non-negative integer")]
    InvalidInteger { field: String, value: String },

    /// A flag field holds something other than a boolean token
    #[error("field '{field}': '{value}' is not a boolean")]
    InvalidBool { field: String, value: String },

    /// Delimited text error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
