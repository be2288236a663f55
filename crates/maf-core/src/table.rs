//! Core table types shared by the MAF reader and writer

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One data row keyed by column name
///
/// Output column order comes from the [`Header`], never from this map.
pub type RawRecord = BTreeMap<String, String>;

/// Ordered column names of a MAF file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Create a header from column names
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the header has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over column names
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}

/// Lines that precede the header, kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentBlock {
    lines: Vec<String>,
}

impl CommentBlock {
    /// Create a comment block from raw lines (marker included)
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The raw lines in file order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

/// Zip a row's values positionally against the header
///
/// `line` is only used for the error message.
pub fn make_record(header: &Header, values: &[&str], line: u64) -> Result<RawRecord> {
    if values.len() != header.len() {
        return Err(Error::ColumnCount {
            line,
            expected: header.len(),
            found: values.len(),
        });
    }

    Ok(header
        .iter()
        .zip(values)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect())
}
