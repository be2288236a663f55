//! Reader for comment-prefixed, tab-delimited MAF files
//!
//! A MAF file is read in three passes over fresh handles: one for the
//! comment block, one for the header and one for the rows. The row pass
//! skips comment lines and the header row itself.

use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::table::{make_record, CommentBlock, Header, RawRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Collect the leading comment lines of a stream
///
/// Stops at the first line that does not start with the comment marker.
/// Anything after that point is left unread as far as this pass cares;
/// reading the header needs a fresh handle.
pub fn parse_comments<R: BufRead>(stream: R, config: &CodecConfig) -> Result<CommentBlock> {
    let mut comments = CommentBlock::default();

    for line in stream.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if !config.is_comment(line) {
            break;
        }
        comments.push(line.to_string());
    }

    debug!(count = comments.len(), "parsed comment block");
    Ok(comments)
}

/// Read the first non-comment record of a stream as the header
pub fn parse_header<R: Read>(stream: R, config: &CodecConfig) -> Result<Header> {
    let mut reader = csv_reader(stream, config);
    let mut record = csv::StringRecord::new();

    if !reader.read_record(&mut record)? {
        return Err(Error::MissingHeader);
    }

    let header = Header::new(record.iter());
    debug!(columns = header.len(), "parsed header");
    Ok(header)
}

fn csv_reader<R: Read>(stream: R, config: &CodecConfig) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(config.delimiter)
        .comment(Some(config.comment))
        .quoting(false)
        .flexible(true) // Column counts are checked against the header ourselves
        .from_reader(stream)
}

/// Row-by-row reader yielding [`RawRecord`]s
pub struct MafReader<R: Read> {
    comments: CommentBlock,
    header: Header,
    reader: csv::Reader<R>,
    record: csv::StringRecord,
}

impl<R: Read> MafReader<R> {
    /// Create a reader over the row pass of a file
    ///
    /// The stream must start at the beginning of the file; its header row is
    /// consumed here and must match `header`.
    pub fn new(stream: R, comments: CommentBlock, header: Header, config: &CodecConfig) -> Result<Self> {
        let mut reader = csv_reader(stream, config);
        let mut record = csv::StringRecord::new();

        if !reader.read_record(&mut record)? {
            return Err(Error::MissingHeader);
        }

        let found: Vec<&str> = record.iter().collect();
        if found != header.iter().collect::<Vec<_>>() {
            return Err(Error::HeaderMismatch {
                expected: header.columns().to_vec(),
                found: found.into_iter().map(String::from).collect(),
            });
        }

        Ok(Self {
            comments,
            header,
            reader,
            record,
        })
    }

    /// Comment block handed to this reader
    pub fn comments(&self) -> &CommentBlock {
        &self.comments
    }

    /// Header shared by every row of this reader
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Read the next row
    ///
    /// Returns `Ok(None)` once the stream is exhausted.
    pub fn read_row(&mut self) -> Result<Option<RawRecord>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }

        let line = self.record.position().map_or(0, |p| p.line());
        let values: Vec<&str> = self.record.iter().collect();
        make_record(&self.header, &values, line).map(Some)
    }
}

impl MafReader<BufReader<File>> {
    /// Open a MAF file, parsing its comments and header from their own handles
    pub fn from_path<P: AsRef<Path>>(path: P, config: &CodecConfig) -> Result<Self> {
        let path = path.as_ref();

        let comments = parse_comments(BufReader::new(open(path)?), config)?;
        let header = parse_header(BufReader::new(open(path)?), config)?;

        debug!(
            path = %path.display(),
            comments = comments.len(),
            columns = header.len(),
            "opened MAF file"
        );
        Self::new(BufReader::new(open(path)?), comments, header, config)
    }
}

impl<R: Read> Iterator for MafReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "#comment 1\n#comment2\nFoo\tBar\tBaz\n1\t2\t3\n";

    const ROWS: &str = "# comment1\n# comment2\n\
        SampleID\tFoo\tBar\tRefCount\tAltCount\n\
        Sample1\ta\tb\t30\t100\n\
        Sample2\tx\ty\t25\t250\n\
        Sample3\tzz\tyy\t375\t0\n";

    fn open_str(content: &str) -> MafReader<&[u8]> {
        let config = CodecConfig::default();
        let comments = parse_comments(content.as_bytes(), &config).unwrap();
        let header = parse_header(content.as_bytes(), &config).unwrap();
        MafReader::new(content.as_bytes(), comments, header, &config).unwrap()
    }

    #[test]
    fn test_parse_comments() {
        let comments = parse_comments(SAMPLE.as_bytes(), &CodecConfig::default()).unwrap();
        assert_eq!(comments.lines(), ["#comment 1", "#comment2"]);
    }

    #[test]
    fn test_parse_comments_stops_at_first_data_line() {
        let content = "#a\nFoo\tBar\n#late\n1\t2\n";
        let comments = parse_comments(content.as_bytes(), &CodecConfig::default()).unwrap();
        assert_eq!(comments.lines(), ["#a"]);
    }

    #[test]
    fn test_parse_comments_custom_marker() {
        let content = "@meta\n#not a comment\nFoo\n";
        let comments = parse_comments(content.as_bytes(), &CodecConfig::with_comment(b'@')).unwrap();
        assert_eq!(comments.lines(), ["@meta"]);
    }

    #[test]
    fn test_parse_header() {
        let header = parse_header(SAMPLE.as_bytes(), &CodecConfig::default()).unwrap();
        assert_eq!(header.columns(), ["Foo", "Bar", "Baz"]);
    }

    #[test]
    fn test_parse_header_empty_input() {
        let err = parse_header("#only comments\n".as_bytes(), &CodecConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingHeader));
    }

    #[test]
    fn test_read_rows() {
        let mut reader = open_str(ROWS);
        assert_eq!(reader.comments().lines(), ["# comment1", "# comment2"]);
        assert_eq!(
            reader.header().columns(),
            ["SampleID", "Foo", "Bar", "RefCount", "AltCount"]
        );

        let first = reader.read_row().unwrap().unwrap();
        assert_eq!(first["SampleID"], "Sample1");
        assert_eq!(first["RefCount"], "30");
        assert_eq!(first["AltCount"], "100");

        let second = reader.read_row().unwrap().unwrap();
        assert_eq!(second["Foo"], "x");
        assert_eq!(second["Bar"], "y");

        let third = reader.read_row().unwrap().unwrap();
        assert_eq!(third["AltCount"], "0");

        assert!(reader.read_row().unwrap().is_none());
        assert!(reader.read_row().unwrap().is_none());
    }

    #[test]
    fn test_iterate_rows() {
        let rows: Vec<RawRecord> = open_str(ROWS).collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["SampleID"], "Sample3");
        assert_eq!(rows[2]["RefCount"], "375");
    }

    #[test]
    fn test_short_row_is_an_error() {
        let content = "Foo\tBar\n1\t2\n3\n";
        let mut reader = open_str(content);

        assert!(reader.read_row().unwrap().is_some());
        let err = reader.read_row().unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnCount {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_quotes_are_literal() {
        let content = "Foo\tBar\n\"a\tb\"\n";
        let mut reader = open_str(content);
        let row = reader.read_row().unwrap().unwrap();
        assert_eq!(row["Foo"], "\"a");
        assert_eq!(row["Bar"], "b\"");
    }

    #[test]
    fn test_header_mismatch() {
        let config = CodecConfig::default();
        let err = MafReader::new(
            "Foo\tBar\n1\t2\n".as_bytes(),
            CommentBlock::default(),
            Header::new(["Foo", "Baz"]),
            &config,
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::HeaderMismatch { .. }));
    }
}
