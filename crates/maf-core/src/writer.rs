//! Writer for comment-prefixed, tab-delimited MAF files

use crate::config::CodecConfig;
use crate::error::Result;
use crate::table::{CommentBlock, Header};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

/// Write comment lines verbatim, one per line
pub fn write_comments<W: Write>(stream: &mut W, comments: &CommentBlock) -> Result<()> {
    for line in comments.lines() {
        writeln!(stream, "{}", line)?;
    }
    Ok(())
}

/// Write the header row
pub fn write_header<W: Write>(stream: &mut W, header: &Header, config: &CodecConfig) -> Result<()> {
    let mut writer = csv_writer(stream, config);
    writer.write_record(header.iter())?;
    writer.flush()?;
    Ok(())
}

/// Lay out a mapping in header order
///
/// Columns missing from the mapping become empty strings. Keys that are
/// not header columns are dropped.
pub fn project_row(header: &Header, mapping: &BTreeMap<String, String>) -> Vec<String> {
    header
        .iter()
        .map(|column| mapping.get(column).cloned().unwrap_or_default())
        .collect()
}

fn csv_writer<W: Write>(stream: W, config: &CodecConfig) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(config.delimiter)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(stream)
}

/// Row writer that has already emitted its comment block and header
pub struct MafWriter<W: Write> {
    header: Header,
    config: CodecConfig,
    stream: W,
}

impl<W: Write> MafWriter<W> {
    /// Create a writer, writing the comment block and header immediately
    pub fn new(mut stream: W, comments: &CommentBlock, header: Header, config: &CodecConfig) -> Result<Self> {
        write_comments(&mut stream, comments)?;
        write_header(&mut stream, &header, config)?;

        debug!(
            comments = comments.len(),
            columns = header.len(),
            "wrote MAF preamble"
        );
        Ok(Self {
            header,
            config: *config,
            stream,
        })
    }

    /// Header every row is laid out against
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Write one row of values and flush it
    pub fn write_row<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let values: Vec<S> = values.into_iter().collect();

        // csv writes a lone empty field as `""`; here it is an empty line
        if let [only] = values.as_slice() {
            if only.as_ref().is_empty() {
                self.stream.write_all(b"\n")?;
                self.stream.flush()?;
                return Ok(());
            }
        }

        let mut writer = csv_writer(&mut self.stream, &self.config);
        writer.write_record(&values)?;
        writer.flush()?;
        Ok(())
    }

    /// Project a mapping onto the header and write it
    pub fn write_record(&mut self, mapping: &BTreeMap<String, String>) -> Result<()> {
        let values = project_row(&self.header, mapping);
        self.write_row(&values)
    }

    /// Recover the underlying stream
    pub fn into_inner(mut self) -> Result<W> {
        self.stream.flush()?;
        Ok(self.stream)
    }
}
