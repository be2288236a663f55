//! Split a mutations file into called and uncalled outputs

use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::filter::classify_and_update;
use crate::mutation::Mutation;
use crate::reader::MafReader;
use crate::writer::MafWriter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, trace};

/// Counts and destinations of a split run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Data rows read from the input
    pub rows: usize,
    /// Rows written to the called output
    pub called: usize,
    /// Rows written to the uncalled output
    pub uncalled: usize,
    /// Called output file, if written to disk
    pub called_path: Option<PathBuf>,
    /// Uncalled output file, if written to disk
    pub uncalled_path: Option<PathBuf>,
}

impl SplitSummary {
    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Route every row of `reader` to `called` or `uncalled`
///
/// Uncalled rows get their status set before they are written. Both writers
/// must have been built with the reader's comments and header.
pub fn split_uncalled<R, C, U>(
    reader: MafReader<R>,
    called: &mut MafWriter<C>,
    uncalled: &mut MafWriter<U>,
) -> Result<SplitSummary>
where
    R: Read,
    C: Write,
    U: Write,
{
    let mut summary = SplitSummary::default();

    for row in reader {
        let mut mutation = Mutation::from_record(row?)?;
        let is_uncalled = classify_and_update(&mut mutation);
        trace!(
            row = summary.rows,
            t_alt_count = mutation.t_alt_count,
            is_fillout = mutation.is_fillout,
            is_uncalled,
            "classified mutation"
        );

        let record = mutation.to_record();
        if is_uncalled {
            uncalled.write_record(&record)?;
            summary.uncalled += 1;
        } else {
            called.write_record(&record)?;
            summary.called += 1;
        }
        summary.rows += 1;
    }

    Ok(summary)
}

/// Split a mutations file into the two files named by `config`
///
/// The output directory must already exist.
pub fn split_uncalled_files<P: AsRef<Path>>(input: P, config: &SplitConfig) -> Result<SplitSummary> {
    let input = input.as_ref();
    let reader = MafReader::from_path(input, &config.codec)?;

    let called_path = config.called_path();
    let uncalled_path = config.uncalled_path();

    let mut called = MafWriter::new(
        create(&called_path)?,
        reader.comments(),
        reader.header().clone(),
        &config.codec,
    )?;
    let mut uncalled = MafWriter::new(
        create(&uncalled_path)?,
        reader.comments(),
        reader.header().clone(),
        &config.codec,
    )?;

    let mut summary = split_uncalled(reader, &mut called, &mut uncalled)?;

    called.into_inner()?.flush()?;
    uncalled.into_inner()?.flush()?;

    summary.called_path = Some(called_path);
    summary.uncalled_path = Some(uncalled_path);

    info!(
        input = %input.display(),
        rows = summary.rows,
        called = summary.called,
        uncalled = summary.uncalled,
        "split mutations"
    );
    Ok(summary)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| Error::FileCreate {
            path: path.to_path_buf(),
            source: e,
        })
}
