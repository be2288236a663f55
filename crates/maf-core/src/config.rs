//! Codec and split configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default comment marker for MAF files
pub const DEFAULT_COMMENT: u8 = b'#';

/// Default column delimiter for MAF files
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Default output directory for the split command
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default file name for called mutations
pub const DEFAULT_CALLED_FILENAME: &str = "data_mutations_extended.txt";

/// Default file name for uncalled mutations
pub const DEFAULT_UNCALLED_FILENAME: &str = "data_mutations_uncalled.txt";

/// Delimiter and comment marker, fixed for the lifetime of a reader or writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Column delimiter
    pub delimiter: u8,
    /// Leading character that marks a comment line
    pub comment: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            comment: DEFAULT_COMMENT,
        }
    }
}

impl CodecConfig {
    /// Default config with a different comment marker
    pub fn with_comment(comment: u8) -> Self {
        Self {
            comment,
            ..Self::default()
        }
    }

    /// Check whether a line starts with the comment marker
    pub fn is_comment(&self, line: &str) -> bool {
        line.as_bytes().first() == Some(&self.comment)
    }
}

/// Where the split pipeline writes its two outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Directory that receives both output files
    pub output_dir: PathBuf,
    /// File name for called mutations
    pub called_filename: String,
    /// File name for uncalled mutations
    pub uncalled_filename: String,
    /// Codec settings shared by the reader and both writers
    pub codec: CodecConfig,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            called_filename: DEFAULT_CALLED_FILENAME.to_string(),
            uncalled_filename: DEFAULT_UNCALLED_FILENAME.to_string(),
            codec: CodecConfig::default(),
        }
    }
}

impl SplitConfig {
    /// Default file names under the given directory
    pub fn in_dir<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Full path of the called-mutations file
    pub fn called_path(&self) -> PathBuf {
        self.output_dir.join(&self.called_filename)
    }

    /// Full path of the uncalled-mutations file
    pub fn uncalled_path(&self) -> PathBuf {
        self.output_dir.join(&self.uncalled_filename)
    }
}
