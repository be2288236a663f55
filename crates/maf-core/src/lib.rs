//! maf-core: Core library for MAF mutation files and cBioPortal case lists
//!
//! This library provides functionality to:
//! - Read comment-prefixed, tab-delimited MAF files into raw rows
//! - Write rows back out with the original comment block and column order
//! - Project raw rows onto typed mutations without losing unknown columns
//! - Split mutations into called and uncalled outputs
//! - Build, load and extend case list files

pub mod caselist;
pub mod config;
pub mod error;
pub mod filter;
pub mod mutation;
pub mod reader;
pub mod split;
pub mod table;
pub mod writer;

pub use caselist::{derive_fields, merge_ids, parse_id_list, CaseList, CaseListType, DerivedFields};
pub use config::{CodecConfig, SplitConfig};
pub use error::{Error, Result};
pub use filter::{classify_and_update, is_uncalled};
pub use mutation::{FieldUse, Mutation, MUTATION_FIELDS, UNCALLED_STATUS};
pub use reader::{parse_comments, parse_header, MafReader};
pub use split::{split_uncalled, split_uncalled_files, SplitSummary};
pub use table::{make_record, CommentBlock, Header, RawRecord};
pub use writer::{project_row, write_comments, write_header, MafWriter};
