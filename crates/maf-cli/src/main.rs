//! MAF CLI
//!
//! Command-line tool for splitting uncalled mutations out of a MAF file and
//! for building and updating cBioPortal case list files.

use clap::{Parser, Subcommand};
use maf_core::config::{
    CodecConfig, DEFAULT_CALLED_FILENAME, DEFAULT_OUTPUT_DIR, DEFAULT_UNCALLED_FILENAME,
};
use maf_core::{parse_id_list, split_uncalled_files, CaseList, CaseListType, SplitConfig};
use std::fs::{self, File};
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod logging;

use crate::logging::{init_logging, LogConfig};

#[derive(Parser)]
#[command(name = "maf-cli")]
#[command(about = "MAF mutation and case list utilities", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a new case list
    NewCaseList {
        /// Case list type: all, cnaseq, cna or seq
        case_list_type: CaseListType,

        /// Cancer study identifier
        study_id: String,

        /// Comma-separated sample ids
        ids: String,
    },

    /// Print a case list file with extra sample ids merged in
    UpdateCaseList {
        /// Path to the case list file
        input: PathBuf,

        /// Comma-separated sample ids to add
        ids: String,
    },

    /// Split a mutations file into called and uncalled mutations
    FilterUncalled {
        /// Path to the input mutations file
        input: PathBuf,

        /// Directory for the output files (created if missing)
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Output file name for called mutations
        #[arg(long, default_value = DEFAULT_CALLED_FILENAME)]
        muts_filename: String,

        /// Output file name for uncalled mutations
        #[arg(long, default_value = DEFAULT_UNCALLED_FILENAME)]
        uncalled_filename: String,

        /// Comment marker for leading comment lines
        #[arg(long, default_value_t = '#')]
        comment_char: char,

        /// Print a JSON summary of the split to stdout
        #[arg(long)]
        summary: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet);
    log_config.with_ansi = io::stderr().is_terminal();
    init_logging(&log_config);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> maf_core::Result<()> {
    match command {
        Commands::NewCaseList {
            case_list_type,
            study_id,
            ids,
        } => cmd_new_case_list(case_list_type, &study_id, &ids),
        Commands::UpdateCaseList { input, ids } => cmd_update_case_list(&input, &ids),
        Commands::FilterUncalled {
            input,
            output_dir,
            muts_filename,
            uncalled_filename,
            comment_char,
            summary,
        } => {
            let comment = u8::try_from(comment_char).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("comment marker '{}' is not a single byte", comment_char),
                )
            })?;
            let config = SplitConfig {
                output_dir,
                called_filename: muts_filename,
                uncalled_filename,
                codec: CodecConfig::with_comment(comment),
            };
            cmd_filter_uncalled(&input, &config, summary)
        }
    }
}

fn cmd_new_case_list(case_list_type: CaseListType, study_id: &str, ids: &str) -> maf_core::Result<()> {
    let ids = parse_id_list(ids);
    let case_list = CaseList::new(study_id, &ids, case_list_type);
    debug!(study_id, %case_list_type, ids = case_list.ids().len(), "built case list");

    case_list.write_to(&mut io::stdout().lock())
}

fn cmd_update_case_list(input: &Path, ids: &str) -> maf_core::Result<()> {
    let file = File::open(input).map_err(|e| maf_core::Error::FileOpen {
        path: input.to_path_buf(),
        source: e,
    })?;

    let mut case_list = CaseList::read_from(BufReader::new(file))?;
    let before = case_list.ids().len();
    case_list.add_ids(&parse_id_list(ids));
    debug!(
        path = %input.display(),
        added = case_list.ids().len() - before,
        "updated case list"
    );

    case_list.write_to(&mut io::stdout().lock())
}

fn cmd_filter_uncalled(input: &Path, config: &SplitConfig, print_summary: bool) -> maf_core::Result<()> {
    fs::create_dir_all(&config.output_dir)?;
    info!(output_dir = %config.output_dir.display(), "writing split outputs");

    let summary = split_uncalled_files(input, config)?;

    if print_summary {
        println!("{}", summary.to_json()?);
    }
    Ok(())
}
