//! Command-line front-end for the `fiver` version store.
//!
//! Parses arguments, wires global flags (`-v`/`-q`, `--storage`) into
//! [`logging`] and the working storage root, and dispatches to
//! [`commands`]. The core (`delta`, `store`) has no knowledge of argument
//! parsing, output formatting, or process exit codes; all of that lives
//! here.
#![deny(rustdoc::broken_intra_doc_links)]

mod commands;
mod error;
mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::CliError;
pub use format::OutputFormat;


/// A content-dependent delta version store for arbitrary byte streams.
#[derive(Debug, Parser)]
#[command(name = "fiver", version, about)]
pub struct Cli {
    /// Increase verbosity; repeatable (-v, -vv).
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity; repeatable.
    #[arg(short = 'q', long = "quiet", global = true, action = clap::ArgAction::Count)]
    quiet: u8,

    /// Root directory the version store is kept under.
    #[arg(
        long,
        global = true,
        env = "FIVER_STORAGE_DIR",
        default_value = "./fiver_storage"
    )]
    storage: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Track a new version of a file.
    Track {
        file: PathBuf,
        /// Message describing this version.
        #[arg(short = 'm', long)]
        message: Option<String>,
    },
    /// Restore a file to a specific version.
    Restore {
        file: PathBuf,
        #[arg(long)]
        version: u32,
        /// Destination path; defaults to `<file>.v<version>`.
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Show the operation stream recorded for a version.
    Diff {
        file: PathBuf,
        #[arg(long)]
        version: u32,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show a file's version history.
    History {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Only show the last N versions.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List every tracked logical name.
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show a file's current tracking status.
    Status {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Delete the tail version of a file's chain.
    Delete {
        file: PathBuf,
        #[arg(long)]
        version: u32,
    },
}

impl Cli {
    /// Runs the parsed command, after installing the logging subscriber.
    pub fn run(self) -> Result<(), CliError> {
        let level = i8::try_from(self.verbose).unwrap_or(i8::MAX)
            - i8::try_from(self.quiet).unwrap_or(i8::MAX);
        logging::init(logging::VerbosityConfig::new(level));

        match self.command {
            Command::Track { file, message } => {
                commands::track(&self.storage, &file, message.as_deref())
            }
            Command::Restore { file, version, output } => {
                commands::restore(&self.storage, &file, version, output)
            }
            Command::Diff { file, version, format } => {
                commands::diff(&self.storage, &file, version, format)
            }
            Command::History { file, format, limit } => {
                commands::history(&self.storage, &file, format, limit)
            }
            Command::List { format } => commands::list(&self.storage, format),
            Command::Status { file, json } => commands::status(&self.storage, &file, json),
            Command::Delete { file, version } => commands::delete(&self.storage, &file, version),
        }
    }
}
