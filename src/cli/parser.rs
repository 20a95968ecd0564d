use crate::config::BackendKind;
use crate::export::ExportFormat;
use crate::models::Granularity;
use clap::{Parser, Subcommand};

/// Command-line interface definition for attendlog
#[derive(Parser)]
#[command(
    name = "attendlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record attendance check-ins and check-outs into a CSV or SQLite ledger",
    long_about = None
)]
pub struct Cli {
    /// Override the store location (SQLite file, or CSV directory with --backend csv)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the storage backend
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<BackendKind>,

    /// Override the period covered by one ledger segment
    #[arg(global = true, long = "period", value_enum)]
    pub period: Option<Granularity>,

    /// Override the roster file
    #[arg(global = true, long = "roster")]
    pub roster: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin the clock ("YYYY-MM-DD HH:MM[:SS]", in the configured offset)
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration, the store and the roster file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Check a person in
    In {
        /// Name as it appears in the roster
        name: String,

        #[arg(long = "at", help = "Check-in time (HH:MM or HH:MM:SS), default now")]
        at: Option<String>,
    },

    /// Check a person out and record the time spent
    Out {
        /// Name as it appears in the roster
        name: String,

        #[arg(long = "at", help = "Check-out time (HH:MM or HH:MM:SS), default now")]
        at: Option<String>,
    },

    /// Show whether a person is checked in, or everyone still checked in
    Status {
        name: Option<String>,

        #[arg(long = "segment", help = "Segment to inspect (default: active one)")]
        segment: Option<String>,
    },

    /// List the records of a segment
    List {
        #[arg(long = "segment", help = "Segment to list (default: active one)")]
        segment: Option<String>,
    },

    /// Print the active segment name, or every known segment
    Segment {
        #[arg(long = "all", help = "List every segment in the store")]
        all: bool,
    },

    /// Print the merged roster
    Roster,

    /// Print the internal activity log
    Log {
        #[arg(long = "print", help = "Print the internal activity log")]
        print: bool,
    },

    /// Export one segment
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (absolute path)")]
        file: String,

        #[arg(long = "segment", help = "Segment to export (default: active one)")]
        segment: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite without asking")]
        force: bool,
    },
}
