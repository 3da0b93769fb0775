//! CLI argument definitions for `dbdes-diff`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dbdes_model::DEFAULT_NAMESPACE;
use dbdes_report::{DEFAULT_REPORT_FILE, ReportFormat};

#[derive(Parser)]
#[command(
    name = "dbdes-diff",
    version,
    about = "Compare Table attributes between two database-description XML files",
    long_about = "Compare the Table elements of two database-description XML files.\n\n\
                  Reports tables present in only one file and tables whose Category,\n\
                  SubCategory, or Product attributes differ."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two documents and write a difference report.
    Compare(CompareArgs),

    /// List the tables extracted from one document.
    Tables(TablesArgs),
}

#[derive(Parser)]
pub struct CompareArgs {
    /// First document.
    #[arg(value_name = "FILE1", env = "DBDES_FILE1")]
    pub file1: PathBuf,

    /// Second document.
    #[arg(value_name = "FILE2", env = "DBDES_FILE2")]
    pub file2: PathBuf,

    /// Namespace URI of Table elements.
    #[arg(long = "namespace", value_name = "URI", env = "DBDES_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Report destination, relative to the working directory.
    #[arg(long = "output", short = 'o', value_name = "PATH", env = "DBDES_OUTPUT", default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ReportFormatArg,

    /// Exit with status 2 when differences are found.
    #[arg(long = "fail-on-differences")]
    pub fail_on_differences: bool,
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Document to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Namespace URI of Table elements.
    #[arg(long = "namespace", value_name = "URI", env = "DBDES_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Text,
    Json,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(value: ReportFormatArg) -> Self {
        match value {
            ReportFormatArg::Text => ReportFormat::Text,
            ReportFormatArg::Json => ReportFormat::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
