//! CLI argument definitions for the internship importer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use intern_reconcile::ReconcileMode;

#[derive(Parser)]
#[command(
    name = "internship-import",
    version,
    about = "Import internship tracking workbooks into a year-partitioned store",
    long_about = "Import internship tracking workbooks into a year-partitioned store.\n\n\
                  Reads .xlsx/.xls/.ods, .csv and JSON sheet maps, extracts students,\n\
                  companies and supervisors per academic year, and reconciles them\n\
                  against previously imported data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow student names and CIN values in trace output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

/// Import settings shared by every command; flags win over the config file.
#[derive(Args, Clone, Default)]
pub struct SettingsArgs {
    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory of the document store.
    #[arg(long = "store", value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Records per bulk write.
    #[arg(long = "chunk-size", value_name = "N", global = true)]
    pub chunk_size: Option<usize>,

    /// Year for sheets whose name carries none.
    #[arg(long = "fallback-year", value_name = "YEAR", global = true)]
    pub fallback_year: Option<i32>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a workbook and print what it contains, without touching the store.
    Parse(ParseArgs),

    /// Parse a workbook and reconcile it into the store.
    Import(ImportArgs),

    /// Print analytics computed from the store.
    Stats(StatsArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Workbook file (.xlsx, .xls, .ods, .csv or .json).
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Also write the parsed records as JSON.
    #[arg(long = "json", value_name = "OUT")]
    pub json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Workbook file (.xlsx, .xls, .ods, .csv or .json).
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Match incoming records against stored ones (upsert) or only insert.
    #[arg(long = "mode", value_enum, default_value = "upsert")]
    pub mode: ModeArg,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Restrict the statistics to one academic year.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<String>,

    /// Number of companies in the ranking.
    #[arg(long = "limit", value_name = "N", default_value_t = 10)]
    pub limit: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Upsert,
    Insert,
}

impl From<ModeArg> for ReconcileMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Upsert => ReconcileMode::Upsert,
            ModeArg::Insert => ReconcileMode::Insert,
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
