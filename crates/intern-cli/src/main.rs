//! Internship workbook importer.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use intern_cli::commands::{run_import, run_parse, run_stats};
use intern_cli::config::{ConfigOverrides, ImportConfig};
use intern_cli::logging::{LogConfig, LogFormat, init_logging};
use intern_cli::summary::{print_import_report, print_parse_summary, print_stats};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, SettingsArgs};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = import_config(&cli.settings)?;
    match cli.command {
        Command::Parse(args) => {
            let parsed = run_parse(&args.workbook, args.json.as_deref(), &config)?;
            print_parse_summary(&parsed);
            Ok(0)
        }
        Command::Import(args) => {
            let report = run_import(&args.workbook, args.mode.into(), &config).await?;
            print_import_report(&report);
            Ok(if report.has_failures() { 1 } else { 0 })
        }
        Command::Stats(args) => {
            let stats = run_stats(args.year.as_deref(), args.limit, &config).await?;
            print_stats(&stats);
            Ok(0)
        }
    }
}

fn import_config(settings: &SettingsArgs) -> Result<ImportConfig> {
    let overrides = ConfigOverrides {
        store_dir: settings.store.clone(),
        chunk_size: settings.chunk_size,
        fallback_year: settings.fallback_year,
    };
    Ok(ImportConfig::resolve(settings.config.as_deref(), overrides)?)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_ansi(with_ansi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "internship-import",
            "--log-level",
            "debug",
            "--log-format",
            "compact",
            "--log-timestamps",
            "--log-target",
            "--color",
            "never",
            "stats",
        ])
        .unwrap();
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.use_env_filter);
        assert!(config.with_timestamps);
        assert!(config.with_target);
        assert!(!config.with_ansi);
        assert!(!config.log_data);
    }

    #[test]
    fn default_logging_defers_to_rust_log() {
        let cli = Cli::try_parse_from(["internship-import", "--color", "never", "stats"]).unwrap();
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.with_timestamps);
        assert!(!config.with_target);
    }
}
