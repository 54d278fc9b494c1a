//! Nexus CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use nexus_cli::config::load_config;
use nexus_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_aggregate, run_compare, run_normalize, run_stats, run_summarize, run_trend,
};
use crate::summary::{print_normalize_summary, print_statistics};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let config = match load_config(cli.settings.config.as_deref(), &cli.settings.overrides()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };

    let outcome = match &cli.command {
        Command::Normalize(args) => run_normalize(args, &config).map(|result| {
            print_normalize_summary(&result);
            if result.has_errors { 1 } else { 0 }
        }),
        Command::Compare(args) => run_compare(args, &config).map(|_| 0),
        Command::Aggregate(args) => run_aggregate(args, &config).map(|_| 0),
        Command::Trend(args) => run_trend(args, &config).map(|_| 0),
        Command::Stats(args) => run_stats(args, &config).map(|(count, stats)| {
            print_statistics(&args.field, count, &stats);
            0
        }),
        Command::Summarize(args) => run_summarize(args, &config).map(|_| 0),
    };
    let exit_code = match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
