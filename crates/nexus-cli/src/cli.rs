//! CLI argument definitions for `nexus`.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use nexus_cli::config::ConfigOverrides;
use nexus_cli::ingest::InputFormat;
use nexus_normalize::parse_f64;

#[derive(Parser)]
#[command(
    name = "nexus",
    version,
    about = "Normalize space-science records and run analytics over them",
    long_about = "Normalize raw catalogue records (JSON or CSV) into canonical records\n\
                  and compare, aggregate, or summarize them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
        default_value = "compact",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Configuration file and per-value overrides.
#[derive(Args)]
pub struct SettingsArgs {
    /// TOML file with normalization and analytics settings.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Sphere radius for latitude/longitude conversion, in kilometres.
    #[arg(long = "earth-radius-km", value_name = "KM", global = true)]
    pub earth_radius_km: Option<f64>,

    /// z-score used for error margins.
    #[arg(long = "confidence", value_name = "Z", global = true)]
    pub confidence: Option<f64>,

    /// Percent change beyond which a trend is an increase or decrease.
    #[arg(long = "trend-threshold", value_name = "PCT", global = true)]
    pub trend_threshold_pct: Option<f64>,

    /// Decimal places kept in similarity scores.
    #[arg(long = "similarity-decimals", value_name = "N", global = true)]
    pub similarity_decimals: Option<u32>,
}

impl SettingsArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            earth_radius_km: self.earth_radius_km,
            confidence: self.confidence,
            trend_threshold_pct: self.trend_threshold_pct,
            similarity_decimals: self.similarity_decimals,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize raw records and write canonical JSON.
    Normalize(NormalizeArgs),

    /// Compare the first record of two files field by field.
    Compare(CompareArgs),

    /// Group normalized records by time, region, or object type.
    Aggregate(AggregateArgs),

    /// Classify the change between two numeric series.
    Trend(TrendArgs),

    /// Descriptive statistics over one numeric field.
    Stats(StatsArgs),

    /// Per-record statistics and grouping.
    Summarize(InputArgs),
}

/// Input file shared by every record-reading command.
#[derive(Args)]
pub struct InputArgs {
    /// JSON (object or array) or CSV file of raw records.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input format (default: from the file extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<InputFormatArg>,

    /// Fields every raw record must carry, comma separated.
    #[arg(long = "require", value_name = "FIELDS", value_delimiter = ',')]
    pub require: Vec<String>,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write normalization outcomes to this file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Drop records whose canonical form duplicates an earlier one.
    #[arg(long = "dedupe")]
    pub dedupe: bool,
}

#[derive(Args)]
pub struct CompareArgs {
    #[arg(value_name = "LEFT")]
    pub left: PathBuf,

    #[arg(value_name = "RIGHT")]
    pub right: PathBuf,
}

#[derive(Args)]
pub struct AggregateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Grouping strategy.
    #[arg(long = "by", value_enum)]
    pub by: GroupByArg,

    /// Field to group on (default depends on --by).
    #[arg(long = "field", value_name = "FIELD")]
    pub field: Option<String>,

    /// Numeric field summarized per group (time default: brightness).
    #[arg(long = "value-field", value_name = "FIELD")]
    pub value_field: Option<String>,
}

#[derive(Args)]
pub struct TrendArgs {
    /// Earlier series, comma separated (e.g. 1,1.5,2).
    #[arg(value_name = "SERIES_A", allow_hyphen_values = true)]
    pub first: Series,

    /// Later series, comma separated.
    #[arg(value_name = "SERIES_B", allow_hyphen_values = true)]
    pub second: Series,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Canonical numeric field to summarize.
    #[arg(long = "field", value_name = "FIELD")]
    pub field: String,
}

/// Comma-separated list of numbers. An empty string is an empty series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series(pub Vec<f64>);

impl FromStr for Series {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| parse_f64(part).ok_or_else(|| format!("not a number: {part:?}")))
            .collect::<Result<Vec<f64>, String>>()
            .map(Series)
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormatArg {
    Json,
    Csv,
}

impl From<InputFormatArg> for InputFormat {
    fn from(value: InputFormatArg) -> Self {
        match value {
            InputFormatArg::Json => Self::Json,
            InputFormatArg::Csv => Self::Csv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GroupByArg {
    Time,
    Region,
    ObjectType,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_parses_comma_lists() {
        assert_eq!("1, 2.5,-3".parse::<Series>(), Ok(Series(vec![1.0, 2.5, -3.0])));
        assert_eq!("".parse::<Series>(), Ok(Series(vec![])));
        assert!("1,two".parse::<Series>().is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_aggregate_command() {
        let cli = Cli::try_parse_from([
            "nexus",
            "aggregate",
            "items.json",
            "--by",
            "object-type",
            "--value-field",
            "brightness",
            "--confidence",
            "2.5",
        ])
        .unwrap();
        assert_eq!(cli.settings.confidence, Some(2.5));
        let Command::Aggregate(args) = cli.command else {
            panic!("expected aggregate");
        };
        assert!(matches!(args.by, GroupByArg::ObjectType));
        assert_eq!(args.value_field.as_deref(), Some("brightness"));
    }
}
