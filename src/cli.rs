//! CLI argument parsing for fleetstate

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "fleetstate")]
#[command(version)]
#[command(about = "Equipment state hours and earnings over a trailing window", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Directory containing the fleet JSON files
    #[arg(short = 'd', long = "data", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// TOML file overriding window length and state ids
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Window length in hours (overrides the config file)
    #[arg(long = "window-hours", value_name = "HOURS")]
    pub window_hours: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Current state, hours, productivity and earnings for every equipment
    Summary {
        #[command(flatten)]
        data: DataArgs,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Hours per state for one equipment
    Durations {
        #[command(flatten)]
        data: DataArgs,

        /// Equipment id
        #[arg(short = 'e', long = "equipment", value_name = "ID")]
        equipment: String,

        /// Output format (csv is not supported here)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Chronological state records of one equipment
    History {
        #[command(flatten)]
        data: DataArgs,

        /// Equipment id
        #[arg(short = 'e', long = "equipment", value_name = "ID")]
        equipment: String,

        /// Output format (csv is not supported here)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
}
