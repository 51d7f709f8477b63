//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::config::CadenceSetting;

/// Shipstats - productivity analytics for personal project trackers
///
/// Compute completion rates, ship velocity, estimation accuracy, and
/// chart-ready series from exported project and task records.
///
/// Examples:
///   shipstats --projects projects.json --tasks tasks.json
///   shipstats --cadence rolling --as-of 2024-06-15
///   shipstats --format json --output metrics.json
///   shipstats --dry-run
///   shipstats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the projects export (JSON array or {"data": [...]})
    ///
    /// Defaults to projects.json, or the path from .shipstats.toml.
    #[arg(short, long, value_name = "FILE", env = "SHIPSTATS_PROJECTS")]
    pub projects: Option<PathBuf>,

    /// Path to the tasks export (JSON array or {"data": [...]})
    ///
    /// Defaults to tasks.json, or the path from .shipstats.toml.
    #[arg(short, long, value_name = "FILE", env = "SHIPSTATS_TASKS")]
    pub tasks: Option<PathBuf>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Month-bucket layout for the cadence charts
    ///
    /// full-year: 12 buckets Jan..Dec across all years (default).
    /// rolling: the 6 calendar months ending at the reference date.
    #[arg(long, value_name = "WINDOW")]
    pub cadence: Option<CadenceArg>,

    /// Reference date for the rolling window (YYYY-MM-DD)
    ///
    /// Defaults to today. The engine itself never reads the clock, so a
    /// fixed date here makes runs reproducible.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .shipstats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Load and validate the snapshot without writing a report
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .shipstats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Cadence window for --cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CadenceArg {
    FullYear,
    Rolling,
}

impl From<CadenceArg> for CadenceSetting {
    fn from(arg: CadenceArg) -> Self {
        match arg {
            CadenceArg::FullYear => CadenceSetting::FullYear,
            CadenceArg::Rolling => CadenceSetting::Rolling,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Input files, when given explicitly, must exist
        for path in [&self.projects, &self.tasks].into_iter().flatten() {
            if !path.exists() {
                return Err(format!("Input file does not exist: {}", path.display()));
            }
            if !path.is_file() {
                return Err(format!("Input path is not a file: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
