//! Command-line interface argument parsing.
//!
//! Every flag is optional: with none given the program reads
//! `Corp_Summary.csv` and writes `department_report.csv` in the working
//! directory.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// deptreport - department and salary reports from employee CSV files
///
/// Loads a semicolon-delimited employee file once, then offers an
/// interactive menu to print the team hierarchy, print per-department
/// salary statistics, or save those statistics to a file.
///
/// Examples:
///   deptreport
///   deptreport --input staff.csv --output summary.csv
///   deptreport --format json --output summary.json
///   deptreport --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Employee file to load
    ///
    /// Defaults to the `input.path` config value, or Corp_Summary.csv.
    #[arg(short, long, value_name = "FILE", env = "DEPTREPORT_INPUT")]
    pub input: Option<PathBuf>,

    /// Where menu option 3 writes the statistics report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Format of the saved report (csv, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .deptreport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .deptreport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the saved report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Semicolon-delimited CSV (default)
    #[default]
    Csv,
    /// Pretty-printed JSON with metadata
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if input.as_os_str().is_empty() {
                return Err("Input path must not be empty".to_string());
            }
        }

        if let Some(ref output) = self.output {
            if output.is_dir() {
                return Err(format!("Output path is a directory: {}", output.display()));
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
