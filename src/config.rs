//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.deptreport.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".deptreport.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input file settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Input file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Employee file to load.
    #[serde(default = "default_input")]
    pub path: String,

    /// Field separator, a single character.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Header name of the department column.
    #[serde(default = "default_department_column")]
    pub department_column: String,

    /// Header name of the team column.
    #[serde(default = "default_team_column")]
    pub team_column: String,

    /// Header name of the salary column.
    #[serde(default = "default_salary_column")]
    pub salary_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input(),
            delimiter: default_delimiter(),
            department_column: default_department_column(),
            team_column: default_team_column(),
            salary_column: default_salary_column(),
        }
    }
}

impl InputConfig {
    /// The delimiter as a `char`, if it is exactly one character long.
    pub fn delimiter_char(&self) -> Option<char> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

fn default_input() -> String {
    "Corp_Summary.csv".to_string()
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_department_column() -> String {
    "Department".to_string()
}

fn default_team_column() -> String {
    "Team".to_string()
}

fn default_salary_column() -> String {
    "Salary".to_string()
}

/// Report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Format of the saved report.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output() -> String {
    "department_report.csv".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.input.delimiter_char().is_none() {
            bail!(
                "Delimiter must be a single character, got {:?}",
                self.input.delimiter
            );
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.input.path = input.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.report.output = output.display().to_string();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// Path of the employee file.
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(&self.input.path)
    }

    /// Path menu option 3 writes to.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.report.output)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.path, "Corp_Summary.csv");
        assert_eq!(config.input.delimiter_char(), Some(';'));
        assert_eq!(config.report.output, "department_report.csv");
        assert_eq!(config.report.format, OutputFormat::Csv);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[input]
path = "staff.csv"
department_column = "Dept"

[report]
format = "json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.path, "staff.csv");
        assert_eq!(config.input.department_column, "Dept");
        assert_eq!(config.input.team_column, "Team");
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.output, "department_report.csv");
    }

    #[test]
    fn test_load_rejects_long_delimiter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[input]\ndelimiter = \";;\"\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("single character"));
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        let args = Args {
            input: Some(PathBuf::from("other.csv")),
            format: Some(OutputFormat::Json),
            ..Args::default()
        };

        config.merge_with_args(&args);

        assert_eq!(config.input_path(), PathBuf::from("other.csv"));
        assert_eq!(config.output_path(), PathBuf::from("department_report.csv"));
        assert_eq!(config.report.format, OutputFormat::Json);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[input]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.input.salary_column, "Salary");
    }
}
