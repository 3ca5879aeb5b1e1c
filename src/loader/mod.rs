//! Employee file loader.
//!
//! Reads a delimited text file whose first line is a header and turns every
//! row with the header's field count into an [`Employee`]. Rows with any
//! other field count are left out of the data set and recorded as
//! [`SkippedRow`]s.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{LoadError, LoadResult};
use crate::models::{Dataset, Employee, SkippedRow};

/// Column layout of the input file.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Field separator.
    pub delimiter: char,
    /// Header name of the department column.
    pub department_column: String,
    /// Header name of the team column.
    pub team_column: String,
    /// Header name of the salary column.
    pub salary_column: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            department_column: "Department".to_string(),
            team_column: "Team".to_string(),
            salary_column: "Salary".to_string(),
        }
    }
}

impl From<&crate::config::InputConfig> for LoadConfig {
    fn from(config: &crate::config::InputConfig) -> Self {
        Self {
            delimiter: config.delimiter_char().unwrap_or(';'),
            department_column: config.department_column.clone(),
            team_column: config.team_column.clone(),
            salary_column: config.salary_column.clone(),
        }
    }
}

/// Positions of the report columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    department: usize,
    team: usize,
    salary: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String], config: &LoadConfig, source: &Path) -> LoadResult<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .rposition(|h| h == column)
                .ok_or_else(|| LoadError::MissingColumn {
                    column: column.to_string(),
                    path: source.to_path_buf(),
                })
        };

        Ok(Self {
            department: find(&config.department_column)?,
            team: find(&config.team_column)?,
            salary: find(&config.salary_column)?,
        })
    }
}

/// Read and parse the employee file at `path`.
pub fn load_dataset(path: &Path, config: &LoadConfig) -> LoadResult<Dataset> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = parse_dataset(&content, path, config)?;

    info!(
        "Loaded {} employees from {}",
        dataset.employees.len(),
        path.display()
    );

    if !dataset.skipped.is_empty() {
        let lines: Vec<String> = dataset.skipped.iter().map(|r| r.line.to_string()).collect();
        warn!(
            "Skipped {} malformed rows (lines {})",
            dataset.skipped.len(),
            lines.join(", ")
        );
    }

    Ok(dataset)
}

/// Parse file content that was read from `source`.
pub fn parse_dataset(content: &str, source: &Path, config: &LoadConfig) -> LoadResult<Dataset> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines();

    let mut dataset = Dataset {
        source: source.to_path_buf(),
        ..Dataset::default()
    };

    let header = match lines.next() {
        Some(line) => line.trim(),
        None => {
            debug!("{} is empty", source.display());
            return Ok(dataset);
        }
    };

    dataset.headers = header.split(config.delimiter).map(String::from).collect();
    let expected = dataset.headers.len();

    // Resolved on the first well-formed row so a header-only file loads cleanly.
    let mut columns: Option<ColumnIndex> = None;

    for (index, raw) in lines.enumerate() {
        let line_number = index + 2;
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(config.delimiter).collect();
        if fields.len() != expected {
            debug!(
                "Line {}: expected {} fields, found {}",
                line_number,
                expected,
                fields.len()
            );
            dataset.skipped.push(SkippedRow {
                line: line_number,
                expected,
                found: fields.len(),
            });
            continue;
        }

        let idx = match columns {
            Some(idx) => idx,
            None => {
                let idx = ColumnIndex::resolve(&dataset.headers, config, source)?;
                columns = Some(idx);
                idx
            }
        };

        dataset.employees.push(Employee {
            line: line_number,
            department: fields[idx.department].to_string(),
            team: fields[idx.team].to_string(),
            salary: fields[idx.salary].to_string(),
        });
    }

    Ok(dataset)
}
