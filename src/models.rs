//! Data models for the department reporter.
//!
//! This module contains the employee records produced by the loader and the
//! per-department aggregates consumed by the reporters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::StatsError;

/// One employee row, reduced to the columns the reports use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Line number in the source file (1-indexed, header is line 1).
    pub line: usize,
    /// Department the employee belongs to.
    pub department: String,
    /// Team within the department.
    pub team: String,
    /// Salary as it appears in the file; parsed on demand.
    pub salary: String,
}

impl Employee {
    /// Parses the salary field as an integer.
    pub fn salary(&self) -> Result<i128, StatsError> {
        self.salary
            .trim()
            .parse::<i128>()
            .map_err(|_| StatsError::InvalidSalary {
                line: self.line,
                department: self.department.clone(),
                value: self.salary.clone(),
            })
    }
}

/// A data row whose field count did not match the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Line number in the source file.
    pub line: usize,
    /// Number of fields in the header.
    pub expected: usize,
    /// Number of fields found on the line.
    pub found: usize,
}

/// Everything the loader read from one input file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Path the data was loaded from.
    pub source: PathBuf,
    /// Column names from the header row.
    pub headers: Vec<String>,
    /// Well-formed rows, in file order.
    pub employees: Vec<Employee>,
    /// Rows excluded because of a field count mismatch.
    pub skipped: Vec<SkippedRow>,
}

impl Dataset {
    /// Returns true when no employee rows were loaded.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// Average salary rounded to two decimals.
///
/// Displays with at least one fractional digit (`1500.0`, `150.5`, `333.33`)
/// and honours width/alignment flags so it lines up in the console table.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Average(pub f64);

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.0.is_finite() && self.0.fract() == 0.0 {
            format!("{:.1}", self.0)
        } else {
            self.0.to_string()
        };
        f.pad(&text)
    }
}

/// Salary statistics for a single department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStats {
    /// Department name.
    pub department: String,
    /// Number of employees in the department.
    pub count: usize,
    /// Lowest salary.
    pub min: i128,
    /// Highest salary.
    pub max: i128,
    /// Mean salary rounded to two decimals.
    pub average: Average,
}

/// Metadata attached to machine-readable reports.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Input file the statistics were computed from.
    pub source: String,
    /// Number of employee rows used.
    pub employees: usize,
    /// Number of rows excluded by the loader.
    pub skipped_rows: usize,
}

impl ReportMetadata {
    /// Builds metadata for a report over `dataset`, stamped with the current time.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            generated_at: Utc::now(),
            source: dataset.source.display().to_string(),
            employees: dataset.employees.len(),
            skipped_rows: dataset.skipped.len(),
        }
    }
}

/// The complete statistics report as written in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// One entry per department in first-seen order.
    pub departments: Vec<DepartmentStats>,
}
