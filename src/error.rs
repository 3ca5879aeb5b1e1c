//! Error types for loading and reporting.
//!
//! - [`LoadError`] - reading and splitting the input file
//! - [`StatsError`] - salary aggregation
//! - [`ReportError`] - rendering and writing reports
//!
//! Conversion is via `From`, so `?` works from the aggregator up to the
//! reporters.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading the employee file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or is not valid UTF-8.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the header row.
    #[error("Column '{column}' not found in header of {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },
}

/// Errors while computing department statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Salary field is not an integer.
    #[error("Invalid salary '{value}' for department '{department}' on line {line}")]
    InvalidSalary {
        line: usize,
        department: String,
        value: String,
    },

    /// Salary total for a department does not fit in 128 bits.
    #[error("Salary total overflowed for department '{department}' on line {line}")]
    TotalOverflow { line: usize, department: String },
}

/// Errors while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Statistics could not be computed.
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Writing to the console or output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_error_converts_to_report_error() {
        let err = StatsError::InvalidSalary {
            line: 4,
            department: "Eng".into(),
            value: "abc".into(),
        };
        let report_err: ReportError = err.into();
        let msg = report_err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("line 4"));
    }

    #[test]
    fn test_missing_column_message() {
        let err = LoadError::MissingColumn {
            column: "Salary".into(),
            path: PathBuf::from("staff.csv"),
        };
        assert_eq!(
            err.to_string(),
            "Column 'Salary' not found in header of staff.csv"
        );
    }
}
