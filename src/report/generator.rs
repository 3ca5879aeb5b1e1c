//! Report generation.
//!
//! Console reports (team hierarchy, department summary table) and file
//! reports (semicolon-delimited CSV, JSON) built from aggregator output.

use crate::analysis::{department_stats, team_hierarchy};
use crate::cli::OutputFormat;
use crate::error::ReportResult;
use crate::models::{Dataset, DepartmentStats, Employee, ReportMetadata, StatsReport};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Header line of the CSV report.
pub const CSV_HEADER: &str = "Department;Count;Min. Salary;Max. Salary;Average Salary";

const CSV_DELIMITER: &str = ";";

/// Generate the department → team listing, both levels sorted.
pub fn generate_hierarchy(employees: &[Employee]) -> String {
    let hierarchy = team_hierarchy(employees);

    let mut departments: Vec<_> = hierarchy.iter().collect();
    departments.sort_by(|a, b| a.0.cmp(b.0));

    let mut output = String::new();
    output.push_str("\nTeam hierarchy:\n");

    for (department, teams) in departments {
        output.push_str(&format!("{}:\n", department));

        let mut teams: Vec<_> = teams.iter().collect();
        teams.sort();

        for team in teams {
            output.push_str(&format!("  {}\n", team));
        }
    }
    output.push('\n');

    output
}

/// Generate the fixed-width summary table.
pub fn generate_summary_table(stats: &[DepartmentStats]) -> String {
    let mut table = String::new();

    table.push_str("\nDepartment summary:\n");
    table.push_str(&format!(
        "{:<20} {:<12} {:<10} {:<10} {:<10}\n",
        "Department", "Count", "Min", "Max", "Average"
    ));

    for stat in stats {
        table.push_str(&format!(
            "{:<20} {:<12} {:<10} {:<10} {:<10}\n",
            stat.department, stat.count, stat.min, stat.max, stat.average
        ));
    }
    table.push('\n');

    table
}

/// Generate the CSV report body.
pub fn generate_csv_report(stats: &[DepartmentStats]) -> String {
    let mut csv = String::new();

    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for stat in stats {
        let fields = [
            stat.department.clone(),
            stat.count.to_string(),
            stat.min.to_string(),
            stat.max.to_string(),
            stat.average.to_string(),
        ];
        csv.push_str(&fields.join(CSV_DELIMITER));
        csv.push('\n');
    }

    csv
}

/// Generate a JSON report.
pub fn generate_json_report(report: &StatsReport) -> ReportResult<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Print the team hierarchy to `out`.
pub fn write_hierarchy<W: Write>(out: &mut W, employees: &[Employee]) -> ReportResult<()> {
    out.write_all(generate_hierarchy(employees).as_bytes())?;
    Ok(())
}

/// Compute statistics and print the summary table to `out`.
pub fn write_summary<W: Write>(out: &mut W, employees: &[Employee]) -> ReportResult<()> {
    let stats = department_stats(employees)?;
    out.write_all(generate_summary_table(&stats).as_bytes())?;
    Ok(())
}

/// Compute statistics and write them to `path`, replacing any existing file.
pub fn save_report(dataset: &Dataset, path: &Path, format: OutputFormat) -> ReportResult<()> {
    let stats = department_stats(&dataset.employees)?;
    debug!("Writing {} departments as {:?}", stats.len(), format);

    let content = match format {
        OutputFormat::Csv => generate_csv_report(&stats),
        OutputFormat::Json => generate_json_report(&StatsReport {
            metadata: ReportMetadata::for_dataset(dataset),
            departments: stats,
        })?,
    };

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    info!("Report written to {}", path.display());
    Ok(())
}
