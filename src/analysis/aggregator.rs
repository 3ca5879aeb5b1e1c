//! Department aggregation and salary statistics.
//!
//! Both views are recomputed from the employee list on every call; nothing
//! here holds state between reports.

use crate::error::StatsError;
use crate::models::{Average, DepartmentStats, Employee};
use std::collections::{HashMap, HashSet};

/// Group distinct team names by department.
pub fn team_hierarchy(employees: &[Employee]) -> HashMap<String, HashSet<String>> {
    let mut grouped: HashMap<String, HashSet<String>> = HashMap::new();

    for employee in employees {
        grouped
            .entry(employee.department.clone())
            .or_default()
            .insert(employee.team.clone());
    }

    grouped
}

/// Running totals for one department.
#[derive(Debug, Clone, Copy)]
struct SalaryAccumulator {
    count: usize,
    min: i128,
    max: i128,
    total: i128,
}

impl SalaryAccumulator {
    fn new(salary: i128) -> Self {
        Self {
            count: 1,
            min: salary,
            max: salary,
            total: salary,
        }
    }

    /// Returns `None` if the running total would overflow.
    fn add(&mut self, salary: i128) -> Option<()> {
        self.total = self.total.checked_add(salary)?;
        self.count += 1;
        if salary < self.min {
            self.min = salary;
        }
        if salary > self.max {
            self.max = salary;
        }
        Some(())
    }

    fn average(&self) -> f64 {
        round_to_cents(self.total as f64 / self.count as f64)
    }
}

/// Compute count/min/max/average salary per department.
///
/// Departments come out in the order they first appear in `employees`.
/// The first salary that is not an integer aborts the whole computation.
pub fn department_stats(employees: &[Employee]) -> Result<Vec<DepartmentStats>, StatsError> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, SalaryAccumulator> = HashMap::new();

    for employee in employees {
        let salary = employee.salary()?;

        match totals.get_mut(&employee.department) {
            Some(acc) => acc.add(salary).ok_or_else(|| StatsError::TotalOverflow {
                line: employee.line,
                department: employee.department.clone(),
            })?,
            None => {
                order.push(employee.department.clone());
                totals.insert(employee.department.clone(), SalaryAccumulator::new(salary));
            }
        }
    }

    let stats = order
        .into_iter()
        .filter_map(|department| {
            totals.get(&department).map(|acc| DepartmentStats {
                count: acc.count,
                min: acc.min,
                max: acc.max,
                average: Average(acc.average()),
                department,
            })
        })
        .collect();

    Ok(stats)
}

/// Round to two decimal places.
///
/// The exact binary value of `value` is rounded, with ties going to the even
/// hundredth, so `125.125` becomes `125.12` and `0.375` becomes `0.38`.
/// Scaling by 100 in floating point first is inexact.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & 0x000f_ffff_ffff_ffff;

    // |value| == mantissa * 2^exponent
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased_exponent - 1075)
    };

    if exponent >= 0 {
        return value;
    }

    let scaled = mantissa as u128 * 100;
    let shift = exponent.unsigned_abs();
    let cents = if shift >= 127 {
        0
    } else {
        let whole = scaled >> shift;
        let remainder = scaled & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);
        if remainder > half || (remainder == half && whole & 1 == 1) {
            whole + 1
        } else {
            whole
        }
    };

    let magnitude = cents as f64 / 100.0;
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(department: &str, team: &str, salary: &str) -> Employee {
        Employee {
            line: 0,
            department: department.to_string(),
            team: team.to_string(),
            salary: salary.to_string(),
        }
    }

    fn sample() -> Vec<Employee> {
        vec![
            create_test_employee("Eng", "Backend", "1000"),
            create_test_employee("Eng", "Frontend", "2000"),
            create_test_employee("HR", "Ops", "500"),
        ]
    }

    #[test]
    fn test_team_hierarchy_dedupes_teams() {
        let employees = vec![
            create_test_employee("Eng", "Backend", "1"),
            create_test_employee("Eng", "Backend", "2"),
            create_test_employee("Eng", "Frontend", "3"),
            create_test_employee("HR", "Ops", "4"),
        ];

        let hierarchy = team_hierarchy(&employees);

        assert_eq!(hierarchy.len(), 2);
        assert_eq!(hierarchy.get("Eng").map(|t| t.len()), Some(2));
        assert!(hierarchy["HR"].contains("Ops"));
    }

    #[test]
    fn test_hierarchy_ignores_salary() {
        let employees = vec![create_test_employee("Eng", "Backend", "n/a")];
        assert!(team_hierarchy(&employees)["Eng"].contains("Backend"));
    }

    #[test]
    fn test_department_stats_example() {
        let stats = department_stats(&sample()).unwrap();

        assert_eq!(
            stats,
            vec![
                DepartmentStats {
                    department: "Eng".to_string(),
                    count: 2,
                    min: 1000,
                    max: 2000,
                    average: Average(1500.0),
                },
                DepartmentStats {
                    department: "HR".to_string(),
                    count: 1,
                    min: 500,
                    max: 500,
                    average: Average(500.0),
                },
            ]
        );
    }

    #[test]
    fn test_stats_follow_first_seen_order() {
        let employees = vec![
            create_test_employee("Sales", "East", "10"),
            create_test_employee("Admin", "Desk", "20"),
            create_test_employee("Sales", "West", "30"),
        ];

        let names: Vec<String> = department_stats(&employees)
            .unwrap()
            .into_iter()
            .map(|s| s.department)
            .collect();

        assert_eq!(names, vec!["Sales", "Admin"]);
    }

    #[test]
    fn test_average_rounds_to_two_places() {
        let employees = vec![
            create_test_employee("Eng", "A", "100"),
            create_test_employee("Eng", "B", "201"),
        ];
        let stats = department_stats(&employees).unwrap();
        assert_eq!(stats[0].average, Average(150.5));

        let thirds = vec![
            create_test_employee("Ops", "A", "100"),
            create_test_employee("Ops", "B", "100"),
            create_test_employee("Ops", "C", "101"),
        ];
        let stats = department_stats(&thirds).unwrap();
        assert_eq!(stats[0].average, Average(100.33));
    }

    #[test]
    fn test_min_avg_max_and_counts() {
        let employees = vec![
            create_test_employee("Eng", "A", "900"),
            create_test_employee("HR", "B", "120"),
            create_test_employee("Eng", "C", "300"),
            create_test_employee("Eng", "D", "1700"),
            create_test_employee("HR", "E", "80"),
        ];

        for stat in department_stats(&employees).unwrap() {
            let expected = employees
                .iter()
                .filter(|e| e.department == stat.department)
                .count();
            assert_eq!(stat.count, expected);
            assert!(stat.min as f64 <= stat.average.0);
            assert!(stat.average.0 <= stat.max as f64);
        }
    }

    #[test]
    fn test_invalid_salary_is_fatal() {
        let mut employees = sample();
        employees.push(create_test_employee("HR", "Ops", "ten"));

        let err = department_stats(&employees).unwrap_err();
        assert!(matches!(err, StatsError::InvalidSalary { ref value, .. } if value == "ten"));
    }

    #[test]
    fn test_empty_input() {
        assert!(department_stats(&[]).unwrap().is_empty());
        assert!(team_hierarchy(&[]).is_empty());
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(1500.0), 1500.0);
        assert_eq!(round_to_cents(2.0 / 3.0), 0.67);
        assert_eq!(round_to_cents(-1.234), -1.23);
        assert_eq!(round_to_cents(0.0), 0.0);
    }

    #[test]
    fn test_round_to_cents_ties_go_to_even() {
        assert_eq!(round_to_cents(125.125), 125.12);
        assert_eq!(round_to_cents(0.375), 0.38);
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(-0.125), -0.12);
        // 2.675 is stored slightly below the half, so it rounds down.
        assert_eq!(round_to_cents(2.675), 2.67);
    }

    #[test]
    fn test_exact_half_average_rounds_to_even() {
        let mut employees: Vec<Employee> = (0..7)
            .map(|_| create_test_employee("Eng", "A", "125"))
            .collect();
        employees.push(create_test_employee("Eng", "B", "126"));

        let stats = department_stats(&employees).unwrap();

        assert_eq!(stats[0].count, 8);
        assert_eq!(stats[0].average, Average(125.12));
        assert_eq!(stats[0].average.to_string(), "125.12");
    }

    #[test]
    fn test_large_salaries_do_not_overflow() {
        let employees = vec![
            create_test_employee("Eng", "A", "4611686018427387904"),
            create_test_employee("Eng", "B", "4611686018427387904"),
            create_test_employee("Ops", "C", "9223372036854775808"),
        ];

        let stats = department_stats(&employees).unwrap();

        assert_eq!(stats[0].max, 4_611_686_018_427_387_904);
        assert_eq!(stats[0].average, Average(4_611_686_018_427_387_904.0));
        assert_eq!(stats[1].min, i64::MAX as i128 + 1);
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let huge = i128::MAX.to_string();
        let employees = vec![
            create_test_employee("Eng", "A", &huge),
            create_test_employee("Eng", "B", &huge),
        ];

        let err = department_stats(&employees).unwrap_err();
        assert!(matches!(err, StatsError::TotalOverflow { ref department, .. } if department == "Eng"));
    }
}
