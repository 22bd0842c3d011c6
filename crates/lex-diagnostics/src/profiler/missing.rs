//! Missing-value profiling.

use crate::table::Table;
use crate::types::{ColumnMissing, MissingReport, MissingTotals};
use crate::utils::percentage;
use tracing::{debug, info};

/// Counts missing cells per column and across the whole table.
pub struct MissingValueProfiler;

impl MissingValueProfiler {
    /// Profile missing values.
    ///
    /// Only columns with at least one missing value are listed, most affected
    /// first (ties keep table order); every column counts toward the total.
    pub fn profile(table: &Table) -> MissingReport {
        let row_count = table.row_count();

        let mut columns: Vec<ColumnMissing> = table
            .columns()
            .iter()
            .filter_map(|column| {
                let count = column.missing_count();
                (count > 0).then(|| ColumnMissing {
                    name: column.name().to_string(),
                    count,
                    percentage: percentage(count, row_count),
                })
            })
            .collect();
        columns.sort_by(|a, b| b.count.cmp(&a.count));

        for entry in &columns {
            debug!(
                "Column '{}': {} missing ({:.3}%)",
                entry.name, entry.count, entry.percentage
            );
        }

        let missing_cells: usize = columns.iter().map(|entry| entry.count).sum();
        let total_cells = table.total_cells();
        let total = MissingTotals {
            missing_cells,
            total_cells,
            percentage: percentage(missing_cells, total_cells),
        };

        info!(
            "Missing values: {}/{} cells ({:.3}%) across {} columns",
            total.missing_cells,
            total.total_cells,
            total.percentage,
            columns.len()
        );

        MissingReport { columns, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ten_rows_three_missing() {
        let mut values: Vec<Option<f64>> = (0..10).map(|v| Some(v as f64)).collect();
        values[1] = None;
        values[4] = None;
        values[8] = None;
        let table = Table::new(vec![
            Column::numeric("X", values),
            Column::numeric("Y", (0..10).map(|v| Some(v as f64)).collect()),
        ])
        .unwrap();

        let report = MissingValueProfiler::profile(&table);

        let x = report.get("X").unwrap();
        assert_eq!((x.count, x.percentage), (3, 30.0));
        assert!(report.get("Y").is_none());
        assert_eq!(report.total.missing_cells, 3);
        assert_eq!(report.total.total_cells, 20);
        assert_eq!(report.total.percentage, 15.0);
    }

    #[test]
    fn test_sorted_by_count_descending() {
        let table = Table::new(vec![
            Column::categorical("a", vec![None, Some("x".into()), Some("y".into())]),
            Column::categorical("b", vec![None, None, Some("y".into())]),
            Column::categorical("c", vec![None, Some("x".into()), Some("y".into())]),
        ])
        .unwrap();

        let report = MissingValueProfiler::profile(&table);
        let names: Vec<&str> = report.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(report.total.missing_cells, 4);
    }

    #[test]
    fn test_zero_and_empty_string_are_present() {
        let table = Table::new(vec![
            Column::numeric("n", vec![Some(0.0), Some(0.0)]),
            Column::categorical("s", vec![Some(String::new()), Some(String::new())]),
        ])
        .unwrap();

        let report = MissingValueProfiler::profile(&table);
        assert!(report.columns.is_empty());
        assert!(!report.has_missing());
    }

    #[test]
    fn test_empty_table_has_zero_percentages() {
        let table = Table::new(vec![Column::numeric("x", Vec::new())]).unwrap();
        let report = MissingValueProfiler::profile(&table);
        assert_eq!(
            report.total,
            MissingTotals {
                missing_cells: 0,
                total_cells: 0,
                percentage: 0.0,
            }
        );
    }
}
