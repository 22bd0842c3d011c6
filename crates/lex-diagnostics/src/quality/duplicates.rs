//! Exact duplicate detection over full rows and over an identifier column.

use crate::table::{Column, ColumnData, Table};
use crate::types::DuplicateReport;
use crate::utils::percentage;
use std::collections::HashSet;
use tracing::{info, warn};

/// Hashable view of one cell. Two missing cells compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Integer(i128),
    Number(u64),
    Text(&'a str),
}

impl<'a> CellKey<'a> {
    fn of(column: &'a Column, row: usize) -> Self {
        if let Some(values) = column.as_integer() {
            return values[row].map_or(CellKey::Missing, CellKey::Integer);
        }
        match column.data() {
            ColumnData::Numeric(values) => match values[row] {
                // 0.0 and -0.0 are the same value
                Some(v) if v == 0.0 => CellKey::Number(0f64.to_bits()),
                Some(v) => CellKey::Number(v.to_bits()),
                None => CellKey::Missing,
            },
            ColumnData::Categorical(values) => match &values[row] {
                Some(v) => CellKey::Text(v.as_str()),
                None => CellKey::Missing,
            },
        }
    }
}

/// Counts rows that repeat an earlier row.
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Detect duplicates.
    ///
    /// The first occurrence of a value tuple is never counted. When
    /// `key_column` is `None` or not in the table, `key_duplicate_count` stays
    /// `None`.
    pub fn detect(table: &Table, key_column: Option<&str>) -> DuplicateReport {
        let full_row_duplicate_count = Self::count_full_row_duplicates(table);

        let key_duplicate_count = key_column.and_then(|key| match table.column(key) {
            Some(column) => Some(count_duplicates(
                (0..table.row_count()).map(|row| CellKey::of(column, row)),
            )),
            None => {
                warn!("Key column '{}' not found; skipping key duplicates", key);
                None
            }
        });

        info!(
            "Duplicates: {} full rows, key: {:?}",
            full_row_duplicate_count, key_duplicate_count
        );

        DuplicateReport {
            full_row_duplicate_count,
            full_row_duplicate_percentage: percentage(
                full_row_duplicate_count,
                table.row_count(),
            ),
            key_column: key_column.map(str::to_string),
            key_duplicate_count,
        }
    }

    fn count_full_row_duplicates(table: &Table) -> usize {
        if table.column_count() == 0 {
            return 0;
        }
        let rows = (0..table.row_count()).map(|row| {
            table
                .columns()
                .iter()
                .map(|column| CellKey::of(column, row))
                .collect::<Vec<_>>()
        });
        count_duplicates(rows)
    }
}

/// Number of items equal to an earlier item.
fn count_duplicates<T: Eq + std::hash::Hash>(items: impl Iterator<Item = T>) -> usize {
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    for item in items {
        if !seen.insert(item) {
            duplicates += 1;
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_rows_one_repeat() -> Table {
        Table::new(vec![
            Column::numeric(
                "Student_ID",
                vec![Some(1.0), Some(2.0), Some(3.0), Some(2.0), Some(4.0)],
            ),
            Column::categorical(
                "name",
                vec![
                    Some("ana".into()),
                    Some("bo".into()),
                    Some("cy".into()),
                    Some("bo".into()),
                    Some("di".into()),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_two_identical_rows_out_of_five() {
        let report = DuplicateDetector::detect(&five_rows_one_repeat(), None);
        assert_eq!(report.full_row_duplicate_count, 1);
        assert_eq!(report.full_row_duplicate_percentage, 20.0);
        assert_eq!(report.key_duplicate_count, None);
    }

    #[test]
    fn test_key_duplicates() {
        let table = Table::new(vec![
            Column::numeric("id", vec![Some(1.0), Some(1.0), Some(1.0), Some(2.0)]),
            Column::numeric("v", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        ])
        .unwrap();

        let report = DuplicateDetector::detect(&table, Some("id"));
        assert_eq!(report.full_row_duplicate_count, 0);
        assert_eq!(report.key_column.as_deref(), Some("id"));
        assert_eq!(report.key_duplicate_count, Some(2));
    }

    #[test]
    fn test_absent_key_column_is_omitted_not_zero() {
        let report = DuplicateDetector::detect(&five_rows_one_repeat(), Some("Nope"));
        assert_eq!(report.key_column.as_deref(), Some("Nope"));
        assert_eq!(report.key_duplicate_count, None);
    }

    #[test]
    fn test_missing_cells_compare_equal() {
        let table = Table::new(vec![
            Column::numeric("a", vec![None, None, Some(1.0)]),
            Column::categorical("b", vec![None, None, None]),
        ])
        .unwrap();

        let report = DuplicateDetector::detect(&table, Some("b"));
        assert_eq!(report.full_row_duplicate_count, 1);
        assert_eq!(report.key_duplicate_count, Some(2));
    }

    #[test]
    fn test_missing_differs_from_empty_string_and_zero() {
        let table = Table::new(vec![
            Column::numeric("n", vec![Some(0.0), None, Some(-0.0)]),
            Column::categorical("s", vec![Some(String::new()), None, Some(String::new())]),
        ])
        .unwrap();

        let report = DuplicateDetector::detect(&table, None);
        // row 2 repeats row 0 (-0.0 == 0.0); row 1 is distinct
        assert_eq!(report.full_row_duplicate_count, 1);
    }

    #[test]
    fn test_large_integer_ids_stay_distinct() {
        let base = 1i128 << 53;
        let table = Table::new(vec![
            Column::integer("id", vec![Some(base), Some(base + 1), Some(base + 1)]),
            Column::integer("v", vec![Some(1), Some(1), Some(1)]),
        ])
        .unwrap();

        let report = DuplicateDetector::detect(&table, Some("id"));
        assert_eq!(report.key_duplicate_count, Some(1));
        assert_eq!(report.full_row_duplicate_count, 1);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        let report = DuplicateDetector::detect(&table, None);
        assert_eq!(report.full_row_duplicate_count, 0);
        assert_eq!(report.full_row_duplicate_percentage, 0.0);
    }
}
