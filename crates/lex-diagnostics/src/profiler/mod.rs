//! Profiling module for table structure and missing values.
//!
//! - [`StructuralSummarizer`]: shape, column kinds and descriptive statistics
//! - [`MissingValueProfiler`]: per-column and global missing-value counts

mod missing;
pub(crate) mod statistics;

pub use missing::MissingValueProfiler;

use crate::table::{Column, ColumnData, Table};
use crate::types::{
    CategoricalStatistics, ColumnStatistics, ColumnSummary, NumericStatistics, StructuralSummary,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Computes the structural summary of a table.
pub struct StructuralSummarizer;

impl StructuralSummarizer {
    /// Summarize every column of the table.
    ///
    /// Never fails: a column without values gets undefined statistics.
    pub fn summarize(table: &Table) -> StructuralSummary {
        let columns: Vec<ColumnSummary> = table
            .columns()
            .iter()
            .map(Self::summarize_column)
            .collect();

        info!(
            "Structural summary: {} rows x {} columns ({} numeric)",
            table.row_count(),
            table.column_count(),
            table.numeric_column_count()
        );

        StructuralSummary {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns,
        }
    }

    fn summarize_column(column: &Column) -> ColumnSummary {
        let (count, statistics) = match column.data() {
            ColumnData::Numeric(_) => {
                let values = column.present_numeric();
                (
                    values.len(),
                    ColumnStatistics::Numeric(numeric_statistics(&values)),
                )
            }
            ColumnData::Categorical(values) => {
                let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
                (
                    present.len(),
                    ColumnStatistics::Categorical(categorical_statistics(&present)),
                )
            }
        };

        debug!("Summarized column '{}' ({} values)", column.name(), count);

        ColumnSummary {
            name: column.name().to_string(),
            kind: column.kind(),
            count,
            statistics,
        }
    }
}

fn numeric_statistics(values: &[f64]) -> NumericStatistics {
    let sorted = statistics::sorted(values.iter().copied());
    let quartiles = statistics::quartiles(&sorted);

    NumericStatistics {
        mean: statistics::mean(values),
        std: statistics::sample_std(values),
        min: sorted.first().copied(),
        q1: quartiles.map(|q| q.q1),
        median: quartiles.map(|q| q.median),
        q3: quartiles.map(|q| q.q3),
        max: sorted.last().copied(),
    }
}

/// Mode ties go to the value seen first.
fn categorical_statistics(values: &[&str]) -> CategoricalStatistics {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, &value) in values.iter().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    let mode = counts
        .iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, (count, _))| (value.to_string(), *count));

    CategoricalStatistics {
        unique_count: counts.len(),
        mode_frequency: mode.as_ref().map(|(_, count)| *count).unwrap_or(0),
        mode: mode.map(|(value, _)| value),
    }
}
