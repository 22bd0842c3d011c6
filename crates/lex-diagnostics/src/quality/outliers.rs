//! Outlier detection with Tukey's IQR fences.
//!
//! For each numeric column the fences are `Q1 - k * IQR` and `Q3 + k * IQR`,
//! with quartiles taken over the non-missing values. A value is an outlier
//! when it lies strictly outside the fences. A zero IQR collapses the fences
//! onto `[Q1, Q3]`; this is reported as computed.

use crate::config::DEFAULT_FENCE_MULTIPLIER;
use crate::profiler::statistics;
use crate::table::{Column, Table};
use crate::types::{ColumnOutliers, Fence, OutlierAnalysis, OutlierReport, RankedColumn};
use crate::utils::percentage;
use tracing::{debug, info, warn};

/// Classifies numeric cells against per-column IQR fences.
#[derive(Debug, Clone, Copy)]
pub struct OutlierDetector {
    multiplier: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::new(DEFAULT_FENCE_MULTIPLIER)
    }
}

impl OutlierDetector {
    /// Create a detector with the given fence multiplier.
    ///
    /// The multiplier is validated by [`DiagnosticsConfig`](crate::DiagnosticsConfig).
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Detect outliers in every numeric column of the table.
    pub fn detect(&self, table: &Table) -> OutlierAnalysis {
        let numeric: Vec<&Column> = table.numeric_columns().collect();
        if numeric.is_empty() {
            warn!("No numeric columns; skipping outlier detection");
            return OutlierAnalysis::NoNumericColumns;
        }

        let row_count = table.row_count();
        let columns: Vec<ColumnOutliers> = numeric
            .iter()
            .map(|column| self.detect_column(column))
            .collect();

        let outlier_cells: usize = columns.iter().map(|c| c.outlier_count).sum();
        let rows_with_outlier = (0..row_count)
            .filter(|&row| columns.iter().any(|c| c.mask[row]))
            .count();
        let total_numeric_cells = row_count * columns.len();

        let mut ranking: Vec<RankedColumn> = columns
            .iter()
            .map(|c| RankedColumn {
                name: c.name.clone(),
                outlier_count: c.outlier_count,
            })
            .collect();
        // stable sort keeps table order among ties
        ranking.sort_by(|a, b| b.outlier_count.cmp(&a.outlier_count));

        let report = OutlierReport {
            multiplier: self.multiplier,
            numeric_column_count: columns.len(),
            total_numeric_cells,
            outlier_cells,
            outlier_cell_percentage: percentage(outlier_cells, total_numeric_cells),
            rows_with_outlier,
            rows_with_outlier_percentage: percentage(rows_with_outlier, row_count),
            columns,
            ranking,
        };

        info!(
            "Outliers (IQR x {}): {} cells ({:.3}%), {} rows ({:.3}%) across {} numeric columns",
            report.multiplier,
            report.outlier_cells,
            report.outlier_cell_percentage,
            report.rows_with_outlier,
            report.rows_with_outlier_percentage,
            report.numeric_column_count
        );

        OutlierAnalysis::Computed(report)
    }

    fn detect_column(&self, column: &Column) -> ColumnOutliers {
        let values = column.as_numeric().unwrap_or_default();
        let sorted = statistics::sorted(values.iter().flatten().copied());

        let Some(quartiles) = statistics::quartiles(&sorted) else {
            debug!("Column '{}' has no values; fence not applicable", column.name());
            return ColumnOutliers {
                name: column.name().to_string(),
                fence: None,
                median: None,
                outlier_count: 0,
                mask: vec![false; values.len()],
            };
        };

        let fence = Fence::from_quartiles(quartiles.q1, quartiles.q3, self.multiplier);
        let mask: Vec<bool> = values
            .iter()
            .map(|value| value.is_some_and(|v| fence.is_outlier(v)))
            .collect();
        let outlier_count = mask.iter().filter(|&&flagged| flagged).count();

        debug!(
            "Column '{}': fences [{}, {}], {} outliers",
            column.name(),
            fence.lower,
            fence.upper,
            outlier_count
        );

        ColumnOutliers {
            name: column.name().to_string(),
            fence: Some(fence),
            median: Some(quartiles.median),
            outlier_count,
            mask,
        }
    }
}
