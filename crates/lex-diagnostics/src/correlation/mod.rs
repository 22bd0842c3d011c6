//! Pairwise correlation matrices over numeric columns.
//!
//! Both methods use pairwise-complete observations: for each pair of columns,
//! only rows where both cells are present contribute. Spearman ranks each
//! column once over its own present values (midranks for ties) and then
//! applies Pearson to the ranks.

mod ranks;

use crate::profiler::statistics::is_constant;
use crate::table::Table;
use crate::types::{CorrelationAnalysis, CorrelationMatrix, CorrelationMethod};
use tracing::{debug, info, warn};

pub(crate) use ranks::midranks;

/// Computes correlation matrices.
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// Compute the matrix for one method.
    ///
    /// Each unordered pair is computed once and mirrored, so the result is
    /// symmetric by construction.
    pub fn compute(table: &Table, method: CorrelationMethod) -> CorrelationAnalysis {
        let names: Vec<String> = table
            .numeric_columns()
            .map(|column| column.name().to_string())
            .collect();
        if names.is_empty() {
            warn!("No numeric columns; skipping {} correlation", method);
            return CorrelationAnalysis::NoNumericColumns { method };
        }

        let series: Vec<Vec<Option<f64>>> = table
            .numeric_columns()
            .map(|column| {
                let values = column.as_numeric().unwrap_or_default();
                match method {
                    CorrelationMethod::Pearson => values.to_vec(),
                    CorrelationMethod::Spearman => midranks(values),
                }
            })
            .collect();

        let n = series.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            values[i][i] = self_correlation(&series[i]);
            for j in (i + 1)..n {
                let coefficient = pearson(&series[i], &series[j]);
                values[i][j] = coefficient;
                values[j][i] = coefficient;
            }
        }

        let undefined = values.iter().flatten().filter(|v| v.is_none()).count();
        debug!("{} correlation: {} undefined cells", method, undefined);
        info!("Computed {} correlation over {} numeric columns", method, n);

        CorrelationAnalysis::Computed(CorrelationMatrix {
            method,
            columns: names,
            values,
        })
    }

    /// Compute one matrix per method, in the given order.
    pub fn compute_all(
        table: &Table,
        methods: &[CorrelationMethod],
    ) -> Vec<CorrelationAnalysis> {
        methods
            .iter()
            .map(|&method| Self::compute(table, method))
            .collect()
    }

    /// Numeric columns whose self-correlation is undefined: fewer than two
    /// present values, or all present values equal.
    pub fn degenerate_columns(table: &Table) -> Vec<String> {
        table
            .numeric_columns()
            .filter(|column| {
                self_correlation(column.as_numeric().unwrap_or_default()).is_none()
            })
            .map(|column| column.name().to_string())
            .collect()
    }
}

/// 1.0 when the column has at least two distinct present values, else undefined.
fn self_correlation(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    (present.len() >= 2 && !is_constant(&present)).then_some(1.0)
}

/// Pearson coefficient over rows where both values are present.
///
/// Undefined with fewer than two pairs or when either side is constant over
/// those pairs.
pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    if xs.len() < 2 || is_constant(&xs) || is_constant(&ys) {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in xs.iter().zip(&ys) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}
