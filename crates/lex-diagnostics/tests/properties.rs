//! Property tests for invariants that must hold on any table.

use lex_diagnostics::{
    Column, CorrelationAnalysis, CorrelationEngine, CorrelationMatrix, CorrelationMethod,
    MissingValueProfiler, OutlierDetector, Table,
};
use proptest::prelude::*;

fn optional_values(len: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.8, -1_000.0f64..1_000.0), len)
}

/// Between one and four numeric columns of equal length, with gaps.
fn numeric_table() -> impl Strategy<Value = Table> {
    (1usize..40, 1usize..5).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(optional_values(rows), cols).prop_map(|columns| {
            let columns = columns
                .into_iter()
                .enumerate()
                .map(|(i, values)| Column::numeric(format!("c{}", i), values))
                .collect();
            Table::new(columns).expect("columns share a length")
        })
    })
}

fn matrix(table: &Table, method: CorrelationMethod) -> CorrelationMatrix {
    match CorrelationEngine::compute(table, method) {
        CorrelationAnalysis::Computed(matrix) => matrix,
        other => panic!("expected matrix, got {:?}", other),
    }
}

proptest! {
    #[test]
    fn missing_counts_sum_to_global_total(table in numeric_table()) {
        let report = MissingValueProfiler::profile(&table);
        let per_column: usize = report.columns.iter().map(|c| c.count).sum();
        prop_assert_eq!(per_column, report.total.missing_cells);
        prop_assert!(report.total.missing_cells <= report.total.total_cells);
        prop_assert!(report.columns.iter().all(|c| c.count > 0));
    }

    #[test]
    fn fences_are_ordered(
        values in prop::collection::hash_set(-1_000i32..1_000, 4..50),
        multiplier in 0.0f64..5.0,
    ) {
        let values: Vec<Option<f64>> = values.into_iter().map(|v| Some(v as f64)).collect();
        let table = Table::new(vec![Column::numeric("x", values)]).unwrap();

        let analysis = OutlierDetector::new(multiplier).detect(&table);
        let column = analysis.report().unwrap().column("x").unwrap();
        let fence = column.fence.unwrap();
        let median = column.median.unwrap();
        prop_assert!(fence.lower <= fence.q1);
        prop_assert!(fence.q1 <= median);
        prop_assert!(median <= fence.q3);
        prop_assert!(fence.q3 <= fence.upper);
    }

    #[test]
    fn outlier_mask_matches_counts(table in numeric_table()) {
        let analysis = OutlierDetector::default().detect(&table);
        let report = analysis.report().unwrap();
        for column in &report.columns {
            prop_assert_eq!(column.mask.len(), table.row_count());
            prop_assert_eq!(
                column.mask.iter().filter(|&&m| m).count(),
                column.outlier_count
            );
        }
        prop_assert!(report.rows_with_outlier <= report.outlier_cells);
    }

    #[test]
    fn correlation_matrix_is_symmetric_and_bounded(table in numeric_table()) {
        for method in CorrelationMethod::ALL {
            let m = matrix(&table, method);
            for i in 0..m.len() {
                let diagonal = m.get(i, i);
                prop_assert!(diagonal.is_none() || diagonal == Some(1.0));
                for j in 0..m.len() {
                    prop_assert_eq!(m.get(i, j), m.get(j, i));
                    if let Some(r) = m.get(i, j) {
                        prop_assert!((-1.0..=1.0).contains(&r));
                    }
                }
            }
        }
    }

    #[test]
    fn spearman_invariant_under_monotonic_maps(
        pairs in prop::collection::vec((-50i32..50, -50i32..50), 3..40),
    ) {
        let x: Vec<Option<f64>> = pairs.iter().map(|&(a, _)| Some(a as f64)).collect();
        let y: Vec<Option<f64>> = pairs.iter().map(|&(_, b)| Some(b as f64)).collect();
        let linear: Vec<Option<f64>> = x.iter().map(|v| v.map(|a| 3.0 * a + 7.0)).collect();
        let cubic: Vec<Option<f64>> = x.iter().map(|v| v.map(|a| a * a * a)).collect();

        let table = Table::new(vec![
            Column::numeric("x", x),
            Column::numeric("y", y),
            Column::numeric("linear", linear),
            Column::numeric("cubic", cubic),
        ])
        .unwrap();

        let m = matrix(&table, CorrelationMethod::Spearman);
        let base = m.coefficient("x", "y");
        for transformed in ["linear", "cubic"] {
            let other = m.coefficient(transformed, "y");
            prop_assert_eq!(base.is_some(), other.is_some());
            if let (Some(a), Some(b)) = (base, other) {
                prop_assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
            }
        }
    }
}
