//! Midrank assignment for Spearman correlation.

/// Rank the present values of a column, 1-based, averaging ranks over ties.
///
/// Missing cells stay missing and do not take a rank.
pub(crate) fn midranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut order: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(row, value)| value.map(|v| (row, v)))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![None; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && order[end].1 == order[start].1 {
            end += 1;
        }
        // positions start..end share ranks start+1 ..= end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &(row, _) in &order[start..end] {
            ranks[row] = Some(rank);
        }
        start = end;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_values() {
        let ranks = midranks(&[Some(30.0), Some(10.0), Some(20.0)]);
        assert_eq!(ranks, vec![Some(3.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_ties_share_average_rank() {
        let ranks = midranks(&[Some(5.0), Some(1.0), Some(5.0), Some(5.0), Some(9.0)]);
        assert_eq!(
            ranks,
            vec![Some(3.0), Some(1.0), Some(3.0), Some(3.0), Some(5.0)]
        );
    }

    #[test]
    fn test_missing_cells_are_skipped() {
        let ranks = midranks(&[None, Some(2.0), None, Some(1.0)]);
        assert_eq!(ranks, vec![None, Some(2.0), None, Some(1.0)]);
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let ranks = midranks(&[Some(-0.0), Some(0.0), Some(1.0)]);
        assert_eq!(ranks, vec![Some(1.5), Some(1.5), Some(3.0)]);
    }
}
