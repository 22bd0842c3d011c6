//! Statistical primitives shared by the profilers, the outlier detector and
//! the correlation engine.

/// First quartile, median and third quartile of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Sort values ascending. Callers never pass NaN (it is normalized to missing
/// when the table is built), so `total_cmp` matches numeric order here.
pub(crate) fn sorted(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Percentile of pre-sorted data using linear interpolation between order
/// statistics (position `p * (n - 1)`, the "type 7" definition).
///
/// Returns `None` for empty input or `p` outside `[0, 1]`.
pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let position = p * (n - 1) as f64;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;

    if lower + 1 >= n || fraction == 0.0 {
        return Some(sorted[lower.min(n - 1)]);
    }
    Some(sorted[lower] + (sorted[lower + 1] - sorted[lower]) * fraction)
}

pub(crate) fn quartiles(sorted: &[f64]) -> Option<Quartiles> {
    Some(Quartiles {
        q1: quantile_sorted(sorted, 0.25)?,
        median: quantile_sorted(sorted, 0.5)?,
        q3: quantile_sorted(sorted, 0.75)?,
    })
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// True when every value equals the first one (vacuously true for empty input).
pub(crate) fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}
