//! Percentile Computation

/// Compute a single percentile from samples
///
/// Uses linear interpolation between nearest ranks.
///
/// ```
/// # use lanebench_stats::compute_percentile;
/// let samples = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 2.5);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    if samples.len() == 1 {
        return samples[0];
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let p = (percentile / 100.0).clamp(0.0, 1.0);

    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        assert_eq!(compute_percentile(&[30.0, 10.0, 20.0], 50.0), 20.0);
    }

    #[test]
    fn test_extremes() {
        let samples = [5.0, 1.0, 9.0, 3.0];
        assert_eq!(compute_percentile(&samples, 0.0), 1.0);
        assert_eq!(compute_percentile(&samples, 100.0), 9.0);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(compute_percentile(&[], 50.0), 0.0);
        assert_eq!(compute_percentile(&[7.5], 99.0), 7.5);
    }
}
