//! Per-bucket Statistics
//!
//! Standard deviation uses the population formula (divide by n).

use crate::percentiles::compute_percentile;
use serde::{Deserialize, Serialize};

/// Statistic derived from one (kind, group) bucket, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Median (linear interpolation)
    pub median: f64,
    /// Number of samples the statistic was computed from
    pub sample_count: usize,
}

/// Compute the statistic of a bucket; `None` when the bucket is empty
pub fn compute_statistic(samples: &[f64]) -> Option<Statistic> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(Statistic {
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
        median: compute_percentile(samples, 50.0),
        sample_count: samples.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_std_dev() {
        let stat = compute_statistic(&[10.0, 20.0, 30.0]).unwrap();

        assert!((stat.mean - 20.0).abs() < 1e-12);
        assert!((stat.std_dev - (200.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((stat.std_dev - 8.165).abs() < 1e-3);
        assert_eq!(stat.min, 10.0);
        assert_eq!(stat.max, 30.0);
        assert_eq!(stat.median, 20.0);
        assert_eq!(stat.sample_count, 3);
    }

    #[test]
    fn test_single_sample_is_degenerate_not_error() {
        let stat = compute_statistic(&[4.25]).unwrap();
        assert_eq!(stat.mean, 4.25);
        assert_eq!(stat.std_dev, 0.0);
    }

    #[test]
    fn test_empty_bucket() {
        assert!(compute_statistic(&[]).is_none());
    }
}
