//! Sample Buckets
//!
//! Raw elapsed-time samples (milliseconds) grouped by (kind, group).
//! Buckets are kept in the order their key was first recorded so the
//! reporting layer can lay out groups the way they were first seen.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Key of a sample bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleKey {
    /// Implementation variant, e.g. "scalar" or "simd"
    pub kind: String,
    /// Workload label, e.g. "sum" or "matrix"
    pub group: String,
}

impl SampleKey {
    /// Build a key from kind and group labels
    pub fn new(kind: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            group: group.into(),
        }
    }
}

/// Ordered collection of sample buckets
#[derive(Debug, Clone, Default)]
pub struct SampleBuckets {
    index: FxHashMap<SampleKey, usize>,
    buckets: Vec<(SampleKey, Vec<f64>)>,
}

impl SampleBuckets {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one elapsed measurement (milliseconds) to the (kind, group) bucket
    pub fn record(&mut self, kind: &str, group: &str, elapsed_ms: f64) {
        let key = SampleKey::new(kind, group);
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.buckets.len();
                self.index.insert(key.clone(), slot);
                self.buckets.push((key, Vec::new()));
                slot
            }
        };
        self.buckets[slot].1.push(elapsed_ms);
    }

    /// Samples recorded for (kind, group), if any
    pub fn get(&self, kind: &str, group: &str) -> Option<&[f64]> {
        self.index
            .get(&SampleKey::new(kind, group))
            .map(|&slot| self.buckets[slot].1.as_slice())
    }

    /// Number of distinct (kind, group) buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of samples across all buckets
    pub fn total_samples(&self) -> usize {
        self.buckets.iter().map(|(_, s)| s.len()).sum()
    }

    /// Iterate buckets in first-recorded order
    pub fn iter(&self) -> impl Iterator<Item = (&SampleKey, &[f64])> {
        self.buckets.iter().map(|(k, s)| (k, s.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_in_order() {
        let mut buckets = SampleBuckets::new();
        buckets.record("simd", "sum", 1.0);
        buckets.record("scalar", "sum", 4.0);
        buckets.record("simd", "sum", 2.0);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.total_samples(), 3);
        assert_eq!(buckets.get("simd", "sum"), Some(&[1.0, 2.0][..]));
        assert_eq!(buckets.get("scalar", "sum"), Some(&[4.0][..]));
        assert!(buckets.get("scalar", "matrix").is_none());

        let order: Vec<_> = buckets.iter().map(|(k, _)| k.kind.as_str()).collect();
        assert_eq!(order, vec!["simd", "scalar"]);
    }

    #[test]
    fn test_empty() {
        let buckets = SampleBuckets::new();
        assert!(buckets.is_empty());
        assert_eq!(buckets.total_samples(), 0);
    }
}
