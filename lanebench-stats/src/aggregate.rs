//! Finalization
//!
//! Converts the buckets collected during a run into a two-level
//! kind → group → `Statistic` map. Both levels keep the order in which
//! they were first recorded. Empty buckets never appear in the output.

use crate::bucket::SampleBuckets;
use crate::summary::{Statistic, compute_statistic};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Statistic of one group within a kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStatistic {
    /// Workload label
    pub group: String,
    /// Timing statistic in milliseconds
    pub statistic: Statistic,
}

/// All group statistics of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindStatistics {
    /// Implementation variant label
    pub kind: String,
    /// Groups in first-recorded order
    pub groups: Vec<GroupStatistic>,
}

/// Output of `finalize`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregated {
    kinds: Vec<KindStatistics>,
}

impl Aggregated {
    /// Kinds in first-recorded order
    pub fn kinds(&self) -> &[KindStatistics] {
        &self.kinds
    }

    /// Look up the statistic of (kind, group)
    pub fn get(&self, kind: &str, group: &str) -> Option<&Statistic> {
        self.kinds
            .iter()
            .find(|k| k.kind == kind)?
            .groups
            .iter()
            .find(|g| g.group == group)
            .map(|g| &g.statistic)
    }

    /// Iterate every (kind, group, statistic) triple
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Statistic)> {
        self.kinds.iter().flat_map(|k| {
            k.groups
                .iter()
                .map(move |g| (k.kind.as_str(), g.group.as_str(), &g.statistic))
        })
    }

    /// Number of (kind, group) statistics
    pub fn len(&self) -> usize {
        self.kinds.iter().map(|k| k.groups.len()).sum()
    }

    /// Whether no statistic was produced
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    fn insert(&mut self, kind: &str, group: &str, statistic: Statistic) {
        let entry = GroupStatistic {
            group: group.to_string(),
            statistic,
        };
        match self.kinds.iter_mut().find(|k| k.kind == kind) {
            Some(existing) => existing.groups.push(entry),
            None => self.kinds.push(KindStatistics {
                kind: kind.to_string(),
                groups: vec![entry],
            }),
        }
    }
}

/// Compute one `Statistic` per non-empty bucket (parallelized with Rayon)
pub fn finalize(buckets: &SampleBuckets) -> Aggregated {
    let entries: Vec<_> = buckets.iter().collect();

    let computed: Vec<_> = entries
        .par_iter()
        .map(|(key, samples)| (*key, compute_statistic(samples)))
        .collect();

    let mut aggregated = Aggregated::default();
    for (key, statistic) in computed {
        if let Some(statistic) = statistic {
            aggregated.insert(&key.kind, &key.group, statistic);
        }
    }
    aggregated
}
