#![warn(missing_docs)]
//! LaneBench Statistical Engine
//!
//! Turns raw per-repetition timings into the numbers that end up on a chart:
//! - `SampleBuckets`: ordered duration samples keyed by (kind, group)
//! - `Statistic`: mean and population standard deviation (plus min/max/median)
//! - `finalize`: buckets → `Aggregated`, a kind → group → statistic map that
//!   keeps first-recorded order for both levels

mod aggregate;
mod bucket;
mod percentiles;
mod summary;

pub use aggregate::{Aggregated, GroupStatistic, KindStatistics, finalize};
pub use bucket::{SampleBuckets, SampleKey};
pub use percentiles::compute_percentile;
pub use summary::{Statistic, compute_statistic};
