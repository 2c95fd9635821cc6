//! Chart Series
//!
//! One series per kind, one point per group: the shape a grouped bar chart
//! with error bars wants. Kind order and per-kind group order follow the
//! aggregated statistics, which keep first-recorded order.

use lanebench_stats::Aggregated;
use serde::{Deserialize, Serialize};

/// Bars of one kind across groups, with error bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Kind label (legend entry)
    pub name: String,
    /// Group labels (x axis)
    pub x: Vec<String>,
    /// Mean elapsed milliseconds per group
    pub y: Vec<f64>,
    /// Population standard deviation per group
    pub error: Vec<f64>,
}

impl Series {
    /// Number of data points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series has no points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate (group, mean, stddev) points
    pub fn points(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.x
            .iter()
            .zip(self.y.iter().zip(self.error.iter()))
            .map(|(x, (&y, &e))| (x.as_str(), y, e))
    }
}

/// Rendering configuration handed to a `ChartRenderer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartLayout {
    /// Chart title
    pub title: String,
    /// Y axis label
    pub y_title: String,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            title: "Scalar vs SIMD".to_string(),
            y_title: "elapsed (ms)".to_string(),
        }
    }
}

/// External chart collaborator: turns series into a visual artifact
pub trait ChartRenderer {
    /// Render the series with the given layout
    fn render(&mut self, series: &[Series], layout: &ChartLayout) -> String;
}

/// Build one series per kind from finalized statistics
pub fn build_series(statistics: &Aggregated) -> Vec<Series> {
    statistics
        .kinds()
        .iter()
        .map(|kind| Series {
            name: kind.kind.clone(),
            x: kind.groups.iter().map(|g| g.group.clone()).collect(),
            y: kind.groups.iter().map(|g| g.statistic.mean).collect(),
            error: kind.groups.iter().map(|g| g.statistic.std_dev).collect(),
        })
        .collect()
}

/// Build the series and hand them to `renderer`
pub fn publish<R>(statistics: &Aggregated, layout: &ChartLayout, renderer: &mut R) -> String
where
    R: ChartRenderer + ?Sized,
{
    let series = build_series(statistics);
    renderer.render(&series, layout)
}
