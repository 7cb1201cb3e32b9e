//! Quality metrics for synthesised clock trees: skew reports and structural
//! statistics.

use itertools::{Itertools, MinMaxResult};

use crate::cts::ClockTree;

/// Sink-delay summary of a clock tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SkewReport {
    pub max_delay: f64,
    pub min_delay: f64,
    /// `max_delay - min_delay`; zero for a perfectly balanced tree.
    pub skew: f64,
    /// Delays of the sinks, in arena order.
    pub sink_delays: Vec<f64>,
    pub total_wirelength: i64,
}

/// Collects the sink delays of `tree` into a [`SkewReport`].
pub fn skew<P>(tree: &ClockTree<P>) -> SkewReport {
    let sink_delays: Vec<f64> = tree.sinks().map(|n| n.delay).collect();
    let (min_delay, max_delay) = match sink_delays.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(d) => (d, d),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    SkewReport {
        max_delay,
        min_delay,
        skew: max_delay - min_delay,
        sink_delays,
        total_wirelength: tree.total_wirelength(),
    }
}

/// Structural counts of a clock tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeStatistics {
    pub total_nodes: usize,
    pub total_sinks: usize,
    /// Parent/child wires; one fewer than the node count.
    pub total_wires: usize,
    pub sink_names: Vec<String>,
}

pub fn tree_statistics<P>(tree: &ClockTree<P>) -> TreeStatistics {
    let sink_names: Vec<String> = tree.sinks().map(|n| n.name.clone()).collect();
    TreeStatistics {
        total_nodes: tree.len(),
        total_sinks: sink_names.len(),
        total_wires: tree.len().saturating_sub(1),
        sink_names,
    }
}
