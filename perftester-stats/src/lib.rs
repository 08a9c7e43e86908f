#![warn(missing_docs)]
//! Perftester Statistical Engine
//!
//! Turns timing samples into display-ready statistics:
//! - Plain sample statistics (mean, sample stddev, min, max, percentiles)
//! - Named metrics with SI-prefix auto-scaling for display
//! - Per-label stats computed once and kept immutable
//! - Grouped collections rendered as one aligned table
//!
//! Deliberately raw: no warm-up discarding, outlier rejection or
//! confidence intervals.

mod collection;
mod metric;
pub mod sample;
mod stats;

pub use collection::{DEFAULT_GROUP, StatsCollection};
pub use metric::{Metric, MetricFn, SCALES, Scaled, default_metrics};
pub use stats::{MetricResult, Stats};

/// Default display unit of timing metrics
pub const SECONDS: &str = "s";
