//! Report Data Structures
//!
//! Serializable snapshot of a statistics collection, used by the JSON and
//! CSV writers. Values that are not finite (e.g. the standard deviation of a
//! single sample) are stored as `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report metadata
    pub meta: ReportMeta,
    /// Metrics in registration order
    pub metrics: Vec<MetricInfo>,
    /// One entry per label, in display order
    pub entries: Vec<ReportEntry>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Schema version for compatibility
    pub schema_version: u32,
    /// Perftester version
    pub version: String,
    /// When the report was generated
    pub timestamp: DateTime<Utc>,
}

impl ReportMeta {
    /// Metadata stamped with the current time
    pub fn now() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Metric description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInfo {
    /// Metric label, e.g. `avg`
    pub label: String,
    /// Base unit, if any
    pub unit: Option<String>,
}

/// Statistics for one label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Candidate label
    pub label: String,
    /// Group the label belongs to
    pub group: String,
    /// Number of samples
    pub samples: usize,
    /// Metric values in registration order
    pub values: Vec<MetricValue>,
}

/// One computed metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Metric label
    pub metric: String,
    /// Raw value in the metric's base unit
    pub raw: Option<f64>,
    /// Value divided by the display scale factor
    pub scaled: Option<f64>,
    /// Display unit including prefix, e.g. `ms`
    pub unit: String,
}

impl MetricValue {
    /// Build a value, mapping non-finite numbers to `None`
    pub fn new(metric: impl Into<String>, raw: f64, scaled: f64, unit: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            raw: finite(raw),
            scaled: finite(scaled),
            unit: unit.into(),
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_values() {
        let value = MetricValue::new("std", f64::NAN, f64::NAN, "s");
        assert_eq!(value.raw, None);
        assert_eq!(value.scaled, None);

        let value = MetricValue::new("avg", 0.05, 50.0, "ms");
        assert_eq!(value.raw, Some(0.05));
        assert_eq!(value.unit, "ms");
    }

    #[test]
    fn test_meta_now() {
        let meta = ReportMeta::now();
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert!(!meta.version.is_empty());
    }
}
