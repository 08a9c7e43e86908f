//! Metrics and Unit Scaling
//!
//! A [`Metric`] is a named statistic over a sample list. Metrics with a unit
//! are auto-scaled for display: the finest SI prefix that keeps the magnitude
//! under 100 wins, so `0.05 s` is shown as `50.000 ms`.

use crate::sample;
use std::fmt;
use std::sync::Arc;

/// Compute function of a metric
pub type MetricFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// Display scales in ascending order: (factor, unit prefix)
pub const SCALES: [(f64, &str); 4] = [(1e-9, "n"), (1e-6, "µ"), (1e-3, "m"), (1.0, "")];

/// A value scaled for display
#[derive(Debug, Clone, PartialEq)]
pub struct Scaled {
    /// Raw value divided by `factor`
    pub value: f64,
    /// Scale factor applied
    pub factor: f64,
    /// Prefixed unit, empty for unitless metrics
    pub unit: String,
}

impl fmt::Display for Scaled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:6.3} {}", self.value, self.unit)
    }
}

/// Named statistic with an optional display unit
#[derive(Clone)]
pub struct Metric {
    label: String,
    compute: Arc<MetricFn>,
    unit: Option<String>,
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("label", &self.label)
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

impl Metric {
    /// Create a metric. An empty unit is treated as no unit.
    pub fn new<F>(label: impl Into<String>, compute: F, unit: Option<&str>) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            compute: Arc::new(compute),
            unit: unit.filter(|u| !u.is_empty()).map(str::to_string),
        }
    }

    /// Arithmetic mean, labelled `avg`
    pub fn mean(unit: Option<&str>) -> Self {
        Self::new("avg", sample::mean, unit)
    }

    /// Sample standard deviation, labelled `std`
    pub fn stddev(unit: Option<&str>) -> Self {
        Self::new("std", sample::stddev, unit)
    }

    /// Minimum, labelled `min`
    pub fn min(unit: Option<&str>) -> Self {
        Self::new("min", sample::minimum, unit)
    }

    /// Maximum, labelled `max`
    pub fn max(unit: Option<&str>) -> Self {
        Self::new("max", sample::maximum, unit)
    }

    /// Median, labelled `median`
    pub fn median(unit: Option<&str>) -> Self {
        Self::new("median", sample::median, unit)
    }

    /// Arbitrary percentile in `[0, 100]`
    pub fn percentile(label: impl Into<String>, p: f64, unit: Option<&str>) -> Self {
        Self::new(label, move |data| sample::percentile(data, p), unit)
    }

    /// Metric label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Base unit, if any
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Compute the metric over `data`
    pub fn compute(&self, data: &[f64]) -> f64 {
        (self.compute)(data)
    }

    /// Scale a raw value for display
    ///
    /// Without a unit the value is returned unchanged with an empty unit.
    /// Otherwise the first entry of [`SCALES`] with `|value| < factor * 100`
    /// is applied; values beyond every threshold (and `NaN`) keep the base unit.
    pub fn scale_value(&self, value: f64) -> Scaled {
        let Some(unit) = self.unit.as_deref() else {
            return Scaled {
                value,
                factor: 1.0,
                unit: String::new(),
            };
        };

        for (factor, prefix) in SCALES {
            if value.abs() < factor * 100.0 {
                return Scaled {
                    value: value / factor,
                    factor,
                    unit: format!("{prefix}{unit}"),
                };
            }
        }

        Scaled {
            value,
            factor: 1.0,
            unit: unit.to_string(),
        }
    }
}

/// The default timing metrics: `avg`, `std`, `min`, `max`, all in seconds
pub fn default_metrics() -> Vec<Metric> {
    let unit = Some(crate::SECONDS);
    vec![
        Metric::mean(unit),
        Metric::stddev(unit),
        Metric::min(unit),
        Metric::max(unit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds() -> Metric {
        Metric::mean(Some("s"))
    }

    #[test]
    fn test_default_metrics() {
        let labels: Vec<_> = default_metrics()
            .iter()
            .map(|m| m.label().to_string())
            .collect();
        assert_eq!(labels, vec!["avg", "std", "min", "max"]);
        assert!(default_metrics().iter().all(|m| m.unit() == Some("s")));
    }

    #[test]
    fn test_scale_prefers_finer_unit() {
        let scaled = seconds().scale_value(0.05);
        assert_eq!(scaled.unit, "ms");
        assert!((scaled.value - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_thresholds() {
        let metric = seconds();

        assert_eq!(metric.scale_value(5e-8).unit, "ns");
        assert_eq!(metric.scale_value(2.5e-5).unit, "µs");
        assert_eq!(metric.scale_value(9.9e-5).unit, "µs");
        assert_eq!(metric.scale_value(2e-4).unit, "ms");
        assert_eq!(metric.scale_value(0.0).unit, "ns");
        assert_eq!(metric.scale_value(-0.02).unit, "ms");
    }

    #[test]
    fn test_scale_beyond_all_thresholds() {
        let scaled = seconds().scale_value(150.0);
        assert_eq!(scaled.value, 150.0);
        assert_eq!(scaled.factor, 1.0);
        assert_eq!(scaled.unit, "s");
    }

    #[test]
    fn test_scale_nan_keeps_base_unit() {
        let scaled = seconds().scale_value(f64::NAN);
        assert!(scaled.value.is_nan());
        assert_eq!(scaled.unit, "s");
    }

    #[test]
    fn test_scale_round_trip() {
        let metric = seconds();
        for raw in [3.2e-9, 7.7e-7, 4.1e-5, 0.0123, 0.5, 42.0, 99.9] {
            let scaled = metric.scale_value(raw);
            assert!((scaled.value * scaled.factor - raw).abs() <= raw * 1e-12);
            assert!(scaled.value.abs() < 100.0);
            // No finer scale would also keep the magnitude under 100
            let finer = SCALES
                .iter()
                .take_while(|(factor, _)| *factor < scaled.factor)
                .any(|(factor, _)| raw / factor < 100.0);
            assert!(!finer);
        }
    }

    #[test]
    fn test_unitless_metric() {
        let metric = Metric::new("count", |data| data.len() as f64, None);
        let scaled = metric.scale_value(0.001);
        assert_eq!(scaled.value, 0.001);
        assert_eq!(scaled.unit, "");

        let empty_unit = Metric::new("count", |data| data.len() as f64, Some(""));
        assert_eq!(empty_unit.unit(), None);
        assert_eq!(empty_unit.compute(&[1.0, 2.0]), 2.0);
    }

    #[test]
    fn test_percentile_metric() {
        let metric = Metric::percentile("p90", 90.0, Some("s"));
        assert_eq!(metric.label(), "p90");
        let p90 = metric.compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((p90 - 4.6).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_display() {
        let scaled = seconds().scale_value(0.0123);
        assert_eq!(scaled.to_string(), "12.300 ms");
    }
}
