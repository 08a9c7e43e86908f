//! Statistics for a Single Sample List
//!
//! Every metric is computed exactly once, at construction. Raw and scaled
//! values are kept side by side in metric registration order.

use crate::metric::{Metric, Scaled};
use std::fmt;

/// One computed metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    /// Metric label
    pub label: String,
    /// Raw value in the metric's base unit
    pub raw: f64,
    /// Display-scaled value
    pub scaled: Scaled,
}

/// Immutable metric results over one sample list
#[derive(Debug, Clone)]
pub struct Stats {
    data: Vec<f64>,
    results: Vec<MetricResult>,
}

impl Stats {
    /// Compute all `metrics` over `data`
    pub fn new(data: Vec<f64>, metrics: &[Metric]) -> Self {
        let results = metrics
            .iter()
            .map(|metric| {
                let raw = metric.compute(&data);
                MetricResult {
                    label: metric.label().to_string(),
                    raw,
                    scaled: metric.scale_value(raw),
                }
            })
            .collect();

        Self { data, results }
    }

    /// The underlying samples
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Results in metric registration order
    pub fn results(&self) -> &[MetricResult] {
        &self.results
    }

    /// Raw value of a metric
    pub fn raw(&self, label: &str) -> Option<f64> {
        self.find(label).map(|r| r.raw)
    }

    /// Scaled value of a metric
    pub fn scaled(&self, label: &str) -> Option<&Scaled> {
        self.find(label).map(|r| &r.scaled)
    }

    /// One table cell per metric, e.g. `"12.345 ms"`
    pub fn table_repr(&self) -> Vec<String> {
        self.results.iter().map(|r| r.scaled.to_string()).collect()
    }

    fn find(&self, label: &str) -> Option<&MetricResult> {
        self.results.iter().find(|r| r.label == label)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, result) in self.results.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{}: {} {}",
                result.label,
                significant(result.scaled.value, 2),
                result.scaled.unit
            )?;
        }
        Ok(())
    }
}

/// Format with `digits` significant digits, like a `g` conversion
///
/// Fixed notation unless the rounded exponent is below -4 or at least
/// `digits`. Trailing zeros are dropped.
fn significant(value: f64, digits: usize) -> String {
    if !value.is_finite() || value == 0.0 {
        return value.to_string();
    }
    let digits = digits.max(1);

    // Exponent after rounding, so 9.96 counts as 1.0e1
    let precision = digits - 1;
    let sci = format!("{value:.precision$e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.unsigned_abs())
    } else {
        let decimals = (digits as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
