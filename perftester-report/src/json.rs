//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Parse a report previously written by [`generate_json_report`].
pub fn parse_json_report(json: &str) -> Result<Report, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MetricInfo, MetricValue, ReportEntry, ReportMeta};

    #[test]
    fn test_json_keeps_missing_values() {
        let report = Report {
            meta: ReportMeta::now(),
            metrics: vec![MetricInfo {
                label: "std".to_string(),
                unit: Some("s".to_string()),
            }],
            entries: vec![ReportEntry {
                label: "single".to_string(),
                group: "_".to_string(),
                samples: 1,
                values: vec![MetricValue::new("std", f64::NAN, f64::NAN, "s")],
            }],
        };

        let json = generate_json_report(&report).unwrap();
        assert!(json.contains("\"raw\": null"));

        let parsed = parse_json_report(&json).unwrap();
        assert_eq!(parsed.entries[0].values[0].raw, None);
        assert_eq!(parsed.metrics, report.metrics);
    }
}
