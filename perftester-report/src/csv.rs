//! CSV Output
//!
//! Long format: one line per (label, metric) pair.

use crate::report::Report;

/// Column header of the CSV report
pub const CSV_HEADER: &str = "label,group,samples,metric,raw,scaled,unit";

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::new();
    output.push_str(CSV_HEADER);
    output.push('\n');

    for entry in &report.entries {
        for value in &entry.values {
            let fields = [
                escape(&entry.label),
                escape(&entry.group),
                entry.samples.to_string(),
                escape(&value.metric),
                optional(value.raw),
                optional(value.scaled),
                escape(&value.unit),
            ];
            output.push_str(&fields.join(","));
            output.push('\n');
        }
    }

    output
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
