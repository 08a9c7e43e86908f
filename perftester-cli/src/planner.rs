//! Comparison Planner
//!
//! Turns command-line program arguments into an ordered list of candidates.
//!
//! - Each argument is `LABEL=PATH` or a bare `PATH`
//! - A regex filter on labels drops candidates before anything runs
//! - Order is preserved; it becomes the harness registration order

use perftester_stats::Metric;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One program to compare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSpec {
    /// Display label; empty means "use the file name"
    pub label: String,
    /// Executable path, possibly relative to the program directory
    pub path: PathBuf,
}

impl ProgramSpec {
    /// Label shown in tables: the explicit label or the file name
    pub fn display_label(&self) -> String {
        if !self.label.is_empty() {
            return self.label.clone();
        }
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Path after resolving against `dir`
    pub fn resolved_path(&self, dir: Option<&Path>) -> PathBuf {
        match dir {
            Some(dir) if self.path.is_relative() => dir.join(&self.path),
            _ => self.path.clone(),
        }
    }
}

impl FromStr for ProgramSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, path) = match s.split_once('=') {
            Some((label, path)) => (label.trim(), path.trim()),
            None => ("", s.trim()),
        };
        if path.is_empty() {
            return Err(format!("Missing program path in '{s}'"));
        }
        Ok(Self {
            label: label.to_string(),
            path: PathBuf::from(path),
        })
    }
}

/// Execution plan for a comparison
pub struct ExecutionPlan {
    /// Programs to run, in registration order
    pub programs: Vec<ProgramSpec>,
}

/// Build execution plan from the requested programs
///
/// Keeps only programs whose display label matches `filter`.
pub fn build_plan(
    programs: impl IntoIterator<Item = ProgramSpec>,
    filter: Option<&Regex>,
) -> ExecutionPlan {
    let programs = programs
        .into_iter()
        .filter(|p| filter.is_none_or(|re| re.is_match(&p.display_label())))
        .collect();

    ExecutionPlan { programs }
}

/// Parse a metric name: `median`, or `pNN` for the NN-th percentile
pub fn parse_metric(name: &str, unit: Option<&str>) -> Result<Metric, String> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("median") {
        return Ok(Metric::median(unit));
    }

    let p = name
        .strip_prefix('p')
        .or_else(|| name.strip_prefix('P'))
        .and_then(|digits| digits.parse::<f64>().ok())
        .filter(|p| (0.0..=100.0).contains(p))
        .ok_or_else(|| format!("Unknown metric: {name} (expected median or pNN)"))?;

    Ok(Metric::percentile(name.to_lowercase(), p, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> ProgramSpec {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_program_spec() {
        let labelled = spec("fast=./bin/prime_fast");
        assert_eq!(labelled.label, "fast");
        assert_eq!(labelled.path, PathBuf::from("./bin/prime_fast"));
        assert_eq!(labelled.display_label(), "fast");

        let bare = spec("/usr/bin/prime_slow");
        assert_eq!(bare.label, "");
        assert_eq!(bare.display_label(), "prime_slow");

        assert!("fast=".parse::<ProgramSpec>().is_err());
        assert!("".parse::<ProgramSpec>().is_err());
    }

    #[test]
    fn test_resolved_path() {
        let dir = Path::new("/opt/progs");
        assert_eq!(
            spec("a").resolved_path(Some(dir)),
            PathBuf::from("/opt/progs/a")
        );
        assert_eq!(
            spec("/bin/a").resolved_path(Some(dir)),
            PathBuf::from("/bin/a")
        );
        assert_eq!(spec("a").resolved_path(None), PathBuf::from("a"));
    }

    #[test]
    fn test_no_filter_keeps_order() {
        let plan = build_plan(vec![spec("c"), spec("a"), spec("b")], None);

        let labels: Vec<_> = plan.programs.iter().map(|p| p.display_label()).collect();
        assert_eq!(labels, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_regex_filter() {
        let re = Regex::new("^prime_").unwrap();
        let plan = build_plan(
            vec![spec("prime_fast"), spec("sieve"), spec("x=prime_slow")],
            Some(&re),
        );

        assert_eq!(plan.programs.len(), 1);
        assert_eq!(plan.programs[0].display_label(), "prime_fast");
    }

    #[test]
    fn test_parse_metric() {
        let median = parse_metric("median", Some("s")).unwrap();
        assert_eq!(median.label(), "median");

        let p95 = parse_metric("P95", Some("s")).unwrap();
        assert_eq!(p95.label(), "p95");
        assert!((p95.compute(&[1.0, 2.0, 3.0]) - 2.9).abs() < 1e-12);

        assert!(parse_metric("p101", None).is_err());
        assert!(parse_metric("mode", None).is_err());
    }
}
