//! Grouped Statistics Collection
//!
//! Holds labelled [`Stats`] sharing one metric set, partitioned into named
//! groups for presentation. The printed table lists groups in lexicographic
//! order, labels within a group in lexicographic order, with a separator
//! row between groups.

use crate::metric::{Metric, default_metrics};
use crate::stats::Stats;
use perftester_report::{
    CLEAR_SCREEN, MetricInfo, MetricValue, Report, ReportEntry, ReportMeta, Row, Separator,
    construct_table, write_table,
};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

/// Group used for labels added without one
pub const DEFAULT_GROUP: &str = "_";

/// Labelled, grouped statistics over a shared metric set
#[derive(Debug, Clone)]
pub struct StatsCollection {
    metrics: Vec<Metric>,
    stats: BTreeMap<String, Stats>,
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl Default for StatsCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsCollection {
    /// Create a collection with the default timing metrics registered
    pub fn new() -> Self {
        let mut collection = Self::without_defaults();
        collection.register_metrics(default_metrics());
        collection
    }

    /// Create a collection with no metrics registered
    pub fn without_defaults() -> Self {
        Self {
            metrics: Vec::new(),
            stats: BTreeMap::new(),
            groups: BTreeMap::new(),
        }
    }

    /// Append a metric; only stats added afterwards use it
    pub fn register_metric(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    /// Append several metrics
    pub fn register_metrics(&mut self, metrics: impl IntoIterator<Item = Metric>) {
        self.metrics.extend(metrics);
    }

    /// Registered metrics in order
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Compute stats for `data` and store them under `label`
    ///
    /// Replaces any previous stats for `label`. The label is recorded under
    /// `group` (or [`DEFAULT_GROUP`]) and removed from any other group.
    pub fn add_stats(&mut self, label: impl Into<String>, data: Vec<f64>, group: Option<&str>) {
        let stats = Stats::new(data, &self.metrics);
        self.insert_stats(label.into(), stats, group);
    }

    /// Add several labelled sample lists to one group
    ///
    /// Stats are computed in parallel, then inserted in input order.
    pub fn add_many<I>(&mut self, entries: I, group: Option<&str>)
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let entries: Vec<(String, Vec<f64>)> = entries.into_iter().collect();
        let metrics = &self.metrics;
        let computed: Vec<(String, Stats)> = entries
            .into_par_iter()
            .map(|(label, data)| {
                let stats = Stats::new(data, metrics);
                (label, stats)
            })
            .collect();

        for (label, stats) in computed {
            self.insert_stats(label, stats, group);
        }
    }

    fn insert_stats(&mut self, label: String, stats: Stats, group: Option<&str>) {
        let group = group.filter(|g| !g.is_empty()).unwrap_or(DEFAULT_GROUP);

        self.groups.retain(|name, labels| {
            if name != group {
                labels.remove(&label);
            }
            name == group || !labels.is_empty()
        });
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(label.clone());
        self.stats.insert(label, stats);
    }

    /// Stats stored under `label`
    pub fn get(&self, label: &str) -> Option<&Stats> {
        self.stats.get(label)
    }

    /// Group a label belongs to
    pub fn group_of(&self, label: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, labels)| labels.contains(label))
            .map(|(name, _)| name.as_str())
    }

    /// Group names in display order
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of labelled stats
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether no stats are stored
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Drop all stats and groups, keeping registered metrics
    pub fn clear(&mut self) {
        self.stats.clear();
        self.groups.clear();
    }

    /// `(group, label, stats)` in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Stats)> {
        self.groups.iter().flat_map(move |(group, labels)| {
            labels.iter().filter_map(move |label| {
                self.stats
                    .get(label)
                    .map(|stats| (group.as_str(), label.as_str(), stats))
            })
        })
    }

    /// Table grid: header, separator, then grouped rows
    pub fn table_rows(&self) -> Vec<Row<String>> {
        let mut rows = Vec::with_capacity(self.stats.len() + self.groups.len() + 2);

        let header = std::iter::once("Label".to_string())
            .chain(self.metrics.iter().map(|m| m.label().to_string()))
            .collect();
        rows.push(Row::Cells(header));
        rows.push(Row::Separator);

        for (idx, labels) in self.groups.values().enumerate() {
            if idx > 0 {
                rows.push(Row::Separator);
            }
            for label in labels {
                if let Some(stats) = self.stats.get(label) {
                    let mut cells = Vec::with_capacity(self.metrics.len() + 1);
                    cells.push(label.clone());
                    cells.extend(stats.table_repr());
                    rows.push(Row::Cells(cells));
                }
            }
        }

        rows
    }

    /// Rendered table lines
    pub fn render(&self, sep: &Separator) -> Vec<String> {
        construct_table(&self.table_rows(), sep, false, None)
    }

    /// Write the table, optionally clearing the screen first
    pub fn write_all_stats<W: Write>(&self, writer: &mut W, clear: bool) -> io::Result<()> {
        if clear {
            write!(writer, "{CLEAR_SCREEN}")?;
        }
        write_table(writer, &self.table_rows(), &Separator::default())
    }

    /// Clear the console and print the table to stdout
    pub fn print_all_stats(&self) -> io::Result<()> {
        let stdout = io::stdout();
        self.write_all_stats(&mut stdout.lock(), true)
    }

    /// Serializable snapshot in display order
    pub fn to_report(&self) -> Report {
        let metrics = self
            .metrics
            .iter()
            .map(|m| MetricInfo {
                label: m.label().to_string(),
                unit: m.unit().map(str::to_string),
            })
            .collect();

        let entries = self
            .iter()
            .map(|(group, label, stats)| ReportEntry {
                label: label.to_string(),
                group: group.to_string(),
                samples: stats.data().len(),
                values: stats
                    .results()
                    .iter()
                    .map(|r| MetricValue::new(&r.label, r.raw, r.scaled.value, &r.scaled.unit))
                    .collect(),
            })
            .collect();

        Report {
            meta: ReportMeta::now(),
            metrics,
            entries,
        }
    }
}
