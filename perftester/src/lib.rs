#![warn(missing_docs)]
//! # Perftester
//!
//! Head-to-head performance comparison of competing implementations.
//!
//! Perftester generates one input per trial, hands it to every registered
//! candidate and times each call:
//! - **Shared inputs**: all candidates of a trial see the same generated data
//! - **Untimed adapters**: per-candidate input conversion stays out of the timings
//! - **Lazy results**: iterator outcomes are drained before the timer stops
//! - **External programs**: executables are timed over a full process run
//! - **Grouped statistics**: avg/std/min/max by default, plus median and percentiles
//! - **Readable output**: auto-scaled units (ns/µs/ms/s) in an aligned table,
//!   or JSON and CSV reports
//!
//! ## Quick Start
//!
//! ```no_run
//! use perftester::prelude::*;
//! use std::convert::Infallible;
//!
//! fn sum_loop(v: Vec<u64>) -> Result<Outcome<u64, std::iter::Empty<()>>, Infallible> {
//!     let mut total = 0;
//!     for x in v {
//!         total += x;
//!     }
//!     Ok(Outcome::immediate(total))
//! }
//!
//! let mut harness = Harness::new(100, || 10_000u64);
//! harness
//!     .add_function("", sum_loop, |n: &u64| (0..*n).collect::<Vec<_>>())
//!     .unwrap()
//!     .add_function(
//!         "iter_sum",
//!         |v: Vec<u64>| Ok::<_, Infallible>(Outcome::immediate(v.iter().sum::<u64>())),
//!         |n: &u64| (0..*n).collect::<Vec<_>>(),
//!     )
//!     .unwrap();
//! harness.compare_performance().unwrap();
//! ```

// Re-export the harness
pub use perftester_core::{
    BarProgress, BoxError, Candidate, FunctionCandidate, Harness, HarnessError, Outcome,
    ProgramCandidate, ProgramError, Progress, SampleSet, SilentProgress, Timer,
};

// Re-export stats
pub use perftester_stats::{
    DEFAULT_GROUP, Metric, MetricResult, SECONDS, Scaled, Stats, StatsCollection,
    default_metrics, sample,
};

// Re-export presentation
pub use perftester_report::{
    OutputFormat, Report, Row, Selection, Separator, generate_csv_report, generate_json_report,
    organize_data, print_table, select_element_in_table,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Harness, HarnessError, Metric, Outcome, Row, Separator, Stats, StatsCollection,
        print_table,
    };
}

/// Run the Perftester CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     perftester::run().unwrap();
/// }
/// ```
pub use perftester_cli::run;
