#![warn(missing_docs)]
//! Perftester Core - Comparison Harness
//!
//! This crate runs the head-to-head comparisons:
//! - `Harness` generating one input per trial and timing every candidate on it
//! - In-process function candidates with an untimed input adapter
//! - External program candidates timed over a full process run
//! - `Outcome` so lazy results are drained inside the timed region
//! - Progress reporting through a small trait, with an indicatif bar

mod candidate;
mod harness;
mod measure;
mod program;
mod progress;

pub use candidate::{BoxError, Candidate, FunctionCandidate, Outcome, type_label};
pub use harness::{Harness, HarnessError, SampleSet};
pub use measure::Timer;
pub use program::{ProgramCandidate, ProgramError};
pub use progress::{BarProgress, Progress, SilentProgress};
