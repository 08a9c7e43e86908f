//! Comparison Harness
//!
//! Runs every registered candidate against the same generated input, trial
//! after trial, and records elapsed seconds per candidate label.

use crate::candidate::{BoxError, Candidate, FunctionCandidate, Outcome};
use crate::program::ProgramCandidate;
use crate::progress::{Progress, SilentProgress};
use perftester_stats::StatsCollection;
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors produced by the harness
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A candidate with this label is already registered
    #[error("duplicate candidate label: {0}")]
    DuplicateLabel(String),

    /// A candidate failed during a trial
    #[error("candidate '{label}' failed in trial {trial}: {source}")]
    Candidate {
        /// Label of the failing candidate
        label: String,
        /// Zero-based trial index
        trial: usize,
        /// Error returned by the candidate
        #[source]
        source: BoxError,
    },

    /// Writing the results table failed
    #[error("failed to write results: {0}")]
    Output(#[from] io::Error),
}

/// Recorded samples for one candidate
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    /// Candidate label
    pub label: String,
    /// Elapsed seconds, one per completed trial
    pub samples: Vec<f64>,
}

/// Sequential comparison harness over inputs of type `D`
pub struct Harness<D> {
    num_tests: usize,
    generator: Box<dyn FnMut() -> D>,
    candidates: Vec<Box<dyn Candidate<D>>>,
    results: Vec<SampleSet>,
    progress: Box<dyn Progress>,
    program_dir: Option<PathBuf>,
}

impl<D> Harness<D> {
    /// Create a harness running `num_tests` trials on inputs from `generator`
    pub fn new<G>(num_tests: usize, generator: G) -> Self
    where
        G: FnMut() -> D + 'static,
    {
        Self {
            num_tests,
            generator: Box::new(generator),
            candidates: Vec::new(),
            results: Vec::new(),
            progress: Box::new(SilentProgress),
            program_dir: None,
        }
    }

    /// Report trial progress to `progress`
    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Resolve relative program paths against `dir`
    pub fn with_program_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.program_dir = Some(dir.into());
        self
    }

    /// Number of trials per run
    pub fn num_tests(&self) -> usize {
        self.num_tests
    }

    /// Directory used for relative program paths
    pub fn program_dir(&self) -> Option<&Path> {
        self.program_dir.as_deref()
    }

    /// Register an in-process function
    ///
    /// `adapter` converts each trial's input for `invocable`; only the
    /// invocation (and draining of a lazy [`Outcome`]) is timed. An empty
    /// label defaults to the function's name.
    pub fn add_function<I, T, L, E, A, F>(
        &mut self,
        label: impl Into<String>,
        invocable: F,
        adapter: A,
    ) -> Result<&mut Self, HarnessError>
    where
        A: FnMut(&D) -> I + 'static,
        F: FnMut(I) -> Result<Outcome<T, L>, E> + 'static,
        L: Iterator,
        E: Into<BoxError>,
    {
        self.add_candidate(FunctionCandidate::new(label, invocable, adapter))
    }

    /// Register an external executable
    ///
    /// `adapter` turns each trial's input into command-line arguments. An
    /// empty label defaults to the executable's file name.
    pub fn add_program<I, A>(
        &mut self,
        label: impl Into<String>,
        executable: impl Into<PathBuf>,
        adapter: A,
    ) -> Result<&mut Self, HarnessError>
    where
        A: FnMut(&D) -> I + 'static,
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let mut candidate = ProgramCandidate::new(label, executable, adapter);
        if let Some(dir) = &self.program_dir {
            candidate = candidate.in_dir(dir);
        }
        self.add_candidate(candidate)
    }

    /// Register any candidate
    pub fn add_candidate(
        &mut self,
        candidate: impl Candidate<D> + 'static,
    ) -> Result<&mut Self, HarnessError> {
        let label = candidate.label().to_string();
        if self.results.iter().any(|set| set.label == label) {
            return Err(HarnessError::DuplicateLabel(label));
        }

        debug!(label = %label, "Registered candidate");
        self.results.push(SampleSet {
            label,
            samples: Vec::new(),
        });
        self.candidates.push(Box::new(candidate));
        Ok(self)
    }

    /// Labels in registration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|set| set.label.as_str())
    }

    /// Run all trials
    ///
    /// Samples are appended to any recorded by earlier runs. The first
    /// candidate error aborts the run; samples recorded up to that point are
    /// kept.
    pub fn run_tests(&mut self) -> Result<(), HarnessError> {
        info!(
            trials = self.num_tests,
            candidates = self.candidates.len(),
            "Starting comparison"
        );

        self.progress.start(self.num_tests);
        let outcome = self.run_trials();
        match &outcome {
            Ok(()) => {
                self.progress.finish();
                info!("Comparison complete");
            }
            Err(_) => self.progress.abort(),
        }
        outcome
    }

    fn run_trials(&mut self) -> Result<(), HarnessError> {
        for trial in 0..self.num_tests {
            self.progress.update(trial, self.num_tests);
            let data = (self.generator)();

            for (candidate, set) in self.candidates.iter_mut().zip(&mut self.results) {
                let elapsed = candidate
                    .run(&data)
                    .map_err(|source| HarnessError::Candidate {
                        label: set.label.clone(),
                        trial,
                        source,
                    })?;

                debug!(
                    label = %set.label,
                    trial,
                    elapsed_ns = elapsed.as_nanos() as u64,
                    "Timed invocation"
                );
                set.samples.push(elapsed.as_secs_f64());
            }
        }
        Ok(())
    }

    /// Recorded samples in registration order
    pub fn results(&self) -> &[SampleSet] {
        &self.results
    }

    /// Samples recorded for one label
    pub fn samples(&self, label: &str) -> Option<&[f64]> {
        self.results
            .iter()
            .find(|set| set.label == label)
            .map(|set| set.samples.as_slice())
    }

    /// Feed every sample list into `collection` under the default group
    pub fn collect_into(&self, collection: &mut StatsCollection) {
        collection.add_many(
            self.results
                .iter()
                .map(|set| (set.label.clone(), set.samples.clone())),
            None,
        );
    }

    /// Statistics over the recorded samples, using the default metrics
    pub fn collect_stats(&self) -> StatsCollection {
        let mut collection = StatsCollection::new();
        self.collect_into(&mut collection);
        collection
    }

    /// Run all trials, then print the statistics table to stdout
    pub fn compare_performance(&mut self) -> Result<StatsCollection, HarnessError> {
        let stdout = io::stdout();
        self.compare_performance_to(&mut stdout.lock(), true)
    }

    /// Run all trials, then write the statistics table to `writer`
    ///
    /// With `clear`, the table is preceded by a screen-clear sequence.
    pub fn compare_performance_to<W: Write>(
        &mut self,
        writer: &mut W,
        clear: bool,
    ) -> Result<StatsCollection, HarnessError> {
        self.run_tests()?;
        let collection = self.collect_stats();
        collection.write_all_stats(writer, clear)?;
        Ok(collection)
    }
}
