//! Candidates Under Comparison
//!
//! A candidate pairs an adapter, which reshapes the shared trial input into
//! the candidate's own calling convention, with an invocable, the timed unit.
//! Only the invocable is timed; adaptation happens before the timer starts.
//!
//! Invocables report what they produced through [`Outcome`]. A lazy outcome
//! is drained to exhaustion before the timer stops, so iterator-returning
//! implementations are charged for producing every item rather than just for
//! constructing the iterator.

use crate::measure::Timer;
use std::hint::black_box;
use std::time::Duration;

/// Boxed error returned by candidates
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Value produced by an invocable
#[derive(Debug, Clone)]
pub enum Outcome<T, L> {
    /// Result computed eagerly by the call
    Immediate(T),
    /// Sequence produced on demand; drained under the timer
    Lazy(L),
}

impl<T> Outcome<T, std::iter::Empty<()>> {
    /// Wrap an eagerly computed value
    pub fn immediate(value: T) -> Self {
        Outcome::Immediate(value)
    }
}

impl<L: Iterator> Outcome<(), L> {
    /// Wrap a lazily produced sequence
    pub fn lazy<I: IntoIterator<IntoIter = L>>(items: I) -> Self {
        Outcome::Lazy(items.into_iter())
    }
}

impl<T, L: Iterator> Outcome<T, L> {
    /// Consume the outcome, draining lazy sequences
    ///
    /// Returns the number of items a lazy sequence produced (0 for immediate
    /// values).
    pub fn settle(self) -> usize {
        match self {
            Outcome::Immediate(value) => {
                black_box(value);
                0
            }
            Outcome::Lazy(items) => {
                let mut produced = 0;
                for item in items {
                    black_box(item);
                    produced += 1;
                }
                produced
            }
        }
    }
}

/// A registered competitor
///
/// `run` adapts `data`, times one invocation and returns the elapsed time.
pub trait Candidate<D> {
    /// Unique label
    fn label(&self) -> &str;

    /// Adapt `data`, then time one invocation
    fn run(&mut self, data: &D) -> Result<Duration, BoxError>;
}

/// In-process function candidate
pub struct FunctionCandidate<A, F> {
    label: String,
    adapter: A,
    invocable: F,
}

impl<A, F> FunctionCandidate<A, F> {
    /// Create a function candidate
    ///
    /// An empty label is replaced by the invocable's name.
    pub fn new(label: impl Into<String>, invocable: F, adapter: A) -> Self {
        let label = label.into();
        let label = if label.is_empty() {
            type_label::<F>()
        } else {
            label
        };
        Self {
            label,
            adapter,
            invocable,
        }
    }
}

impl<D, I, T, L, E, A, F> Candidate<D> for FunctionCandidate<A, F>
where
    A: FnMut(&D) -> I,
    F: FnMut(I) -> Result<Outcome<T, L>, E>,
    L: Iterator,
    E: Into<BoxError>,
{
    fn label(&self) -> &str {
        &self.label
    }

    fn run(&mut self, data: &D) -> Result<Duration, BoxError> {
        let input = (self.adapter)(data);

        let timer = Timer::start();
        let outcome = (self.invocable)(input).map_err(Into::into)?;
        outcome.settle();
        let elapsed = timer.stop();

        Ok(elapsed)
    }
}

/// Name of a function type: the last path segment of its type name
///
/// Named functions yield their own name; closures yield `{{closure}}`.
pub fn type_label<F>() -> String {
    let name = std::any::type_name::<F>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
