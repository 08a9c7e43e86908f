//! External Program Candidates
//!
//! Times a complete child-process execution: spawn, run to exit and collect
//! output. The adapter turns the trial input into command-line arguments.

use crate::candidate::{BoxError, Candidate};
use crate::measure::Timer;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;

/// Failure of a program candidate
#[derive(Debug, Error)]
pub enum ProgramError {
    /// The executable could not be started
    #[error("failed to spawn {}: {source}", path.display())]
    Spawn {
        /// Executable path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully
    #[error("{} exited with {status}: {stderr}", path.display())]
    ExitStatus {
        /// Executable path
        path: PathBuf,
        /// Exit status reported by the OS
        status: ExitStatus,
        /// Captured standard error, trimmed
        stderr: String,
    },
}

/// Candidate that runs an executable once per trial
pub struct ProgramCandidate<A> {
    label: String,
    executable: PathBuf,
    adapter: A,
}

impl<A> ProgramCandidate<A> {
    /// Create a program candidate
    ///
    /// An empty label falls back to the executable's file name.
    pub fn new(label: impl Into<String>, executable: impl Into<PathBuf>, adapter: A) -> Self {
        let executable = executable.into();
        let mut label = label.into();
        if label.is_empty() {
            label = executable
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| executable.display().to_string());
        }
        Self {
            label,
            executable,
            adapter,
        }
    }

    /// Resolve the executable against `dir` when it is relative
    pub fn in_dir(mut self, dir: &Path) -> Self {
        if self.executable.is_relative() {
            self.executable = dir.join(&self.executable);
        }
        self
    }

    /// Path that will be executed
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl<D, I, A> Candidate<D> for ProgramCandidate<A>
where
    A: FnMut(&D) -> I,
    I: IntoIterator,
    I::Item: AsRef<OsStr>,
{
    fn label(&self) -> &str {
        &self.label
    }

    fn run(&mut self, data: &D) -> Result<Duration, BoxError> {
        let args = (self.adapter)(data);
        let mut command = Command::new(&self.executable);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let timer = Timer::start();
        let output = command.output().map_err(|source| ProgramError::Spawn {
            path: self.executable.clone(),
            source,
        })?;
        let elapsed = timer.stop();

        if !output.status.success() {
            return Err(ProgramError::ExitStatus {
                path: self.executable.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(elapsed)
    }
}
