//! Error types for the cs-git crate.
//!
//! This module provides the [`GitError`] type for failures of external
//! command invocations.

use camino::Utf8PathBuf;

/// Errors that can occur while running an external command.
///
/// # Error Recovery Strategy
///
/// None. Every variant is fatal for a migration run: the sequence stops at
/// the failing command and nothing is rolled back.
///
/// # Examples
///
/// ```
/// use cs_git::GitError;
///
/// fn report(err: &GitError) {
///     match err {
///         GitError::Spawn { command, .. } => eprintln!("could not start: {command}"),
///         GitError::Failed { command, stderr, .. } => eprintln!("{command}: {stderr}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The process could not be started (e.g. `git` is not installed).
    #[error("failed to run command `{command}` in '{cwd}': {source}")]
    Spawn {
        /// The full command line.
        command: String,
        /// The working directory of the command.
        cwd: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error(
        "command `{command}` failed in '{cwd}' ({status})\nstdout:\n{stdout}\nstderr:\n{stderr}"
    )]
    Failed {
        /// The full command line.
        command: String,
        /// The working directory of the command.
        cwd: Utf8PathBuf,
        /// Human-readable exit status.
        status: String,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
}

impl GitError {
    /// Returns the command line that failed.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } => command,
        }
    }
}
