//! Subprocess execution behind the [`CommandRunner`] seam.

use std::fmt;
use std::process::Command;

use camino::Utf8PathBuf;
use tracing::debug;

use crate::error::GitError;
use crate::toolchain;

/// A single external command: program, arguments, and working directory.
///
/// Arguments are passed to the process as-is; no shell is involved, so
/// patterns like `*.uasset` reach git unexpanded.
///
/// # Examples
///
/// ```
/// use cs_git::Invocation;
///
/// let inv = Invocation::git("/repo", ["commit", "-m", "Init: setup"]);
/// assert_eq!(inv.to_string(), r#"git commit -m "Init: setup""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The program to run.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory of the process.
    pub cwd: Utf8PathBuf,
}

impl Invocation {
    /// Creates an invocation of an arbitrary program.
    pub fn new<I, S>(program: impl Into<String>, cwd: impl Into<Utf8PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
        }
    }

    /// Creates an invocation of `git`.
    pub fn git<I, S>(cwd: impl Into<Utf8PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", cwd, args)
    }

    /// Returns `true` if `needle` appears as a contiguous run of arguments.
    #[must_use]
    pub fn has_args(&self, needle: &[&str]) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.args
            .windows(needle.len())
            .any(|window| window.iter().zip(needle).all(|(a, b)| a == b))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Executes commands and returns their captured standard output.
///
/// Implementations must report any unsuccessful exit as an error; callers
/// never inspect exit codes themselves.
pub trait CommandRunner: Send + Sync {
    /// Runs the invocation to completion.
    fn execute(&self, invocation: &Invocation) -> Result<String, GitError>;
}

/// Runs commands as real subprocesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn execute(&self, invocation: &Invocation) -> Result<String, GitError> {
        run(invocation, toolchain::command(invocation))
    }
}

/// Runs `command`, built from `invocation`, and captures its output.
pub(crate) fn run(invocation: &Invocation, mut command: Command) -> Result<String, GitError> {
    debug!(cwd = %invocation.cwd, command = %invocation, "Running command");

    let output = command.output().map_err(|source| GitError::Spawn {
        command: invocation.to_string(),
        cwd: invocation.cwd.clone(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() {
        return Err(GitError::Failed {
            command: invocation.to_string(),
            cwd: invocation.cwd.clone(),
            status: output.status.to_string(),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(stdout)
}
