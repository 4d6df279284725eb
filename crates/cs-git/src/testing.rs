//! [`CommandRunner`] implementations for tests.
//!
//! [`RecordingRunner`] never spawns a process. It records every invocation
//! and answers from a list of canned responses matched by argument runs.
//! [`IsolatedRunner`] runs real git with its global configuration redirected
//! into a scratch directory.

use camino::Utf8PathBuf;
use parking_lot::Mutex;

use crate::error::GitError;
use crate::runner::{self, CommandRunner, Invocation};
use crate::toolchain;

#[derive(Debug, Clone)]
enum Response {
    Output(String),
    Failure,
}

#[derive(Debug, Clone)]
struct Rule {
    needle: Vec<String>,
    response: Response,
}

/// Records invocations and replies with scripted output.
///
/// The first rule whose argument run appears in an invocation decides the
/// reply; unmatched invocations succeed with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    rules: Vec<Rule>,
    log: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    /// Creates a runner with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies with `output` to invocations containing `needle`.
    #[must_use]
    pub fn with_output(mut self, needle: &[&str], output: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.iter().map(|s| (*s).to_owned()).collect(),
            response: Response::Output(output.to_owned()),
        });
        self
    }

    /// Fails invocations containing `needle` with exit status 1.
    #[must_use]
    pub fn with_failure(mut self, needle: &[&str]) -> Self {
        self.rules.push(Rule {
            needle: needle.iter().map(|s| (*s).to_owned()).collect(),
            response: Response::Failure,
        });
        self
    }

    /// Returns every invocation received so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.log.lock().clone()
    }

    /// Returns every invocation rendered as a command line.
    pub fn command_lines(&self) -> Vec<String> {
        self.log.lock().iter().map(ToString::to_string).collect()
    }

    /// Returns the command lines that ran in `cwd`.
    pub fn command_lines_in(&self, cwd: &str) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter(|inv| inv.cwd == cwd)
            .map(ToString::to_string)
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn execute(&self, invocation: &Invocation) -> Result<String, GitError> {
        self.log.lock().push(invocation.clone());

        let needle_matches = |rule: &&Rule| {
            let needle: Vec<&str> = rule.needle.iter().map(String::as_str).collect();
            invocation.has_args(&needle)
        };

        match self.rules.iter().find(needle_matches).map(|rule| &rule.response) {
            Some(Response::Output(output)) => Ok(output.clone()),
            Some(Response::Failure) => Err(GitError::Failed {
                command: invocation.to_string(),
                cwd: invocation.cwd.clone(),
                status: "exit status: 1".to_owned(),
                stdout: String::new(),
                stderr: "scripted failure".to_owned(),
            }),
            None => Ok(String::new()),
        }
    }
}

/// Runs real processes with `HOME` and the global git config moved into
/// `home`, and the system git config ignored.
///
/// `git lfs install` and any `--global` write land in `home`.
#[derive(Debug, Clone)]
pub struct IsolatedRunner {
    home: Utf8PathBuf,
}

impl IsolatedRunner {
    /// Creates a runner whose global git state lives in `home`.
    pub fn new(home: impl Into<Utf8PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Returns `true` if both `git` and `git lfs` can be run.
    #[must_use]
    pub fn has_git_lfs(&self) -> bool {
        let runs = |args: &[&str]| {
            self.execute(&Invocation::git(&self.home, args.iter().copied()))
                .is_ok()
        };
        runs(&["--version"]) && runs(&["lfs", "version"])
    }
}

impl CommandRunner for IsolatedRunner {
    fn execute(&self, invocation: &Invocation) -> Result<String, GitError> {
        let mut command = toolchain::command(invocation);
        command
            .env("HOME", self.home.as_std_path())
            .env("GIT_CONFIG_GLOBAL", self.home.join(".gitconfig").as_std_path())
            .env("GIT_CONFIG_NOSYSTEM", "1");
        runner::run(invocation, command)
    }
}
