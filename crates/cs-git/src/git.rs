//! Typed helpers for the git commands used by a migration.

use camino::Utf8Path;
use cs_core::GitIdentity;

use crate::error::GitError;
use crate::runner::{CommandRunner, Invocation};

/// Config override that lets submodule commands use plain local paths.
const ALLOW_FILE_PROTOCOL: [&str; 2] = ["-c", "protocol.file.allow=always"];

/// Builds git invocations and sends them through a [`CommandRunner`].
///
/// # Examples
///
/// ```no_run
/// use cs_git::{Git, SystemRunner};
/// use camino::Utf8Path;
///
/// let git = Git::new(&SystemRunner);
/// let repo = Utf8Path::new("/games/MyGame/Content");
/// git.init(repo)?;
/// git.set_head(repo, "main")?;
/// # Ok::<(), cs_git::GitError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Git<'r> {
    runner: &'r dyn CommandRunner,
}

impl<'r> Git<'r> {
    /// Creates a new helper backed by `runner`.
    pub fn new(runner: &'r dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Runs `git <args>` in `cwd` and returns standard output.
    pub fn run<I, S>(&self, cwd: &Utf8Path, args: I) -> Result<String, GitError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.execute(&Invocation::git(cwd, args))
    }

    /// `git init`
    pub fn init(&self, cwd: &Utf8Path) -> Result<(), GitError> {
        self.run(cwd, ["init"]).map(drop)
    }

    /// `git config <key> <value>`
    pub fn set_config(&self, cwd: &Utf8Path, key: &str, value: &str) -> Result<(), GitError> {
        self.run(cwd, ["config", key, value]).map(drop)
    }

    /// `git config --local <key> <value>`
    pub fn set_local_config(
        &self,
        cwd: &Utf8Path,
        key: &str,
        value: &str,
    ) -> Result<(), GitError> {
        self.run(cwd, ["config", "--local", key, value]).map(drop)
    }

    /// Reads a config value visible from `cwd`.
    ///
    /// Returns `Ok(None)` when the key is unset, which git reports with a
    /// failed exit.
    pub fn get_config(&self, cwd: &Utf8Path, key: &str) -> Result<Option<String>, GitError> {
        match self.run(cwd, ["config", "--get", key]) {
            Ok(value) => {
                let value = value.trim();
                Ok((!value.is_empty()).then(|| value.to_owned()))
            }
            Err(GitError::Failed { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes every identity setting as repository configuration.
    pub fn apply_identity(&self, cwd: &Utf8Path, identity: &GitIdentity) -> Result<(), GitError> {
        for (key, value) in identity.config_entries() {
            self.set_config(cwd, key, &value)?;
        }
        Ok(())
    }

    /// Points `HEAD` at `branch`, renaming the unborn default branch.
    pub fn set_head(&self, cwd: &Utf8Path, branch: &str) -> Result<(), GitError> {
        let target = format!("refs/heads/{branch}");
        self.run(cwd, ["symbolic-ref", "HEAD", target.as_str()])
            .map(drop)
    }

    /// `git lfs install`
    pub fn lfs_install(&self, cwd: &Utf8Path) -> Result<(), GitError> {
        self.run(cwd, ["lfs", "install"]).map(drop)
    }

    /// `git lfs track <pattern>`
    pub fn lfs_track(&self, cwd: &Utf8Path, pattern: &str) -> Result<(), GitError> {
        self.run(cwd, ["lfs", "track", pattern]).map(drop)
    }

    /// `git add <pathspec>`
    pub fn add(&self, cwd: &Utf8Path, pathspec: &str) -> Result<(), GitError> {
        self.run(cwd, ["add", pathspec]).map(drop)
    }

    /// `git add --all`
    pub fn add_all(&self, cwd: &Utf8Path) -> Result<(), GitError> {
        self.run(cwd, ["add", "--all"]).map(drop)
    }

    /// `git commit -m <message>`
    pub fn commit(&self, cwd: &Utf8Path, message: &str) -> Result<(), GitError> {
        self.run(cwd, ["commit", "-m", message]).map(drop)
    }

    /// Returns the non-empty lines of `git status --porcelain`.
    pub fn status_porcelain(&self, cwd: &Utf8Path) -> Result<Vec<String>, GitError> {
        let out = self.run(cwd, ["status", "--porcelain"])?;
        Ok(out
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect())
    }

    /// Adds `url` as a submodule at `path` tracking `branch`.
    pub fn submodule_add(
        &self,
        cwd: &Utf8Path,
        url: &str,
        path: &str,
        branch: &str,
    ) -> Result<(), GitError> {
        let args = ALLOW_FILE_PROTOCOL
            .into_iter()
            .chain(["submodule", "add", "-b", branch, url, path]);
        self.run(cwd, args).map(drop)
    }

    /// `git checkout <branch>`
    pub fn checkout(&self, cwd: &Utf8Path, branch: &str) -> Result<(), GitError> {
        self.run(cwd, ["checkout", branch]).map(drop)
    }

    /// Pulls from the configured remote, allowing local-path transports.
    pub fn pull(&self, cwd: &Utf8Path) -> Result<(), GitError> {
        let args = ALLOW_FILE_PROTOCOL.into_iter().chain(["pull"]);
        self.run(cwd, args).map(drop)
    }
}
