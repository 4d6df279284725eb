//! Git command execution for the content-split tool.
//!
//! Git is never reimplemented here. Every repository operation is a
//! subprocess invocation behind the narrow [`CommandRunner`] seam:
//!
//! - [`Invocation`]: program, arguments, and working directory
//! - [`SystemRunner`]: spawns the process and captures its output
//! - [`Git`]: typed helpers that build the invocations the migration needs
//!
//! # Example
//!
//! ```no_run
//! use cs_git::{Git, SystemRunner};
//! use camino::Utf8Path;
//!
//! let runner = SystemRunner;
//! let git = Git::new(&runner);
//! let repo = Utf8Path::new("/games/MyGame/Content");
//!
//! git.init(repo)?;
//! let dirty = git.status_porcelain(repo)?;
//! println!("{} paths to commit", dirty.len());
//! # Ok::<(), cs_git::GitError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod git;
mod runner;
mod toolchain;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::GitError;
pub use git::Git;
pub use runner::{CommandRunner, Invocation, SystemRunner};
