//! Error types for the cs-migrate crate.

use camino::Utf8PathBuf;
use cs_core::{ConfigError, PlanError};
use cs_git::GitError;

/// Errors that can occur while planning or running a migration.
///
/// # Error Recovery Strategy
///
/// - **Plan and config errors** ([`MigrateError::Plan`],
///   [`MigrateError::Config`]): raised before any mutation, the project tree
///   is untouched
/// - **Everything else**: fatal at the point of failure, no rollback; the
///   layout may be partially migrated
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MigrateError {
    /// A precondition does not hold.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// The configuration cannot drive a migration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A git command failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// A filesystem operation failed.
    #[error("{action} '{path}': {source}")]
    Io {
        /// What was being done.
        action: &'static str,
        /// The path involved.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// One or more of a batch of parallel moves failed.
    #[error("{failed} of {total} moves into '{destination}' failed; first error: {first}")]
    MoveFailed {
        /// Number of failed moves.
        failed: usize,
        /// Number of moves attempted.
        total: usize,
        /// The directory entries were moved into.
        destination: Utf8PathBuf,
        /// The first failure, in entry order.
        #[source]
        first: Box<MigrateError>,
    },

    /// No directory holding the bundled templates was found.
    #[error("bundled templates not found; searched: {}", format_paths(.searched))]
    ResourcesNotFound {
        /// Every directory that was checked.
        searched: Vec<Utf8PathBuf>,
    },

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl MigrateError {
    /// Creates a new [`MigrateError::Io`] error.
    #[inline]
    pub fn io(action: &'static str, path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the error was raised before anything was changed.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Plan(_) | Self::Config(_) | Self::ResourcesNotFound { .. }
        )
    }
}

fn format_paths(paths: &[Utf8PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_plan_error_is_precondition() {
        let err = MigrateError::from(PlanError::not_found("/x"));
        assert!(err.is_precondition());
        assert_eq!(err.to_string(), "'/x' does not exist");
    }

    #[test]
    fn test_io_display() {
        let err = MigrateError::io(
            "failed to move",
            "/games/MyGame/Config",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_precondition());
        assert_eq!(err.to_string(), "failed to move '/games/MyGame/Config': denied");
    }

    #[test]
    fn test_move_failed_display() {
        let first = MigrateError::io(
            "failed to move",
            "/p/a",
            io::Error::new(io::ErrorKind::Other, "boom"),
        );
        let err = MigrateError::MoveFailed {
            failed: 2,
            total: 5,
            destination: Utf8PathBuf::from("/p/Game"),
            first: Box::new(first),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("2 of 5 moves into '/p/Game' failed"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_resources_not_found_lists_paths() {
        let err = MigrateError::ResourcesNotFound {
            searched: vec![Utf8PathBuf::from("/a/res"), Utf8PathBuf::from("/b/res")],
        };
        assert!(err.is_precondition());
        assert!(err.to_string().ends_with("/a/res, /b/res"));
    }
}
