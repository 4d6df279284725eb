//! Error types for the cs-core crate.
//!
//! This module provides [`PlanError`] for precondition failures found while
//! inspecting a project, and [`ConfigError`] for configuration loading and
//! validation failures.

use camino::Utf8PathBuf;

/// Errors raised while building a migration plan.
///
/// Every variant is raised before any mutation happens, so the project tree
/// is untouched when one of these surfaces.
///
/// # Examples
///
/// ```
/// use cs_core::PlanError;
/// use camino::Utf8PathBuf;
///
/// let error = PlanError::not_found(Utf8PathBuf::from("/some/path"));
/// assert!(error.to_string().contains("/some/path"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlanError {
    /// A path that must exist does not.
    #[error("'{0}' does not exist")]
    NotFound(Utf8PathBuf),

    /// A path that must not exist already does.
    #[error("'{0}' already exists")]
    AlreadyExists(Utf8PathBuf),

    /// No project descriptor was found in the project directory.
    #[error(
        "unable to find a .{extension} file in '{dir}' (is the project dir correct?). Found files: {}",
        .found.join(", ")
    )]
    DescriptorNotFound {
        /// The directory that was searched.
        dir: Utf8PathBuf,
        /// The descriptor extension that was searched for.
        extension: String,
        /// Names of the entries found in the directory.
        found: Vec<String>,
    },

    /// No user name was supplied and none is configured in git.
    #[error(
        "no git user name was given and none is configured for '{dir}'; pass --git-user-name"
    )]
    UserNameUnavailable {
        /// The directory whose git configuration was queried.
        dir: Utf8PathBuf,
    },

    /// The asset destination lies inside the project being reorganized.
    #[error("new Content dir '{target}' must be outside the project dir '{project_root}'")]
    TargetInsideProject {
        /// The requested asset destination.
        target: Utf8PathBuf,
        /// The project directory.
        project_root: Utf8PathBuf,
    },

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// An I/O error occurred while inspecting a path.
    #[error("failed to inspect '{path}': {source}")]
    Io {
        /// The path being inspected.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl PlanError {
    /// Creates a new [`PlanError::NotFound`] error.
    #[inline]
    pub fn not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Creates a new [`PlanError::AlreadyExists`] error.
    #[inline]
    pub fn already_exists(path: impl Into<Utf8PathBuf>) -> Self {
        Self::AlreadyExists(path.into())
    }

    /// Creates a new [`PlanError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::NotFound(path) | Self::AlreadyExists(path) | Self::Io { path, .. } => Some(path),
            Self::DescriptorNotFound { dir, .. } | Self::UserNameUnavailable { dir } => Some(dir),
            Self::TargetInsideProject { target, .. } => Some(target),
            Self::NonUtf8Path(_) => None,
        }
    }
}

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = PlanError::not_found("/missing/dir");
        assert_eq!(error.to_string(), "'/missing/dir' does not exist");
        assert_eq!(error.path().map(|p| p.as_str()), Some("/missing/dir"));
    }

    #[test]
    fn test_already_exists_display() {
        let error = PlanError::already_exists("/nas/Assets");
        assert_eq!(error.to_string(), "'/nas/Assets' already exists");
    }

    #[test]
    fn test_descriptor_not_found_lists_entries() {
        let error = PlanError::DescriptorNotFound {
            dir: Utf8PathBuf::from("/games/MyGame"),
            extension: "uproject".to_owned(),
            found: vec!["Config".to_owned(), "Content".to_owned()],
        };
        let msg = error.to_string();
        assert!(msg.contains(".uproject"));
        assert!(msg.contains("Found files: Config, Content"));
    }

    #[test]
    fn test_target_inside_project_names_both() {
        let error = PlanError::TargetInsideProject {
            target: Utf8PathBuf::from("/games/MyGame/Assets"),
            project_root: Utf8PathBuf::from("/games/MyGame"),
        };
        let msg = error.to_string();
        assert!(msg.contains("/games/MyGame/Assets"));
        assert!(msg.contains("outside the project dir '/games/MyGame'"));
    }

    #[test]
    fn test_non_utf8_has_no_path() {
        let error = PlanError::NonUtf8Path(std::path::PathBuf::from("x"));
        assert!(error.path().is_none());
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("branch", "must not be empty");
        let msg = error.to_string();
        assert!(msg.contains("branch"));
        assert!(msg.contains("must not be empty"));
    }
}
