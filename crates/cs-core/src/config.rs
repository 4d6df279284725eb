//! Configuration for the content-split tool.
//!
//! [`MigrationConfig`] holds the fixed conventions of a migration: which
//! file marks a project, what the asset directory is called, the canonical
//! branch name, and which extensions go to Git LFS. The defaults describe an
//! Unreal Engine project; a JSON file can override any subset of them.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings that shape both generated repositories.
///
/// # Examples
///
/// ```
/// use cs_core::MigrationConfig;
///
/// let config = MigrationConfig::default();
/// assert_eq!(config.descriptor_extension, "uproject");
/// assert_eq!(config.content_dir, "Content");
/// assert_eq!(config.branch, "main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Extension (without the dot) of the project descriptor file.
    pub descriptor_extension: String,

    /// Name of the asset directory inside the project root.
    pub content_dir: String,

    /// Branch name used by both repositories.
    pub branch: String,

    /// Patterns registered with `git lfs track` in the asset repository.
    pub lfs_patterns: Vec<String>,

    /// Message of the commit holding `.gitattributes`.
    pub setup_commit_message: String,

    /// Message of the commit holding the existing assets.
    pub assets_commit_message: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            descriptor_extension: "uproject".to_owned(),
            content_dir: "Content".to_owned(),
            branch: "main".to_owned(),
            lfs_patterns: [
                "*.uasset", "*.umap", "*.blend", "*.fbx", "*.png", "*.tga", "*.wav", "*.mp3",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            setup_commit_message: "🎉 Init: setup".to_owned(),
            assets_commit_message: "🍱 Assets: add initial asset".to_owned(),
        }
    }
}

impl MigrationConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults. The result is validated.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every option can be passed to git and the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.descriptor_extension.is_empty() {
            return Err(ConfigError::invalid_option(
                "descriptor_extension",
                "must not be empty",
            ));
        }
        if self.descriptor_extension.starts_with('.') {
            return Err(ConfigError::invalid_option(
                "descriptor_extension",
                "must not start with a dot",
            ));
        }
        if self.content_dir.is_empty() || self.content_dir.contains(['/', '\\']) {
            return Err(ConfigError::invalid_option(
                "content_dir",
                "must be a single non-empty path component",
            ));
        }
        if self.branch.trim().is_empty() || self.branch.contains(char::is_whitespace) {
            return Err(ConfigError::invalid_option(
                "branch",
                "must be a non-empty name without whitespace",
            ));
        }
        if self.lfs_patterns.is_empty() {
            return Err(ConfigError::invalid_option(
                "lfs_patterns",
                "must list at least one pattern",
            ));
        }
        if self.lfs_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid_option(
                "lfs_patterns",
                "must not contain blank patterns",
            ));
        }
        if self.setup_commit_message.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "setup_commit_message",
                "must not be empty",
            ));
        }
        if self.assets_commit_message.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "assets_commit_message",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
