//! The migration plan.
//!
//! A [`MigrationPlan`] is computed and validated in full before anything on
//! disk changes. It carries every path the later phases touch.

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::MigrationConfig;
use crate::path::relative_to;

/// All paths and names a migration works with.
///
/// # Examples
///
/// ```
/// use cs_core::{MigrationConfig, MigrationPlan};
///
/// let plan = MigrationPlan::new(
///     "/games/MyGame".into(),
///     "MyGame".to_owned(),
///     "/nas/MyGame_Assets".into(),
///     "Ada".to_owned(),
///     &MigrationConfig::default(),
/// );
///
/// assert_eq!(plan.initial_content_path.as_str(), "/games/MyGame/Content");
/// assert_eq!(plan.new_project_path.as_str(), "/games/MyGame/MyGame");
/// assert_eq!(plan.submodule_path().as_str(), "Content");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    /// The original project directory.
    pub project_root: Utf8PathBuf,

    /// Base name of the project descriptor file.
    pub project_name: String,

    /// The asset directory that becomes the asset repository.
    pub initial_content_path: Utf8PathBuf,

    /// Destination of the relocated project files.
    pub new_project_path: Utf8PathBuf,

    /// Destination of the asset repository.
    pub new_content_path: Utf8PathBuf,

    /// User name substituted into the README template.
    pub user_name: String,

    content_dir: String,
}

impl MigrationPlan {
    /// Computes a plan from the inspected inputs.
    #[must_use]
    pub fn new(
        project_root: Utf8PathBuf,
        project_name: String,
        new_content_path: Utf8PathBuf,
        user_name: String,
        config: &MigrationConfig,
    ) -> Self {
        let initial_content_path = project_root.join(&config.content_dir);
        let new_project_path = project_root.join(&project_name);

        Self {
            project_root,
            project_name,
            initial_content_path,
            new_project_path,
            new_content_path,
            user_name,
            content_dir: config.content_dir.clone(),
        }
    }

    /// Checkout path of the asset submodule inside the project repository.
    #[must_use]
    pub fn submodule_path(&self) -> &Utf8Path {
        Utf8Path::new(&self.content_dir)
    }

    /// Working copy of the asset submodule once it has been added.
    #[must_use]
    pub fn submodule_checkout(&self) -> Utf8PathBuf {
        self.new_project_path.join(self.submodule_path())
    }

    /// Relative path from the new project directory to the asset repository.
    ///
    /// Stays valid when the project and asset trees move together. Returns
    /// `None` when no relative path exists, such as across Windows drives.
    #[must_use]
    pub fn content_link(&self) -> Option<Utf8PathBuf> {
        relative_to(&self.new_content_path, &self.new_project_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::normalize;

    fn plan(root: &str, content: &str) -> MigrationPlan {
        MigrationPlan::new(
            root.into(),
            "MyGame".to_owned(),
            content.into(),
            "Ada".to_owned(),
            &MigrationConfig::default(),
        )
    }

    #[test]
    fn test_paths_derive_from_root_and_name() {
        let plan = plan("/games/MyGame", "/nas/MyGame_Assets");
        assert_eq!(plan.initial_content_path, Utf8PathBuf::from("/games/MyGame/Content"));
        assert_eq!(plan.new_project_path, Utf8PathBuf::from("/games/MyGame/MyGame"));
        assert_eq!(plan.submodule_checkout(), Utf8PathBuf::from("/games/MyGame/MyGame/Content"));
    }

    #[test]
    fn test_custom_content_dir() {
        let config = MigrationConfig {
            content_dir: "Assets".to_owned(),
            ..MigrationConfig::default()
        };
        let plan = MigrationPlan::new(
            "/p".into(),
            "Game".to_owned(),
            "/q".into(),
            "Ada".to_owned(),
            &config,
        );
        assert_eq!(plan.initial_content_path, Utf8PathBuf::from("/p/Assets"));
        assert_eq!(plan.submodule_path().as_str(), "Assets");
    }

    #[test]
    fn test_content_link_is_relative() {
        let plan = plan("/games/MyGame", "/nas/MyGame_Assets");
        let link = plan.content_link().unwrap();
        assert!(link.is_relative());
        assert_eq!(link, Utf8PathBuf::from("../../../nas/MyGame_Assets"));
    }

    #[test]
    fn test_content_link_resolves_back() {
        for (root, content) in [
            ("/games/MyGame", "/nas/MyGame_Assets"),
            ("/games/MyGame", "/games/MyGame_Assets"),
            ("/games/MyGame", "/games/MyGame/Assets"),
            ("/a/b/c/d", "/a/x"),
        ] {
            let plan = plan(root, content);
            let link = plan.content_link().unwrap();
            let resolved = normalize(&plan.new_project_path.join(&link));
            assert_eq!(resolved, plan.new_content_path, "link {link} from {root}");
        }
    }
}
