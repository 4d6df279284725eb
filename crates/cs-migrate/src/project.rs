//! Project repository assembly.
//!
//! Everything left in the project root moves one level down into
//! `<root>/<project_name>/`, which gets template files, its own repository,
//! and the relocated asset repository as a submodule.

use cs_core::{GitIdentity, MigrationConfig, MigrationPlan};
use cs_git::Git;
use tracing::{debug, info, warn};

use crate::error::MigrateError;
use crate::fsops;
use crate::templates::{ResourceDir, Template, TemplateVars};

/// Builds the project repository described by `plan`.
///
/// Expects the asset repository to already live at
/// `plan.new_content_path`. Stages everything but does not commit.
pub fn assemble_project(
    plan: &MigrationPlan,
    config: &MigrationConfig,
    identity: &GitIdentity,
    resources: &ResourceDir,
    git: Git<'_>,
) -> Result<(), MigrateError> {
    let project = plan.new_project_path.as_path();

    let entries = fsops::list_entries(&plan.project_root)?;
    fsops::ensure_dir(project)?;
    info!(count = entries.len(), destination = %project, "Moving project files");
    fsops::move_all_into(&entries, project)?;

    resources.copy_into(Template::GitIgnore, project)?;
    resources.copy_into(Template::License, project)?;
    let vars = TemplateVars::current(&plan.project_name, &plan.user_name);
    resources.render_into(Template::Readme, project, &vars)?;
    debug!(year = %vars.year, "Wrote project templates");

    match plan.content_link() {
        Some(link) => debug!(%link, "Asset repository relative to project"),
        None => warn!(
            content = %plan.new_content_path,
            "No relative path from the project to the asset repository"
        ),
    }

    git.init(project)?;
    git.apply_identity(project, identity)?;
    git.set_head(project, &config.branch)?;
    git.set_config(project, "push.recurseSubmodules", "on-demand")?;

    let submodule = plan.submodule_path();
    info!(url = %plan.new_content_path, path = %submodule, "Adding asset submodule");
    git.submodule_add(
        project,
        plan.new_content_path.as_str(),
        submodule.as_str(),
        &config.branch,
    )?;

    let checkout = plan.submodule_checkout();
    git.set_config(&checkout, "protocol.file.allow", "always")?;
    git.apply_identity(&checkout, identity)?;
    git.checkout(&checkout, &config.branch)?;
    git.pull(&checkout)?;

    git.add_all(project)?;
    info!(path = %project, "Project repository ready");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::{Utf8Path, Utf8PathBuf};
    use cs_git::testing::RecordingRunner;
    use std::fs;

    const RESOURCES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../res");

    struct Fixture {
        _guard: tempfile::TempDir,
        plan: MigrationPlan,
    }

    /// A project whose assets were already moved out.
    fn fixture() -> Fixture {
        let guard = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf()).unwrap();
        let project = root.join("games").join("MyGame");
        fs::create_dir_all(project.join("Config")).unwrap();
        fs::create_dir_all(project.join("Source").join("MyGame")).unwrap();
        fs::write(project.join("MyGame.uproject"), "{}").unwrap();
        fs::write(project.join(".gitignore"), "old rules").unwrap();
        fs::create_dir_all(root.join("nas").join("Assets")).unwrap();

        let plan = MigrationPlan::new(
            project,
            "MyGame".to_owned(),
            root.join("nas").join("Assets"),
            "Ada".to_owned(),
            &MigrationConfig::default(),
        );
        Fixture {
            _guard: guard,
            plan,
        }
    }

    fn assemble(plan: &MigrationPlan, identity: &GitIdentity, runner: &RecordingRunner) {
        assemble_project(
            plan,
            &MigrationConfig::default(),
            identity,
            &ResourceDir::new(RESOURCES),
            Git::new(runner),
        )
        .unwrap();
    }

    fn names(dir: &Utf8Path) -> Vec<String> {
        fsops::list_entries(dir)
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name().map(str::to_owned))
            .collect()
    }

    #[test]
    fn test_files_move_into_project_subdir() {
        let fx = fixture();
        let runner = RecordingRunner::new();
        assemble(&fx.plan, &GitIdentity::default(), &runner);

        assert_eq!(names(&fx.plan.project_root), vec!["MyGame"]);
        assert_eq!(
            names(&fx.plan.new_project_path),
            vec![".gitignore", "Config", "LICENSE", "MyGame.uproject", "README.md", "Source"]
        );
        assert!(fx.plan.new_project_path.join("Source").join("MyGame").is_dir());
    }

    #[test]
    fn test_templates_written() {
        let fx = fixture();
        let runner = RecordingRunner::new();
        assemble(&fx.plan, &GitIdentity::default(), &runner);

        let project = &fx.plan.new_project_path;
        let gitignore = fs::read_to_string(project.join(".gitignore")).unwrap();
        assert_ne!(gitignore, "old rules");
        assert_eq!(
            fs::read(project.join("LICENSE")).unwrap(),
            fs::read(Utf8Path::new(RESOURCES).join("LICENSE")).unwrap()
        );

        let readme = fs::read_to_string(project.join("README.md")).unwrap();
        assert!(readme.contains("MyGame"));
        assert!(readme.contains("Ada"));
        assert!(!readme.contains('{'));
    }

    #[test]
    fn test_command_order() {
        let fx = fixture();
        let runner = RecordingRunner::new();
        let identity = GitIdentity::new(None, Some("ada@example.com".to_owned()), None);
        assemble(&fx.plan, &identity, &runner);

        let project = fx.plan.new_project_path.as_str();
        let url = fx.plan.new_content_path.as_str();
        assert_eq!(
            runner.command_lines_in(project),
            vec![
                "git init".to_owned(),
                "git config user.email ada@example.com".to_owned(),
                "git symbolic-ref HEAD refs/heads/main".to_owned(),
                "git config push.recurseSubmodules on-demand".to_owned(),
                format!("git -c protocol.file.allow=always submodule add -b main {url} Content"),
                "git add --all".to_owned(),
            ]
        );
        assert_eq!(
            runner.command_lines_in(fx.plan.submodule_checkout().as_str()),
            vec![
                "git config protocol.file.allow always",
                "git config user.email ada@example.com",
                "git checkout main",
                "git -c protocol.file.allow=always pull",
            ]
        );
        assert_eq!(runner.invocations().len(), 10);
        assert_eq!(
            runner.command_lines().last().map(String::as_str),
            Some("git add --all")
        );
    }

    #[test]
    fn test_submodule_failure_is_fatal() {
        let fx = fixture();
        let runner = RecordingRunner::new().with_failure(&["submodule", "add"]);

        let err = assemble_project(
            &fx.plan,
            &MigrationConfig::default(),
            &GitIdentity::default(),
            &ResourceDir::new(RESOURCES),
            Git::new(&runner),
        )
        .unwrap_err();

        assert!(matches!(err, MigrateError::Git(_)));
        assert!(!runner.command_lines().iter().any(|l| l.contains("checkout")));
    }

    #[test]
    fn test_missing_templates_fail_after_move() {
        let fx = fixture();
        let runner = RecordingRunner::new();
        let guard = tempfile::tempdir().unwrap();
        let empty = Utf8PathBuf::from_path_buf(guard.path().to_path_buf()).unwrap();

        let err = assemble_project(
            &fx.plan,
            &MigrationConfig::default(),
            &GitIdentity::default(),
            &ResourceDir::new(empty),
            Git::new(&runner),
        )
        .unwrap_err();

        assert!(matches!(err, MigrateError::Io { .. }));
        assert!(runner.invocations().is_empty());
    }
}
