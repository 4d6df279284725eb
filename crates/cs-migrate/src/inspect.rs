//! Project inspection.
//!
//! Turns the operator's two paths into a validated [`MigrationPlan`]. Nothing
//! here writes to disk; the only subprocess is a `git config --get` read.

use camino::{Utf8Path, Utf8PathBuf};
use cs_core::path::normalize;
use cs_core::{MigrationConfig, MigrationPlan, PlanError};
use cs_git::Git;
use tracing::{debug, warn};

use crate::error::MigrateError;
use crate::fsops;

/// The operator's inputs to inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectRequest {
    /// Directory holding the project descriptor.
    pub project_dir: Utf8PathBuf,
    /// Destination of the asset repository; must not exist yet.
    pub new_content_dir: Utf8PathBuf,
    /// User name for the README; read from git config when absent.
    pub user_name: Option<String>,
}

/// Validates the inputs and computes the migration plan.
///
/// Checks, in order: the configuration is valid, the project directory exists, it holds a descriptor
/// file, the asset destination does not exist, the destination's parent
/// does, the asset directory exists, the new project directory does not,
/// the destination lies outside the project, a user name is available.
pub fn inspect(
    request: &InspectRequest,
    config: &MigrationConfig,
    git: Git<'_>,
) -> Result<MigrationPlan, MigrateError> {
    config.validate()?;

    let project_root = absolute(&request.project_dir)?;
    if !project_root.exists() {
        return Err(PlanError::not_found(project_root).into());
    }

    let project_name = find_descriptor(&project_root, &config.descriptor_extension)?;
    debug!(%project_root, %project_name, "Found project descriptor");

    let new_content_path = absolute(&request.new_content_dir)?;
    if new_content_path.exists() {
        return Err(PlanError::already_exists(new_content_path).into());
    }

    let parent = new_content_path
        .parent()
        .map(Utf8Path::to_owned)
        .unwrap_or_default();
    if parent.as_str().is_empty() || !parent.is_dir() {
        return Err(PlanError::not_found(parent).into());
    }

    let initial_content_path = project_root.join(&config.content_dir);
    if !initial_content_path.is_dir() {
        return Err(PlanError::not_found(initial_content_path).into());
    }
    let new_project_path = project_root.join(&project_name);
    if new_project_path.exists() {
        return Err(PlanError::already_exists(new_project_path).into());
    }
    if new_content_path.starts_with(&project_root) {
        return Err(PlanError::TargetInsideProject {
            target: new_content_path,
            project_root,
        }
        .into());
    }

    let user_name = match &request.user_name {
        Some(name) => Some(name.clone()),
        None => git.get_config(&project_root, "user.name")?,
    };
    let Some(user_name) = user_name else {
        return Err(PlanError::UserNameUnavailable { dir: project_root }.into());
    };

    let plan = MigrationPlan::new(
        project_root,
        project_name,
        new_content_path,
        user_name,
        config,
    );
    debug!(?plan, "Migration plan ready");

    Ok(plan)
}

/// Returns the stem of the descriptor file in `dir`.
///
/// Entries are sorted by name; when several descriptors exist the first
/// wins and the others are reported with a warning.
fn find_descriptor(dir: &Utf8Path, extension: &str) -> Result<String, MigrateError> {
    let entries = fsops::list_entries(dir)?;

    let candidates: Vec<&Utf8PathBuf> = entries
        .iter()
        .filter(|path| path.extension() == Some(extension) && path.is_file())
        .collect();

    let Some(first) = candidates.first() else {
        let found = entries
            .iter()
            .filter_map(|path| path.file_name().map(str::to_owned))
            .collect();
        return Err(PlanError::DescriptorNotFound {
            dir: dir.to_owned(),
            extension: extension.to_owned(),
            found,
        }
        .into());
    };

    if candidates.len() > 1 {
        let names: Vec<&str> = candidates.iter().filter_map(|p| p.file_name()).collect();
        warn!(
            candidates = ?names,
            chosen = first.file_name().unwrap_or_default(),
            "Multiple project descriptors found, using the first"
        );
    }

    first
        .file_stem()
        .map(str::to_owned)
        .ok_or_else(|| PlanError::not_found(first.as_path()).into())
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, PlanError> {
    let absolute = std::path::absolute(path).map_err(|e| PlanError::io(path, e))?;
    let absolute = Utf8PathBuf::from_path_buf(absolute).map_err(PlanError::NonUtf8Path)?;
    Ok(normalize(&absolute))
}
