//! Asset repository initialization.
//!
//! The existing asset directory becomes a standalone git repository with LFS
//! tracking rules, gets committed, and is then moved to its new location.

use camino::Utf8Path;
use cs_core::{GitIdentity, MigrationConfig, MigrationPlan};
use cs_git::Git;
use tracing::{debug, info};

use crate::error::MigrateError;
use crate::fsops;

/// What the asset phase produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSummary {
    /// Commits created: 1 for an empty asset directory, 2 otherwise.
    pub commits: usize,
    /// Number of LFS patterns registered.
    pub tracked_patterns: usize,
}

/// Turns `plan.initial_content_path` into a repository and moves it to
/// `plan.new_content_path`.
///
/// Every failure is fatal. Once the move has happened nothing is left at
/// the original location.
pub fn init_asset_repo(
    plan: &MigrationPlan,
    config: &MigrationConfig,
    identity: &GitIdentity,
    git: Git<'_>,
) -> Result<AssetSummary, MigrateError> {
    let repo = plan.initial_content_path.as_path();
    info!(path = %repo, "Initializing asset repository");

    git.init(repo)?;
    git.apply_identity(repo, identity)?;
    git.set_head(repo, &config.branch)?;
    git.set_local_config(repo, "receive.denyCurrentBranch", "updateInstead")?;

    git.lfs_install(repo)?;
    for pattern in &config.lfs_patterns {
        git.lfs_track(repo, pattern)?;
    }

    git.add(repo, ".gitattributes")?;
    git.commit(repo, &config.setup_commit_message)?;

    let commits = 1 + commit_existing_assets(repo, config, git)?;

    relocate(repo, &plan.new_content_path)?;
    info!(path = %plan.new_content_path, commits, "Asset repository ready");

    Ok(AssetSummary {
        commits,
        tracked_patterns: config.lfs_patterns.len(),
    })
}

/// Commits everything still untracked; returns the number of commits made.
fn commit_existing_assets(
    repo: &Utf8Path,
    config: &MigrationConfig,
    git: Git<'_>,
) -> Result<usize, MigrateError> {
    let changes = git.status_porcelain(repo)?;
    if changes.is_empty() {
        debug!("No assets to commit");
        return Ok(0);
    }

    debug!(changes = changes.len(), "Committing existing assets");
    git.add_all(repo)?;
    git.commit(repo, &config.assets_commit_message)?;
    Ok(1)
}

fn relocate(from: &Utf8Path, to: &Utf8Path) -> Result<(), MigrateError> {
    if let Some(parent) = to.parent() {
        fsops::ensure_dir(parent)?;
    }
    debug!(%from, %to, "Moving asset repository");
    fsops::move_path(from, to)
}
