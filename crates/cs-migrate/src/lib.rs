//! Asset split and project reassembly for the content-split tool.
//!
//! A migration runs in three phases, each a plain function over a
//! [`MigrationPlan`]:
//!
//! 1. [`inspect()`]: read-only validation that produces the plan
//! 2. [`init_asset_repo()`]: the asset directory becomes an LFS repository
//!    and moves to its new location
//! 3. [`assemble_project()`]: the remaining files move into a project
//!    subdirectory that gets templates, a repository, and the asset submodule
//!
//! [`Migration`] bundles the inputs shared by all three.
//!
//! # Example
//!
//! ```no_run
//! use cs_core::{GitIdentity, MigrationConfig};
//! use cs_git::SystemRunner;
//! use cs_migrate::{InspectRequest, Migration, ResourceDir};
//!
//! let runner = SystemRunner;
//! let migration = Migration::new(
//!     MigrationConfig::default(),
//!     GitIdentity::default(),
//!     ResourceDir::locate(None)?,
//!     &runner,
//! );
//!
//! let plan = migration.plan(&InspectRequest {
//!     project_dir: "/games/MyGame".into(),
//!     new_content_dir: "/nas/MyGame_Assets".into(),
//!     user_name: None,
//! })?;
//! migration.init_assets(&plan)?;
//! migration.assemble_project(&plan)?;
//! # Ok::<(), cs_migrate::MigrateError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod assets;
pub mod error;
pub mod fsops;
pub mod inspect;
pub mod project;
pub mod templates;

use cs_core::{GitIdentity, MigrationConfig, MigrationPlan};
use cs_git::{CommandRunner, Git};

pub use assets::{init_asset_repo, AssetSummary};
pub use error::MigrateError;
pub use inspect::{inspect, InspectRequest};
pub use project::assemble_project;
pub use templates::{ResourceDir, Template, TemplateVars};

/// Everything a migration needs besides the plan itself.
pub struct Migration<'r> {
    config: MigrationConfig,
    identity: GitIdentity,
    resources: ResourceDir,
    runner: &'r dyn CommandRunner,
}

impl<'r> Migration<'r> {
    /// Creates a migration that runs git through `runner`.
    pub fn new(
        config: MigrationConfig,
        identity: GitIdentity,
        resources: ResourceDir,
        runner: &'r dyn CommandRunner,
    ) -> Self {
        Self {
            config,
            identity,
            resources,
            runner,
        }
    }

    fn git(&self) -> Git<'r> {
        Git::new(self.runner)
    }

    /// Validates `request` and computes the plan. Changes nothing.
    pub fn plan(&self, request: &InspectRequest) -> Result<MigrationPlan, MigrateError> {
        inspect(request, &self.config, self.git())
    }

    /// Runs the asset phase.
    pub fn init_assets(&self, plan: &MigrationPlan) -> Result<AssetSummary, MigrateError> {
        init_asset_repo(plan, &self.config, &self.identity, self.git())
    }

    /// Runs the project phase. The asset phase must have completed.
    pub fn assemble_project(&self, plan: &MigrationPlan) -> Result<(), MigrateError> {
        assemble_project(
            plan,
            &self.config,
            &self.identity,
            &self.resources,
            self.git(),
        )
    }
}
