//! CLI entry point for the content-split tool.
//!
//! Splits an Unreal project's `Content` directory into its own Git LFS
//! repository and re-attaches it to the project as a submodule.
//!
//! # Usage
//!
//! ```bash
//! content-split --project-dir ./MyGame --new-content-dir /nas/MyGame_Assets
//!
//! # With identity and commit signing for both repositories
//! content-split --project-dir ./MyGame --new-content-dir /nas/MyGame_Assets \
//!     --git-user-name "Ada" --git-user-email ada@example.com --git-signing-key ABCD1234
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod gate;
mod status;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Section;
use cs_core::{GitIdentity, MigrationConfig};
use cs_git::SystemRunner;
use cs_migrate::{InspectRequest, Migration, ResourceDir};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::gate::{Decision, TerminalPrompter};
use crate::status::Console;

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Moves an Unreal project's Content directory into its own Git LFS
/// repository and links it back as a submodule.
///
/// The project files move into `<project-dir>/<ProjectName>/`, which becomes
/// the project repository.
#[derive(Parser, Debug)]
#[command(name = "content-split", version, about, long_about = None)]
struct Cli {
    /// Directory containing the `.uproject` file.
    #[arg(long, value_name = "PATH")]
    project_dir: Utf8PathBuf,

    /// Where the asset repository goes. Must not exist; its parent must.
    #[arg(long, value_name = "PATH")]
    new_content_dir: Utf8PathBuf,

    /// `user.name` for both repositories, also used in the README.
    #[arg(long, value_name = "NAME")]
    git_user_name: Option<String>,

    /// `user.email` for both repositories.
    #[arg(long, value_name = "EMAIL")]
    git_user_email: Option<String>,

    /// Signing key; also turns on signed commits and annotated tags.
    #[arg(long, value_name = "KEY")]
    git_signing_key: Option<String>,

    /// JSON file overriding the migration defaults.
    #[arg(long, value_name = "FILE", env = "CONTENT_SPLIT_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Directory holding the bundled templates.
    #[arg(long, value_name = "DIR", env = "CONTENT_SPLIT_RESOURCE_DIR")]
    resource_dir: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn identity(&self) -> GitIdentity {
        GitIdentity::new(
            self.git_user_name.clone(),
            self.git_user_email.clone(),
            self.git_signing_key.clone(),
        )
    }

    fn inspect_request(&self) -> InspectRequest {
        InspectRequest {
            project_dir: self.project_dir.clone(),
            new_content_dir: self.new_content_dir.clone(),
            user_name: self.git_user_name.clone(),
        }
    }

    fn use_color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` so that the status lines
/// on stdout stay readable. Logs go to stderr.
fn init_tracing(verbose: bool, use_ansi: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(level)
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Loads the migration defaults, applying `path` if given.
fn load_config(path: Option<&Utf8Path>) -> color_eyre::Result<MigrationConfig> {
    let Some(path) = path else {
        return Ok(MigrationConfig::default());
    };

    let config = MigrationConfig::from_file(path)
        .wrap_err_with(|| format!("Failed to load config from '{path}'"))?;
    info!(%path, "Loaded configuration");
    Ok(config)
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();
    let color = cli.use_color();

    // 3. Initialize tracing
    init_tracing(cli.verbose, color);

    // 4. Resolve everything the run needs before touching the project
    let config = load_config(cli.config.as_deref())?;
    let resources = ResourceDir::locate(cli.resource_dir.as_deref())?;
    let runner = SystemRunner;
    let migration = Migration::new(config, cli.identity(), resources, &runner);

    let plan = migration.plan(&cli.inspect_request())?;

    // 5. Confirm
    let mut console = Console::new(std::io::stdout(), color);
    let prompter = TerminalPrompter::new(color);
    if gate::confirm_plan(&plan, &mut console, &prompter)? == Decision::Declined {
        console.line("Exiting")?;
        return Ok(());
    }

    // 6. Asset repository
    console.start("Setting up Content dir")?;
    let summary = migration
        .init_assets(&plan)
        .wrap_err("Setting up the Content repository failed")
        .suggestion(format!(
            "'{}' may already contain a partial git repository; inspect it before retrying",
            plan.initial_content_path
        ))?;
    console.ok()?;
    info!(commits = summary.commits, "Asset repository committed");

    // 7. Project repository
    console.start("Setting up Project dir")?;
    migration
        .assemble_project(&plan)
        .wrap_err("Setting up the Project repository failed")
        .suggestion(format!(
            "the layout is partially migrated: assets are already at '{}', project files may be split between '{}' and '{}'",
            plan.new_content_path, plan.project_root, plan.new_project_path
        ))?;
    console.ok()?;

    console.blank()?;
    console.line("Done! 🥳 Game Dev time❗ 🚀")?;
    Ok(())
}
