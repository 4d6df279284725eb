//! Confirmation before anything on disk changes.

use std::io::Write;

use cs_core::MigrationPlan;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::Confirm;
use tracing::warn;

use crate::status::Console;

const OWNERSHIP_NOTE: &str = "make sure to run this command as the user intended to run future \
     git commands, otherwise you might end up with \"dubious ownership\" issues.";

/// Asks the operator a yes/no question.
pub trait Prompter {
    /// Returns `true` only on an explicit yes.
    fn confirm(&self, prompt: &str) -> color_eyre::Result<bool>;
}

/// Prompts on the terminal, defaulting to no.
///
/// Escape or a stdin that is not a terminal counts as no.
pub struct TerminalPrompter {
    color: bool,
}

impl TerminalPrompter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str) -> color_eyre::Result<bool> {
        let colorful = ColorfulTheme::default();
        let theme: &dyn Theme = if self.color { &colorful } else { &SimpleTheme };

        let answer = Confirm::with_theme(theme)
            .with_prompt(prompt)
            .default(false)
            .interact_opt();
        Ok(accepted(answer))
    }
}

fn accepted(answer: dialoguer::Result<Option<bool>>) -> bool {
    match answer {
        Ok(Some(yes)) => yes,
        Ok(None) => false,
        Err(err) => {
            warn!(error = %err, "No answer to the confirmation prompt");
            false
        }
    }
}

/// The operator's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Declined,
}

/// Shows the plan and blocks until the operator answers.
pub fn confirm_plan<W: Write>(
    plan: &MigrationPlan,
    console: &mut Console<W>,
    prompter: &dyn Prompter,
) -> color_eyre::Result<Decision> {
    console.field("Project name", &plan.project_name)?;
    console.field("New Content location", &plan.new_content_path)?;
    console.field("New Project location", &plan.new_project_path)?;
    console.blank()?;
    console.note(OWNERSHIP_NOTE)?;
    console.blank()?;

    if prompter.confirm("Continue?")? {
        Ok(Decision::Proceed)
    } else {
        Ok(Decision::Declined)
    }
}
