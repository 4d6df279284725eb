//! Process construction for external commands.

use std::process::{Command, Stdio};

use crate::runner::Invocation;

/// Environment applied to every spawned command.
///
/// Git must never wait on a credential or editor prompt: stdin is closed and
/// terminal prompts are off. `GIT_EDITOR=true` accepts any message git would
/// otherwise open an editor for.
const GIT_ENV: [(&str, &str); 2] = [("GIT_TERMINAL_PROMPT", "0"), ("GIT_EDITOR", "true")];

/// Builds the process for `invocation`, rooted at its working directory.
#[allow(clippy::disallowed_methods)]
pub fn command(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .current_dir(invocation.cwd.as_std_path())
        .stdin(Stdio::null())
        .envs(GIT_ENV);
    cmd
}
