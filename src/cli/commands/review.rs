//! `gorbt` - post the current branch to the review tool

use std::process::Command;

use crate::cli::context::RepoContext;
use crate::git::{self, GitError};

/// Assemble the review tool invocation.
///
/// Configured arguments come first, then `--tracking-branch <upstream>`
/// when the branch has one, then the user's passthrough arguments.
pub fn review_command(ctx: &RepoContext, passthrough: &[String]) -> Result<Command, GitError> {
    let tool = &ctx.config.review_tool;
    let program = which::which(tool).map_err(|_| GitError::ToolNotFound(tool.clone()))?;

    let mut cmd = Command::new(program);
    cmd.current_dir(ctx.workdir()).args(&ctx.config.review_args);

    if let Some(upstream) = git::get_upstream_branch(&ctx.repo, None).ok().flatten() {
        cmd.arg("--tracking-branch").arg(upstream);
    }

    cmd.args(passthrough);
    Ok(cmd)
}

/// Run the gorbt command. The tool's exit code is passed through.
pub fn run_gorbt(ctx: &RepoContext, passthrough: &[String]) -> anyhow::Result<()> {
    let mut cmd = review_command(ctx, passthrough)?;
    git::run_inherited(&mut cmd)?;
    Ok(())
}
