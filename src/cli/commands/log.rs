//! `golog` and `goshow` - what the work branch adds on top of its base

use crate::cli::context::RepoContext;
use crate::git;

/// Run the golog command: commits on the branch not yet in its base
pub fn run_golog(ctx: &RepoContext, extra: &[String]) -> anyhow::Result<()> {
    let base = ctx.work_base()?;
    git::run_inherited(&mut git::log_command(&ctx.repo, &base, extra))?;
    Ok(())
}

/// Run the goshow command: the diff the branch introduces since it forked
pub fn run_goshow(ctx: &RepoContext, extra: &[String]) -> anyhow::Result<()> {
    let base = ctx.work_base()?;
    git::run_inherited(&mut git::diff_command(&ctx.repo, &base, extra))?;
    Ok(())
}
