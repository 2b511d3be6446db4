//! `branchname` and `summary`

use crate::cli::context::RepoContext;
use crate::git::commit_summary;

/// Print the current branch name
pub fn run_branchname(ctx: &RepoContext) -> anyhow::Result<()> {
    println!("{}", ctx.current_branch()?);
    Ok(())
}

/// Print the subject line of the commit `rev` points at
pub fn run_summary(ctx: &RepoContext, rev: &str) -> anyhow::Result<()> {
    println!("{}", commit_summary(&ctx.repo, rev)?);
    Ok(())
}
