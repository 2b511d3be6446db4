//! `gostatus` - `git branch -vv` narrowed to the current branch

use std::io::IsTerminal;

use crate::cli::context::RepoContext;
use crate::git::{self, GitError};

/// Run the gostatus command
///
/// Fails when no line carries the current-branch marker, which happens on
/// a branch without commits.
pub fn run_gostatus(ctx: &RepoContext, json: bool) -> anyhow::Result<()> {
    if json {
        let status = git::current_branch_status(&ctx.repo)?;
        println!("{}", serde_json::to_string_pretty(&[status])?);
        return Ok(());
    }

    let color = std::io::stdout().is_terminal();
    let lines = git::current_branch_lines(&ctx.repo, color)?;
    if lines.is_empty() {
        let branch = ctx.current_branch()?;
        return Err(GitError::NoSuchBranch(format!("'{}' has no commits yet", branch)).into());
    }

    for line in &lines {
        println!("{}", line);
    }

    Ok(())
}
