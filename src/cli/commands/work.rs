//! `gowork` - start or resume a work branch

use crate::cli::context::RepoContext;
use crate::cli::output::Output;
use crate::git::{self, GitError};

/// Run the gowork command
///
/// An existing local branch is simply checked out. Otherwise the remote is
/// fetched and a new branch is created from `<remote>/<mainline>`, tracking
/// it, so later pulls rebase the work on the mainline.
pub fn run_gowork(ctx: &RepoContext, name: &str, fetch: bool) -> anyhow::Result<()> {
    if !git2::Branch::name_is_valid(name)? {
        anyhow::bail!("'{}' is not a valid branch name", name);
    }

    if git::branch_exists(&ctx.repo, name) {
        git::checkout_branch(&ctx.repo, name)?;
        if !ctx.quiet {
            Output::success(&format!("Resumed work on {}", Output::branch_name(name)));
        }
        return Ok(());
    }

    let remote = ctx.remote();
    let mainline = ctx.mainline();

    if fetch {
        let spinner = ctx.spinner(&format!("Fetching {}...", remote));
        let result = git::fetch_remote(&ctx.repo, remote);
        spinner.finish_and_clear();
        result?;
    }

    if !git::remote_branch_exists(&ctx.repo, &mainline, remote) {
        return Err(GitError::NoSuchBranch(format!("{}/{}", remote, mainline)).into());
    }

    git::create_tracking_branch(&ctx.repo, name, &format!("{}/{}", remote, mainline))?;

    if !ctx.quiet {
        Output::success(&format!(
            "Started {} from {}",
            Output::branch_name(name),
            Output::remote_ref(remote, &mainline)
        ));
    }

    Ok(())
}
