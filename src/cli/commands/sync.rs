//! `gosyncto` and `gosyncfrom` - move unfinished work between machines
//!
//! Work in progress is parked on `<remote>/<sync_prefix><branch>`.

use crate::cli::context::RepoContext;
use crate::cli::output::Output;
use crate::git::{self, GitError, PushMode};

/// Run the gosyncto command: park `HEAD` on the sync ref (force-with-lease)
pub fn run_gosyncto(
    ctx: &RepoContext,
    remote: Option<&str>,
    branch: Option<&str>,
) -> anyhow::Result<()> {
    let remote = remote.unwrap_or(ctx.remote());
    let current = ctx.current_branch()?;
    let sync_ref = ctx.sync_name(branch.unwrap_or(&current));

    let spinner = ctx.spinner(&format!("Syncing to {}/{}...", remote, sync_ref));
    let result = git::push_head_to(&ctx.repo, remote, &sync_ref, PushMode::ForceWithLease);
    spinner.finish_and_clear();
    result?;

    if !ctx.quiet {
        Output::success(&format!(
            "Synced {} to {}",
            Output::branch_name(&current),
            Output::remote_ref(remote, &sync_ref)
        ));
    }

    Ok(())
}

/// Run the gosyncfrom command: fetch the sync ref and rebase onto it
pub fn run_gosyncfrom(
    ctx: &RepoContext,
    remote: Option<&str>,
    branch: Option<&str>,
) -> anyhow::Result<()> {
    let remote = remote.unwrap_or(ctx.remote());
    let current = ctx.current_branch()?;
    let sync_ref = ctx.sync_name(branch.unwrap_or(&current));

    let spinner = ctx.spinner(&format!("Fetching {}...", remote));
    let result = git::fetch_remote(&ctx.repo, remote);
    spinner.finish_and_clear();
    result?;

    if !git::remote_branch_exists(&ctx.repo, &sync_ref, remote) {
        return Err(GitError::NoSuchBranch(format!("{}/{}", remote, sync_ref)).into());
    }

    git::rebase_onto(&ctx.repo, &format!("{}/{}", remote, sync_ref))?;

    if !ctx.quiet {
        Output::success(&format!(
            "Rebased {} onto {}",
            Output::branch_name(&current),
            Output::remote_ref(remote, &sync_ref)
        ));
    }

    Ok(())
}
