//! `gopush` - land the work branch on the mainline

use crate::cli::context::RepoContext;
use crate::cli::output::Output;
use crate::git::{self, PushMode};

/// Run the gopush command
///
/// Pushes `HEAD` to `refs/heads/<branch>` on `remote`, defaulting to the
/// configured remote and the mainline. Only fast-forwards are allowed; a
/// moved remote is rejected as non-fast-forward.
pub fn run_gopush(
    ctx: &RepoContext,
    remote: Option<&str>,
    branch: Option<&str>,
) -> anyhow::Result<()> {
    let remote = remote.unwrap_or(ctx.remote());
    let target = branch
        .map(str::to_string)
        .unwrap_or_else(|| ctx.mainline());

    // Unknown when the target has never been fetched
    let ahead = git::count_commits_since(&ctx.repo, &format!("{}/{}", remote, target)).ok();
    if ahead == Some(0) {
        if !ctx.quiet {
            Output::info(&format!(
                "Nothing to push: {} already contains HEAD",
                Output::remote_ref(remote, &target)
            ));
        }
        return Ok(());
    }

    let spinner = ctx.spinner(&format!("Pushing to {}/{}...", remote, target));
    let result = git::push_head_to(&ctx.repo, remote, &target, PushMode::FastForward);
    spinner.finish_and_clear();
    result?;

    if !ctx.quiet {
        let count = ahead.map(|n| format!("{} commit(s)", n));
        Output::success(&format!(
            "Pushed {} to {}",
            count.as_deref().unwrap_or("HEAD"),
            Output::remote_ref(remote, &target)
        ));
    }

    Ok(())
}
