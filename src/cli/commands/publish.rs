//! `gopublish` - push the work branch for review

use crate::cli::context::RepoContext;
use crate::cli::output::Output;
use crate::git::{self, PushMode};

/// Run the gopublish command
///
/// Pushes `HEAD` to `<remote>/<publish_prefix><branch>`. The branch keeps
/// tracking the mainline; publishing does not change its upstream.
pub fn run_gopublish(ctx: &RepoContext, force: bool) -> anyhow::Result<()> {
    let branch = ctx.current_branch()?;
    let published = ctx.published_name(&branch);
    let remote = ctx.remote();

    if published == ctx.mainline() {
        anyhow::bail!(
            "Refusing to publish onto the mainline '{}'; start a work branch with `gitgo gowork`",
            published
        );
    }

    let mode = if force {
        PushMode::ForceWithLease
    } else {
        PushMode::FastForward
    };

    let spinner = ctx.spinner(&format!("Publishing {}...", branch));
    let result = git::push_head_to(&ctx.repo, remote, &published, mode);
    spinner.finish_and_clear();
    result?;

    if !ctx.quiet {
        Output::success(&format!(
            "Published {} as {}",
            Output::branch_name(&branch),
            Output::remote_ref(remote, &published)
        ));
    }

    Ok(())
}
