//! `gopr` - print the URL for opening a pull request

use anyhow::Context;

use crate::cli::context::RepoContext;
use crate::core::remote_url::review_url_for_remote;
use crate::git::{self, GitError};

/// Build the review URL for the current branch's published copy
pub fn pr_url(ctx: &RepoContext, base: Option<&str>) -> anyhow::Result<String> {
    let branch = ctx.current_branch()?;
    let base = base.map(str::to_string).unwrap_or_else(|| ctx.mainline());
    let remote = ctx.remote();
    let published = ctx.published_name(&branch);

    if !git::remote_branch_exists(&ctx.repo, &published, remote) {
        return Err(
            anyhow::Error::new(GitError::NoSuchBranch(format!("{}/{}", remote, published)))
                .context("Branch is not published; run `gitgo gopublish` first"),
        );
    }

    let remote_url = git::get_remote_url(&ctx.repo, remote)?
        .with_context(|| format!("Remote '{}' has no URL configured", remote))?;

    Ok(review_url_for_remote(
        &remote_url,
        &published,
        &base,
        ctx.config.pr_url_template.as_deref(),
    )?)
}

/// Run the gopr command
pub fn run_gopr(ctx: &RepoContext, base: Option<&str>) -> anyhow::Result<()> {
    println!("{}", pr_url(ctx, base)?);
    Ok(())
}
