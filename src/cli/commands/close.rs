//! `goclose` - finish a work branch

use crate::cli::context::RepoContext;
use crate::cli::output::Output;
use crate::git::{self, GitError};

/// Run the goclose command
///
/// Moves off the branch if it is checked out, deletes it locally and
/// deletes its published copy on the remote when one exists.
///
/// A remote branch only counts as the published copy when the closed
/// branch does not track it and already contains its tip. A branch checked
/// out from someone else's remote branch tracks that branch, so closing it
/// leaves the remote alone.
pub fn run_goclose(ctx: &RepoContext, name: Option<&str>, force: bool) -> anyhow::Result<()> {
    let current = ctx.current_branch().ok();
    let name = match name {
        Some(n) => n.to_string(),
        None => current.clone().ok_or(GitError::DetachedHead)?,
    };
    let remote = ctx.remote();
    let mainline = ctx.mainline();

    if name == mainline {
        anyhow::bail!("Refusing to close the mainline branch '{}'", mainline);
    }
    if !git::branch_exists(&ctx.repo, &name) {
        return Err(GitError::NoSuchBranch(name).into());
    }

    let local_ref = format!("refs/heads/{}", name);
    let upstream = git::get_upstream_branch(&ctx.repo, Some(&name))?;
    let published = ctx.published_name(&name);
    let published_ref = format!("{}/{}", remote, published);
    let delete_remote = git::remote_branch_exists(&ctx.repo, &published, remote)
        && upstream.as_deref() != Some(published_ref.as_str())
        && git::is_contained_in(
            &ctx.repo,
            &format!("refs/remotes/{}", published_ref),
            &local_ref,
        )?;

    if current.as_deref() == Some(name.as_str()) {
        // Check before switching so a refused delete leaves the user in place
        if !force {
            let live_upstream = upstream
                .as_ref()
                .filter(|u| ctx.repo.revparse_single(u.as_str()).is_ok());
            let target = match live_upstream {
                Some(upstream) => upstream.clone(),
                None if git::branch_exists(&ctx.repo, &mainline) => mainline.clone(),
                None => format!("{}/{}", remote, mainline),
            };
            if !git::is_contained_in(&ctx.repo, &local_ref, &target)? {
                anyhow::bail!(
                    "Branch '{}' is not fully merged into {}. Use --force to delete anyway.",
                    name,
                    target
                );
            }
        }

        if git::branch_exists(&ctx.repo, &mainline) {
            git::checkout_branch(&ctx.repo, &mainline)?;
        } else {
            git::create_tracking_branch(&ctx.repo, &mainline, &format!("{}/{}", remote, mainline))?;
        }
        if !ctx.quiet {
            Output::info(&format!("Switched to {}", Output::branch_name(&mainline)));
        }
    }

    git::delete_local_branch(&ctx.repo, &name, force)?;
    if !ctx.quiet {
        Output::success(&format!("Deleted {}", Output::branch_name(&name)));
    }

    if delete_remote {
        let spinner = ctx.spinner(&format!("Deleting {}...", published_ref));
        let result = git::delete_remote_branch(&ctx.repo, &published, remote);
        spinner.finish_and_clear();
        result?;
        if !ctx.quiet {
            Output::success(&format!(
                "Deleted {}",
                Output::remote_ref(remote, &published)
            ));
        }
    } else if !ctx.quiet && git::remote_branch_exists(&ctx.repo, &published, remote) {
        Output::info(&format!(
            "Kept {}: it was not published from {}",
            Output::remote_ref(remote, &published),
            Output::branch_name(&name)
        ));
    }

    Ok(())
}
