//! Git remote operations

use git2::{BranchType, Repository};
use tracing::debug;

use super::{get_current_branch, git, GitError};

/// How a push treats a remote ref that has moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushMode {
    /// Only fast-forward updates
    FastForward,
    /// Overwrite, but only if the remote ref is where we last saw it
    ForceWithLease,
}

/// Get the fetch URL of a remote
pub fn get_remote_url(repo: &Repository, remote: &str) -> Result<Option<String>, GitError> {
    match repo.find_remote(remote) {
        Ok(r) => Ok(r.url().map(str::to_string)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Fetch from remote
pub fn fetch_remote(repo: &Repository, remote: &str) -> Result<(), GitError> {
    git(repo, ["fetch", remote])?;
    debug!(remote, "fetch complete");
    Ok(())
}

/// Get upstream tracking branch name (e.g. `origin/main`)
pub fn get_upstream_branch(
    repo: &Repository,
    branch_name: Option<&str>,
) -> Result<Option<String>, GitError> {
    let branch = match branch_name {
        Some(name) => name.to_string(),
        None => get_current_branch(repo)?,
    };

    let local = match repo.find_branch(&branch, BranchType::Local) {
        Ok(b) => b,
        Err(_) => return Ok(None),
    };

    match local.upstream() {
        Ok(upstream) => Ok(upstream.name()?.map(str::to_string)),
        Err(_) => Ok(None),
    }
}

/// Rebase the current branch on its upstream (`git pull --rebase`).
///
/// Without an explicit `remote`, the branch must have an upstream; if it
/// does not, nothing is run and `NoSuchBranch` is returned.
pub fn pull_rebase(
    repo: &Repository,
    remote: Option<&str>,
    branch: Option<&str>,
) -> Result<(), GitError> {
    let mut args = vec!["pull", "--rebase"];

    match remote {
        Some(remote) => {
            args.push(remote);
            args.extend(branch);
        }
        None => {
            let current = get_current_branch(repo)?;
            if get_upstream_branch(repo, Some(&current))?.is_none() {
                return Err(GitError::NoSuchBranch(format!(
                    "'{}' has no upstream configured",
                    current
                )));
            }
        }
    }

    git(repo, &args)?;
    Ok(())
}

/// Push a refspec to a remote
pub fn push_refspec(
    repo: &Repository,
    remote: &str,
    refspec: &str,
    mode: PushMode,
) -> Result<(), GitError> {
    let mut args = vec!["push"];
    if mode == PushMode::ForceWithLease {
        args.push("--force-with-lease");
    }
    args.push(remote);
    args.push(refspec);

    git(repo, &args)?;
    debug!(remote, refspec, ?mode, "push complete");
    Ok(())
}

/// Push `HEAD` to `refs/heads/<target>` on the remote
pub fn push_head_to(
    repo: &Repository,
    remote: &str,
    target: &str,
    mode: PushMode,
) -> Result<(), GitError> {
    push_refspec(repo, remote, &format!("HEAD:refs/heads/{}", target), mode)
}

/// Delete a remote branch
pub fn delete_remote_branch(
    repo: &Repository,
    branch_name: &str,
    remote: &str,
) -> Result<(), GitError> {
    git(repo, ["push", remote, "--delete", branch_name])?;
    Ok(())
}

/// Rebase the current branch onto `onto`
pub fn rebase_onto(repo: &Repository, onto: &str) -> Result<(), GitError> {
    git(repo, ["rebase", onto])?;
    Ok(())
}
