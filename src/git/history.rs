//! Commit history queries

use git2::Repository;
use std::process::Command;

use super::{git_command, GitError};

/// Subject line of the commit `rev` resolves to
pub fn commit_summary(repo: &Repository, rev: &str) -> Result<String, GitError> {
    let object = repo
        .revparse_single(rev)
        .map_err(|_| GitError::NoSuchBranch(rev.to_string()))?;
    let commit = object.peel_to_commit()?;
    Ok(commit.summary().unwrap_or_default().to_string())
}

/// `git log --oneline --decorate <base>..HEAD [extra]`
pub fn log_command(repo: &Repository, base: &str, extra: &[String]) -> Command {
    let mut cmd = git_command(repo);
    cmd.args(["log", "--oneline", "--decorate"])
        .arg(format!("{}..HEAD", base))
        .args(extra);
    cmd
}

/// `git diff <base>...HEAD [extra]` - changes made since branching from `base`
pub fn diff_command(repo: &Repository, base: &str, extra: &[String]) -> Command {
    let mut cmd = git_command(repo);
    cmd.arg("diff").arg(format!("{}...HEAD", base)).args(extra);
    cmd
}

fn resolve_commit(repo: &Repository, rev: &str) -> Result<git2::Oid, GitError> {
    Ok(repo
        .revparse_single(rev)
        .map_err(|_| GitError::NoSuchBranch(rev.to_string()))?
        .peel_to_commit()?
        .id())
}

/// Whether every commit of `rev` is already contained in `target`
pub fn is_contained_in(repo: &Repository, rev: &str, target: &str) -> Result<bool, GitError> {
    let rev_oid = resolve_commit(repo, rev)?;
    let target_oid = resolve_commit(repo, target)?;
    Ok(rev_oid == target_oid || repo.graph_descendant_of(target_oid, rev_oid)?)
}

/// Count commits in `base..HEAD`
pub fn count_commits_since(repo: &Repository, base: &str) -> Result<usize, GitError> {
    let base_oid = resolve_commit(repo, base)?;
    let head_oid = repo.head()?.peel_to_commit()?.id();
    let (ahead, _behind) = repo.graph_ahead_behind(head_oid, base_oid)?;
    Ok(ahead)
}
