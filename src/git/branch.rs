//! Git branch operations

use git2::{BranchType, Repository};
use serde::Serialize;

use super::{get_current_branch, git, git_command, run_captured, GitError};

/// Marker git prints in front of the checked-out branch in `git branch`
pub const CURRENT_BRANCH_MARKER: char = '*';

/// Create a new local branch from `start_point` with upstream tracking, and check it out
pub fn create_tracking_branch(
    repo: &Repository,
    branch_name: &str,
    start_point: &str,
) -> Result<(), GitError> {
    git(repo, ["checkout", "-b", branch_name, "--track", start_point])
        .map_err(|e| worktree_conflict(e, branch_name))?;
    Ok(())
}

/// Checkout an existing branch
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<(), GitError> {
    if !branch_exists(repo, branch_name) {
        return Err(GitError::NoSuchBranch(branch_name.to_string()));
    }

    git(repo, ["checkout", branch_name]).map_err(|e| worktree_conflict(e, branch_name))?;
    Ok(())
}

/// Turn git's "already used by worktree" failure into a readable message
fn worktree_conflict(err: GitError, branch_name: &str) -> GitError {
    let (command, code, stderr) = match err {
        GitError::SubprocessFailed {
            command,
            code,
            stderr,
        } if stderr.contains("is already used by worktree at")
            || stderr.contains("is already checked out at") =>
        {
            (command, code, stderr)
        }
        other => return other,
    };

    let location = stderr
        .find(" at '")
        .map(|start| &stderr[start + 5..])
        .and_then(|rest| rest.find('\'').map(|end| rest[..end].to_string()));

    let message = match location {
        Some(path) => format!(
            "Branch '{}' is checked out in another worktree at '{}'. Work in that worktree instead.",
            branch_name, path
        ),
        None => format!(
            "Branch '{}' is already checked out in another worktree.",
            branch_name
        ),
    };

    GitError::SubprocessFailed {
        command,
        code,
        stderr: message,
    }
}

/// Check if a local branch exists
pub fn branch_exists(repo: &Repository, branch_name: &str) -> bool {
    repo.find_branch(branch_name, BranchType::Local).is_ok()
}

/// Check if a remote-tracking branch exists (as last fetched; no network)
pub fn remote_branch_exists(repo: &Repository, branch_name: &str, remote: &str) -> bool {
    repo.find_reference(&format!("refs/remotes/{}/{}", remote, branch_name))
        .is_ok()
}

/// Delete a local branch
pub fn delete_local_branch(
    repo: &Repository,
    branch_name: &str,
    force: bool,
) -> Result<(), GitError> {
    if let Ok(current) = get_current_branch(repo) {
        if current == branch_name {
            return Err(GitError::SubprocessFailed {
                command: format!("git branch -d {}", branch_name),
                code: 1,
                stderr: "Cannot delete the currently checked out branch".to_string(),
            });
        }
    }

    let flag = if force { "-D" } else { "-d" };
    git(repo, ["branch", flag, branch_name]).map_err(|e| match e {
        GitError::SubprocessFailed {
            command,
            code,
            stderr,
        } if stderr.contains("not fully merged") => GitError::SubprocessFailed {
            command,
            code,
            stderr: format!(
                "Branch '{}' is not fully merged. Use --force to delete anyway.",
                branch_name
            ),
        },
        other => other,
    })?;

    Ok(())
}

/// Resolve the mainline branch name.
///
/// Order: explicit setting, then the remote's HEAD symref
/// (`refs/remotes/<remote>/HEAD`), then a local `main`, then a local
/// `master`, then `main`.
pub fn resolve_mainline(repo: &Repository, remote: &str, configured: Option<&str>) -> String {
    if let Some(name) = configured.filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    let remote_head = format!("refs/remotes/{}/HEAD", remote);
    let prefix = format!("refs/remotes/{}/", remote);
    if let Ok(reference) = repo.find_reference(&remote_head) {
        if let Some(name) = reference
            .symbolic_target()
            .and_then(|target| target.strip_prefix(&prefix))
        {
            return name.to_string();
        }
    }

    for candidate in ["main", "master"] {
        if branch_exists(repo, candidate) {
            return candidate.to_string();
        }
    }

    "main".to_string()
}

/// Run `git branch -vv` and keep only the current-branch line(s).
///
/// `color` forces colour on (`--color=always`), as a terminal would see it.
pub fn current_branch_lines(repo: &Repository, color: bool) -> Result<Vec<String>, GitError> {
    let color_flag = if color { "--color=always" } else { "--no-color" };
    let output = run_captured(git_command(repo).args(["branch", "-vv", color_flag]))?;
    Ok(filter_current_lines(&output)
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Keep lines that carry the current-branch marker.
///
/// With colour on, git leaves the marker uncoloured at column 0, so the
/// prefix check holds either way.
pub fn filter_current_lines(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.starts_with(CURRENT_BRANCH_MARKER))
        .collect()
}

/// Tracking state of the checked-out branch, as `git branch -vv` shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchStatus {
    /// Branch name (or `(HEAD detached at ...)`)
    pub name: String,
    /// Abbreviated commit id
    pub sha: String,
    /// Upstream tracking branch, if any
    pub upstream: Option<String>,
    /// Commits ahead of upstream
    pub ahead: usize,
    /// Commits behind upstream
    pub behind: usize,
    /// Upstream configured but deleted on the remote
    pub gone: bool,
    /// Subject of the tip commit
    pub subject: String,
    /// Whether this is the checked-out branch
    pub current: bool,
}

/// Read the checked-out branch's status from the repository.
///
/// An unborn branch has no commit to describe and yields `NoSuchBranch`.
pub fn current_branch_status(repo: &Repository) -> Result<BranchStatus, GitError> {
    let head = repo.find_reference("HEAD")?;
    let branch_ref = head.symbolic_target().map(str::to_string);

    let commit = match repo.head().and_then(|h| h.peel_to_commit()) {
        Ok(commit) => commit,
        Err(_) => {
            let name = branch_ref
                .as_deref()
                .and_then(|r| r.strip_prefix("refs/heads/"))
                .unwrap_or("HEAD");
            return Err(GitError::NoSuchBranch(format!("'{}' has no commits yet", name)));
        }
    };
    let sha = commit
        .as_object()
        .short_id()?
        .as_str()
        .unwrap_or_default()
        .to_string();

    let mut status = BranchStatus {
        name: format!("(HEAD detached at {})", sha),
        sha,
        upstream: None,
        ahead: 0,
        behind: 0,
        gone: false,
        subject: commit.summary().unwrap_or_default().to_string(),
        current: true,
    };

    let Some(refname) = branch_ref else {
        return Ok(status);
    };
    status.name = refname
        .strip_prefix("refs/heads/")
        .unwrap_or(&refname)
        .to_string();

    let Ok(upstream_ref) = repo.branch_upstream_name(&refname) else {
        return Ok(status);
    };
    let upstream_ref = upstream_ref.as_str().unwrap_or_default().to_string();
    status.upstream = Some(
        upstream_ref
            .strip_prefix("refs/remotes/")
            .or_else(|| upstream_ref.strip_prefix("refs/heads/"))
            .unwrap_or(&upstream_ref)
            .to_string(),
    );

    match repo.refname_to_id(&upstream_ref) {
        Ok(upstream_oid) => {
            let (ahead, behind) = repo.graph_ahead_behind(commit.id(), upstream_oid)?;
            status.ahead = ahead;
            status.behind = behind;
        }
        Err(_) => status.gone = true,
    }

    Ok(status)
}
