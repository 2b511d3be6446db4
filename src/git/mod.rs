//! Git operations wrapper
//!
//! Reads (refs, config, commits) go through git2 (libgit2 bindings).
//! Everything that mutates the repository or talks to a remote shells
//! out to the `git` binary so hooks, credentials and user config apply.

pub mod branch;
pub mod history;
pub mod remote;
pub mod status;

pub use branch::*;
pub use history::*;
pub use remote::*;
pub use status::*;

use crate::util::{display_cmd, log_cmd};
use git2::Repository;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotAGitRepository(String),

    #[error("No such branch: {0}")]
    NoSuchBranch(String),

    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    #[error("Cannot reach remote. Check your network connection and remote URL.\n{stderr}")]
    NetworkError { code: i32, stderr: String },

    #[error("Rejected: the remote has commits you do not have. Run `gitgo gopull` first.\n{stderr}")]
    NonFastForward { code: i32, stderr: String },

    #[error("Conflict. Resolve it, then `git rebase --continue` or `git rebase --abort`.\n{stderr}")]
    Conflict { code: i32, stderr: String },

    #[error("`{command}` failed with exit code {code}{}", format_stderr(.stderr))]
    SubprocessFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Tool not found on PATH: {0}")]
    ToolNotFound(String),

    #[error("Cannot derive a web URL from remote: {0}")]
    UnsupportedRemote(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl GitError {
    /// Process exit code to report for this error.
    ///
    /// Failures that came from a subprocess carry its exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            GitError::NotAGitRepository(_) => 128,
            GitError::NetworkError { code, .. }
            | GitError::NonFastForward { code, .. }
            | GitError::Conflict { code, .. }
            | GitError::SubprocessFailed { code, .. } => *code,
            GitError::ToolNotFound(_) => 127,
            _ => 1,
        }
    }
}

/// Map a failed git invocation to an error variant by inspecting its output.
pub fn classify_failure(command: &str, code: i32, stdout: &str, stderr: &str) -> GitError {
    let combined = format!("{}\n{}", stderr, stdout);
    let lower = combined.to_lowercase();
    let stderr = stderr.trim().to_string();

    if lower.contains("not a git repository") {
        return GitError::NotAGitRepository(stderr);
    }
    if lower.contains("could not apply") || combined.contains("CONFLICT") {
        return GitError::Conflict { code, stderr };
    }
    if lower.contains("non-fast-forward")
        || lower.contains("fetch first")
        || lower.contains("stale info")
        || lower.contains("[rejected]")
    {
        return GitError::NonFastForward { code, stderr };
    }
    if lower.contains("could not read from remote")
        || lower.contains("repository not found")
        || lower.contains("could not resolve host")
        || lower.contains("unable to access")
        || lower.contains("connection refused")
        || lower.contains("connection timed out")
        || lower.contains("authentication failed")
        || lower.contains("permission denied")
    {
        return GitError::NetworkError { code, stderr };
    }
    if lower.contains("no tracking information")
        || lower.contains("no upstream")
        || lower.contains("couldn't find remote ref")
        || lower.contains("unknown revision")
        || lower.contains("invalid upstream")
        || lower.contains("not a valid object name")
        || lower.contains("did not match any")
    {
        let first_line = stderr.lines().next().unwrap_or_default();
        return GitError::NoSuchBranch(first_line.trim_start_matches("fatal: ").to_string());
    }

    GitError::SubprocessFailed {
        command: command.to_string(),
        code,
        stderr,
    }
}

/// Discover the repository containing `path` (walking up to ancestors)
pub fn discover_repo<P: AsRef<Path>>(path: P) -> Result<Repository, GitError> {
    Repository::discover(path.as_ref())
        .map_err(|_| GitError::NotAGitRepository(path.as_ref().display().to_string()))
}

/// Get the working directory of a repository
/// Works correctly for both regular repos and worktrees
pub fn get_workdir(repo: &Repository) -> &Path {
    repo.workdir().unwrap_or_else(|| repo.path())
}

/// Get the current branch name
///
/// Reads the symbolic target of HEAD, so an unborn branch (no commits yet)
/// still has a name.
pub fn get_current_branch(repo: &Repository) -> Result<String, GitError> {
    let head = repo.find_reference("HEAD")?;
    match head.symbolic_target() {
        Some(target) => Ok(target
            .strip_prefix("refs/heads/")
            .unwrap_or(target)
            .to_string()),
        None => Err(GitError::DetachedHead),
    }
}

/// Build a `git` command rooted at the repository's working directory
pub fn git_command(repo: &Repository) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(get_workdir(repo));
    cmd
}

/// Run a command, capturing its output. Returns stdout on success.
pub fn run_captured(cmd: &mut Command) -> Result<String, GitError> {
    log_cmd(cmd);
    let output = cmd.output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(classify_failure(
            &display_cmd(cmd),
            output.status.code().unwrap_or(1),
            &stdout,
            &stderr,
        ));
    }

    Ok(stdout)
}

/// Run a command with inherited stdio. The exit code is carried on failure.
pub fn run_inherited(cmd: &mut Command) -> Result<(), GitError> {
    log_cmd(cmd);
    let status = cmd.status()?;

    if !status.success() {
        return Err(GitError::SubprocessFailed {
            command: display_cmd(cmd),
            code: status.code().unwrap_or(1),
            stderr: String::new(),
        });
    }

    Ok(())
}

/// Run `git <args>` in the repository, capturing output
pub fn git<I, S>(repo: &Repository, args: I) -> Result<String, GitError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    run_captured(git_command(repo).args(args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = discover_repo(&nested).unwrap();
        assert_eq!(
            get_workdir(&repo).canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_outside_repo() {
        let temp = TempDir::new().unwrap();
        let err = discover_repo(temp.path()).err().unwrap();
        assert!(matches!(err, GitError::NotAGitRepository(_)));
        assert_eq!(err.exit_code(), 128);
    }

    #[test]
    fn test_current_branch_on_unborn_repo() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        repo.set_head("refs/heads/trunk").unwrap();

        assert_eq!(get_current_branch(&repo).unwrap(), "trunk");
    }

    #[test]
    fn test_classify_non_fast_forward() {
        let stderr = " ! [rejected]        HEAD -> main (fetch first)\n\
                      error: failed to push some refs to 'origin'";
        let err = classify_failure("git push", 1, "", stderr);
        assert!(matches!(err, GitError::NonFastForward { code: 1, .. }));
    }

    #[test]
    fn test_classify_network() {
        let stderr = "fatal: unable to access 'https://example.invalid/x.git/': \
                      Could not resolve host: example.invalid";
        let err = classify_failure("git fetch", 128, "", stderr);
        assert!(matches!(err, GitError::NetworkError { code: 128, .. }));
        assert_eq!(err.exit_code(), 128);
    }

    #[test]
    fn test_classify_conflict_from_stdout() {
        let stdout = "CONFLICT (content): Merge conflict in README.md";
        let err = classify_failure("git pull --rebase", 1, stdout, "error: could not apply 1a2b3c4");
        assert!(matches!(err, GitError::Conflict { .. }));
    }

    #[test]
    fn test_classify_no_tracking() {
        let stderr = "There is no tracking information for the current branch.";
        let err = classify_failure("git pull --rebase", 1, "", stderr);
        assert!(matches!(err, GitError::NoSuchBranch(_)));
    }

    #[test]
    fn test_classify_other_keeps_exit_code() {
        let err = classify_failure("git frobnicate", 42, "", "boom");
        assert_eq!(err.exit_code(), 42);
        assert_eq!(
            err.to_string(),
            "`git frobnicate` failed with exit code 42: boom"
        );
    }
}
