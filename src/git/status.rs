//! Git working tree status operations

use git2::Repository;

use super::{git, GitError};

/// One entry of `git status --porcelain=v1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Index (staged) status character
    pub index: char,
    /// Worktree status character
    pub worktree: char,
    /// Path relative to the repository root
    pub path: String,
}

impl StatusEntry {
    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.worktree == '?'
    }
}

/// List changed, staged and untracked files
pub fn get_status_entries(repo: &Repository) -> Result<Vec<StatusEntry>, GitError> {
    let stdout = git(repo, ["status", "--porcelain=v1"])?;
    Ok(parse_porcelain(&stdout))
}

/// Parse porcelain v1 output
pub fn parse_porcelain(stdout: &str) -> Vec<StatusEntry> {
    stdout
        .lines()
        .filter(|line| line.len() >= 4)
        .map(|line| {
            let mut chars = line.chars();
            let index = chars.next().unwrap_or(' ');
            let worktree = chars.next().unwrap_or(' ');
            StatusEntry {
                index,
                worktree,
                path: line[3..].to_string(),
            }
        })
        .collect()
}

/// Hard reset to `target` and remove untracked files and directories.
///
/// Ignored files are left alone.
pub fn discard_changes(repo: &Repository, target: &str) -> Result<(), GitError> {
    git(repo, ["reset", "--hard", target])?;
    git(repo, ["clean", "-fd"])?;
    Ok(())
}
