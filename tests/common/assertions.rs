//! Custom assertion helpers for gitgo integration tests.

#![allow(dead_code)]

use std::path::Path;

use super::git_helpers;

/// Assert that a repo is on the expected branch.
pub fn assert_on_branch(repo_path: &Path, expected: &str) {
    let actual = git_helpers::current_branch(repo_path);
    assert_eq!(
        actual,
        expected,
        "Expected repo at {} to be on branch '{}', but was on '{}'",
        repo_path.display(),
        expected,
        actual
    );
}

/// Assert that a local branch exists in the repo.
pub fn assert_branch_exists(repo_path: &Path, branch_name: &str) {
    assert!(
        git_helpers::branch_exists(repo_path, branch_name),
        "Expected branch '{}' to exist in {}",
        branch_name,
        repo_path.display()
    );
}

/// Assert that a local branch does NOT exist in the repo.
pub fn assert_branch_not_exists(repo_path: &Path, branch_name: &str) {
    assert!(
        !git_helpers::branch_exists(repo_path, branch_name),
        "Expected branch '{}' to NOT exist in {}",
        branch_name,
        repo_path.display()
    );
}

/// Assert the repo working tree is clean (no staged, modified, or untracked files).
pub fn assert_repo_clean(repo_path: &Path) {
    let status = git_helpers::git_output(repo_path, &["status", "--porcelain"]);
    assert!(
        status.is_empty(),
        "Expected clean working tree in {}, got:\n{}",
        repo_path.display(),
        status
    );
}

/// Assert that a gitgo error is a specific `GitError` variant.
pub fn assert_git_error<F>(err: &anyhow::Error, expected: &str, matches: F)
where
    F: Fn(&gitgo::git::GitError) -> bool,
{
    let git_err = err
        .chain()
        .find_map(|e| e.downcast_ref::<gitgo::git::GitError>())
        .unwrap_or_else(|| panic!("expected a GitError ({}), got: {:#}", expected, err));
    assert!(
        matches(git_err),
        "expected {}, got: {:?}",
        expected,
        git_err
    );
}
