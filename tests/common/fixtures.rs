//! Test fixtures for creating repositories with a remote.
//!
//! `RepoBuilder` creates a bare `file://` remote seeded with one commit on
//! `main`, plus a working clone - all offline.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use gitgo::cli::RepoContext;
use gitgo::core::GoConfig;

use super::git_helpers;

/// A bare remote and a working clone, cleaned up on drop.
pub struct RepoFixture {
    /// Kept alive for the lifetime of the fixture.
    pub _temp: TempDir,
    /// Path to the bare remote.
    pub remote_path: PathBuf,
    /// Path to the primary working clone.
    pub work_path: PathBuf,
}

impl RepoFixture {
    /// The file:// URL of the bare remote.
    pub fn remote_url(&self) -> String {
        format!("file://{}", self.remote_path.display())
    }

    /// Clone the remote again (e.g. a second machine or a teammate).
    pub fn clone_as(&self, name: &str) -> PathBuf {
        let dest = self._temp.path().join(name);
        git_helpers::clone_repo(&self.remote_url(), &dest);
        dest
    }

    /// Context for the primary clone.
    pub fn context(&self) -> RepoContext {
        context_at(&self.work_path)
    }

    /// Context for an arbitrary clone.
    pub fn context_at(&self, path: &Path) -> RepoContext {
        context_at(path)
    }
}

/// Build a quiet context from defaults plus the repository's git config,
/// ignoring any user config file on the machine running the tests.
pub fn context_at(path: &Path) -> RepoContext {
    let repo = gitgo::git::discover_repo(path).expect("fixture path should be a repository");
    let mut config = GoConfig::default();
    config
        .apply_git_config(&repo.config().expect("git config"))
        .expect("valid gitgo git config");
    RepoContext::new(repo, config, true)
}

/// Builder for creating test repositories.
pub struct RepoBuilder {
    files: Vec<(String, String)>,
    git_config: Vec<(String, String)>,
}

impl RepoBuilder {
    pub fn new() -> Self {
        Self {
            files: vec![("README.md".to_string(), "# test\n".to_string())],
            git_config: Vec::new(),
        }
    }

    /// Add a file to the initial commit.
    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.push((name.to_string(), content.to_string()));
        self
    }

    /// Set a git config key in the working clone.
    pub fn with_git_config(mut self, key: &str, value: &str) -> Self {
        self.git_config.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the fixture.
    pub fn build(self) -> RepoFixture {
        let temp = TempDir::new().unwrap();
        let remote_path = temp.path().join("remote.git");
        let seed_path = temp.path().join("seed");
        let work_path = temp.path().join("work");

        git_helpers::init_bare_repo(&remote_path);
        let remote_url = format!("file://{}", remote_path.display());

        git_helpers::init_repo(&seed_path);
        for (name, content) in &self.files {
            std::fs::write(seed_path.join(name), content).unwrap();
        }
        git_helpers::git(&seed_path, &["add", "."]);
        git_helpers::git(&seed_path, &["commit", "-m", "Initial commit"]);
        git_helpers::add_remote(&seed_path, "origin", &remote_url);
        git_helpers::push_upstream(&seed_path, "origin", "main");

        git_helpers::clone_repo(&remote_url, &work_path);
        for (key, value) in &self.git_config {
            git_helpers::set_config(&work_path, key, value);
        }

        RepoFixture {
            _temp: temp,
            remote_path,
            work_path,
        }
    }
}

impl Default for RepoBuilder {
    fn default() -> Self {
        Self::new()
    }
}
