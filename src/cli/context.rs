//! Repository context passed to command handlers
//!
//! Bundles the discovered repository, resolved configuration and global
//! CLI flags into a single struct.

use anyhow::Context;
use git2::Repository;
use indicatif::ProgressBar;
use std::path::Path;

use crate::cli::output::Output;
use crate::core::GoConfig;
use crate::git::{self, GitError};

/// Repository context available to all command handlers.
///
/// Created once in `main()` by discovering the repository from the
/// current directory. Discovery happens before any subprocess runs.
pub struct RepoContext {
    /// The discovered repository
    pub repo: Repository,
    /// Layered configuration
    pub config: GoConfig,
    /// Suppress non-essential output (`--quiet`)
    pub quiet: bool,
}

impl RepoContext {
    /// Discover the repository containing `path` and load its configuration
    pub fn discover(path: &Path, quiet: bool) -> anyhow::Result<Self> {
        let repo = git::discover_repo(path)?;
        let config = GoConfig::load(&repo).context("Failed to load gitgo configuration")?;
        Ok(Self::new(repo, config, quiet))
    }

    pub fn new(repo: Repository, config: GoConfig, quiet: bool) -> Self {
        Self {
            repo,
            config,
            quiet,
        }
    }

    /// Spinner for a long-running step, hidden under `--quiet`
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet {
            ProgressBar::hidden()
        } else {
            Output::spinner(message)
        }
    }

    /// Working directory of the repository
    pub fn workdir(&self) -> &Path {
        git::get_workdir(&self.repo)
    }

    /// Configured remote name
    pub fn remote(&self) -> &str {
        &self.config.remote
    }

    /// Configured or detected mainline branch
    pub fn mainline(&self) -> String {
        git::resolve_mainline(&self.repo, self.remote(), self.config.mainline.as_deref())
    }

    /// Currently checked-out branch
    pub fn current_branch(&self) -> Result<String, GitError> {
        git::get_current_branch(&self.repo)
    }

    /// Remote branch name a work branch is published under for review
    pub fn published_name(&self, branch: &str) -> String {
        format!("{}{}", self.config.publish_prefix, branch)
    }

    /// Remote branch name used to sync a work branch between machines
    pub fn sync_name(&self, branch: &str) -> String {
        format!("{}{}", self.config.sync_prefix, branch)
    }

    /// Base the current work branch is compared against: its upstream if
    /// set, otherwise `<remote>/<mainline>`.
    pub fn work_base(&self) -> Result<String, GitError> {
        match git::get_upstream_branch(&self.repo, None)? {
            Some(upstream) => Ok(upstream),
            None => Ok(format!("{}/{}", self.remote(), self.mainline())),
        }
    }
}
