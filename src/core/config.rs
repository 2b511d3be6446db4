//! Workflow configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML file,
//! then `gitgo.*` keys from git config (repository, global and system
//! levels as git resolves them).
//!
//! ```yaml
//! remote: upstream
//! mainline: develop
//! publish_prefix: alice/
//! sync_prefix: sync/
//! review_tool: rbt
//! review_args: [post, --guess-summary]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the YAML config file
pub const CONFIG_ENV: &str = "GITGO_CONFIG";

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Failed to read git config: {0}")]
    GitConfig(#[from] git2::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Resolved workflow settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoConfig {
    /// Remote that work branches track and publish to
    pub remote: String,
    /// Mainline branch; auto-detected when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mainline: Option<String>,
    /// Prefix for branch names published for review
    pub publish_prefix: String,
    /// Prefix for branch names used to sync between machines
    pub sync_prefix: String,
    /// Review tool executable
    pub review_tool: String,
    /// Arguments passed to the review tool before any passthrough
    pub review_args: Vec<String>,
    /// Review URL template, overriding platform detection.
    ///
    /// Placeholders: `{host}`, `{owner}`, `{repo}`, `{project}`, `{head}`, `{base}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_url_template: Option<String>,
}

impl Default for GoConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            mainline: None,
            publish_prefix: String::new(),
            sync_prefix: "sync/".to_string(),
            review_tool: "rbt".to_string(),
            review_args: vec!["post".to_string()],
            pr_url_template: None,
        }
    }
}

impl GoConfig {
    /// Parse YAML. An empty document yields the defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: GoConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file. A missing file is `Ok(None)`.
    pub fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::IoError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&content).map(Some)
    }

    /// Location of the user config file.
    ///
    /// `$GITGO_CONFIG`, else `$XDG_CONFIG_HOME/gitgo/config.yaml`,
    /// else `$HOME/.config/gitgo/config.yaml`.
    pub fn user_config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("gitgo").join("config.yaml"))
    }

    /// Overlay `gitgo.*` keys from git config
    pub fn apply_git_config(&mut self, config: &git2::Config) -> Result<(), ConfigError> {
        if let Some(v) = get_config_string(config, "gitgo.remote")? {
            self.remote = v;
        }
        if let Some(v) = get_config_string(config, "gitgo.mainline")? {
            self.mainline = Some(v);
        }
        if let Some(v) = get_config_string(config, "gitgo.publishPrefix")? {
            self.publish_prefix = v;
        }
        if let Some(v) = get_config_string(config, "gitgo.syncPrefix")? {
            self.sync_prefix = v;
        }
        if let Some(v) = get_config_string(config, "gitgo.reviewTool")? {
            self.review_tool = v;
        }
        if let Some(v) = get_config_string(config, "gitgo.prUrlTemplate")? {
            self.pr_url_template = Some(v);
        }
        self.validate()
    }

    /// Resolve the full layered configuration for a repository
    pub fn load(repo: &git2::Repository) -> Result<Self, ConfigError> {
        let mut config = match Self::user_config_path() {
            Some(path) => Self::load_file(&path)?.unwrap_or_default(),
            None => Self::default(),
        };
        config.apply_git_config(&repo.config()?)?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "remote must not be empty".to_string(),
            ));
        }
        if self.review_tool.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "review_tool must not be empty".to_string(),
            ));
        }
        // Publishing and syncing under the same name would clobber each other
        if self.publish_prefix == self.sync_prefix {
            return Err(ConfigError::ValidationError(format!(
                "publish_prefix and sync_prefix must differ (both '{}')",
                self.sync_prefix
            )));
        }
        Ok(())
    }
}

fn get_config_string(config: &git2::Config, key: &str) -> Result<Option<String>, git2::Error> {
    match config.get_string(key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GoConfig::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.mainline, None);
        assert_eq!(config.sync_prefix, "sync/");
        assert_eq!(config.review_tool, "rbt");
        assert_eq!(config.review_args, vec!["post"]);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(GoConfig::parse("").unwrap(), GoConfig::default());
    }

    #[test]
    fn test_parse_partial_keeps_defaults() {
        let config = GoConfig::parse("remote: upstream\npublish_prefix: alice/\n").unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.publish_prefix, "alice/");
        assert_eq!(config.sync_prefix, "sync/");
    }

    #[test]
    fn test_parse_unknown_key_rejected() {
        assert!(GoConfig::parse("remtoe: upstream\n").is_err());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(matches!(
            GoConfig::parse("{{{{not yaml"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_same_prefixes_rejected() {
        let err = GoConfig::parse("publish_prefix: x/\nsync_prefix: x/\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(GoConfig::load_file(&temp.path().join("none.yaml"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_git_config_overrides_file() {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        let mut git_config = repo.config().unwrap();
        git_config.set_str("gitgo.remote", "fork").unwrap();
        git_config.set_str("gitgo.mainline", "trunk").unwrap();
        git_config.set_str("gitgo.reviewTool", "echo").unwrap();

        let mut config = GoConfig::parse("remote: upstream\nsync_prefix: wip/\n").unwrap();
        config.apply_git_config(&repo.config().unwrap()).unwrap();

        assert_eq!(config.remote, "fork");
        assert_eq!(config.mainline.as_deref(), Some("trunk"));
        assert_eq!(config.review_tool, "echo");
        assert_eq!(config.sync_prefix, "wip/");
    }
}
