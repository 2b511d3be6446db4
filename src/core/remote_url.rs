//! Remote URL parsing and review URL construction

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::debug;

use crate::git::GitError;

/// Hosting platform, detected from the remote host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    GitHub,
    GitLab,
    Bitbucket,
    AzureDevOps,
    /// Gitea, Gerrit, cgit and other hosts with no known review URL
    Unknown,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::GitHub => write!(f, "github"),
            Platform::GitLab => write!(f, "gitlab"),
            Platform::Bitbucket => write!(f, "bitbucket"),
            Platform::AzureDevOps => write!(f, "azure-devops"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

/// Parsed remote URL components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    /// Web host (e.g. `github.com`)
    pub host: String,
    /// Owner, organisation or group path (`group/subgroup` on GitLab)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Project (Azure DevOps only)
    pub project: Option<String>,
    /// Detected platform
    pub platform: Platform,
}

/// `scheme://[user@]host[:port]/path`
static SCHEME_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<scheme>[a-z][a-z0-9+]*)://(?:[^@/]+@)?(?P<host>[^/:]+)(?::\d+)?/(?P<path>.+)$")
        .expect("hardcoded regex must be valid")
});

/// scp-like `[user@]host:path`
static SCP_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^@/]+@)?(?P<host>[^/:]+):(?P<path>[^/].*)$")
        .expect("hardcoded regex must be valid")
});

/// Parse a git remote URL (SSH, scp-like, HTTPS).
///
/// Local paths and `file://` URLs have no web host and yield `None`.
pub fn parse_remote_url(url: &str) -> Option<RemoteInfo> {
    let (host, path) = if let Some(caps) = SCHEME_URL_RE.captures(url) {
        if &caps["scheme"] == "file" {
            return None;
        }
        (caps["host"].to_string(), caps["path"].to_string())
    } else if let Some(caps) = SCP_URL_RE.captures(url) {
        (caps["host"].to_string(), caps["path"].to_string())
    } else {
        return None;
    };

    let path = path.trim_end_matches('/').trim_end_matches(".git");
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let platform = detect_platform(&host);

    if platform == Platform::AzureDevOps {
        return parse_azure(&host, &segments);
    }

    if segments.len() < 2 {
        return None;
    }
    let (repo, owner) = segments.split_last()?;
    Some(RemoteInfo {
        host,
        owner: owner.join("/"),
        repo: repo.to_string(),
        project: None,
        platform,
    })
}

fn parse_azure(host: &str, segments: &[&str]) -> Option<RemoteInfo> {
    // SSH: ssh.dev.azure.com:v3/org/project/repo
    if segments.len() >= 4 && segments[0] == "v3" {
        return Some(RemoteInfo {
            host: "dev.azure.com".to_string(),
            owner: segments[1].to_string(),
            repo: segments[3].to_string(),
            project: Some(segments[2].to_string()),
            platform: Platform::AzureDevOps,
        });
    }

    // HTTPS: dev.azure.com/org/project/_git/repo
    if segments.len() >= 4 && segments[2] == "_git" {
        return Some(RemoteInfo {
            host: host.to_string(),
            owner: segments[0].to_string(),
            repo: segments[3].to_string(),
            project: Some(segments[1].to_string()),
            platform: Platform::AzureDevOps,
        });
    }

    // org.visualstudio.com/project/_git/repo
    if segments.len() >= 3 && segments[1] == "_git" {
        let org = host.split('.').next()?;
        return Some(RemoteInfo {
            host: host.to_string(),
            owner: org.to_string(),
            repo: segments[2].to_string(),
            project: Some(segments[0].to_string()),
            platform: Platform::AzureDevOps,
        });
    }

    None
}

/// Detect platform type from host
pub fn detect_platform(host: &str) -> Platform {
    if host.contains("dev.azure.com") || host.ends_with("visualstudio.com") {
        return Platform::AzureDevOps;
    }
    if host.contains("bitbucket.") {
        return Platform::Bitbucket;
    }
    if host.contains("gitlab.") {
        return Platform::GitLab;
    }
    if host == "github.com" || host.contains("github.") {
        return Platform::GitHub;
    }
    Platform::Unknown
}

/// Web URL for opening a review of `head` against `base`.
///
/// `None` for hosts whose review URL scheme is unknown.
pub fn review_url(info: &RemoteInfo, head: &str, base: &str) -> Option<String> {
    let enc_head = urlencoding::encode(head);
    let enc_base = urlencoding::encode(base);

    let url = match info.platform {
        Platform::GitHub => format!(
            "https://{}/{}/{}/compare/{}...{}?expand=1",
            info.host, info.owner, info.repo, base, head
        ),
        Platform::GitLab => format!(
            "https://{}/{}/{}/-/merge_requests/new?merge_request%5Bsource_branch%5D={}&merge_request%5Btarget_branch%5D={}",
            info.host, info.owner, info.repo, enc_head, enc_base
        ),
        Platform::Bitbucket => format!(
            "https://{}/{}/{}/pull-requests/new?source={}&dest={}",
            info.host, info.owner, info.repo, enc_head, enc_base
        ),
        Platform::AzureDevOps => {
            let project = info.project.as_deref().unwrap_or(&info.repo);
            let base_url = if info.host.ends_with("visualstudio.com") {
                format!("https://{}/{}", info.host, project)
            } else {
                format!("https://{}/{}/{}", info.host, info.owner, project)
            };
            format!(
                "{}/_git/{}/pullrequestcreate?sourceRef={}&targetRef={}",
                base_url, info.repo, enc_head, enc_base
            )
        }
        Platform::Unknown => return None,
    };
    Some(url)
}

/// Fill a user-supplied review URL template
pub fn render_template(template: &str, info: &RemoteInfo, head: &str, base: &str) -> String {
    template
        .replace("{host}", &info.host)
        .replace("{owner}", &info.owner)
        .replace("{repo}", &info.repo)
        .replace("{project}", info.project.as_deref().unwrap_or_default())
        .replace("{head}", &urlencoding::encode(head))
        .replace("{base}", &urlencoding::encode(base))
}

/// Resolve the review URL for a remote URL, honouring an optional template.
///
/// Without a template, hosts of unknown platform are `UnsupportedRemote`.
pub fn review_url_for_remote(
    remote_url: &str,
    head: &str,
    base: &str,
    template: Option<&str>,
) -> Result<String, GitError> {
    let unsupported = || GitError::UnsupportedRemote(remote_url.to_string());
    let info = parse_remote_url(remote_url).ok_or_else(unsupported)?;
    debug!(host = %info.host, platform = %info.platform, "resolved review host");
    match template {
        Some(t) => Ok(render_template(t, &info, head, base)),
        None => review_url(&info, head, base).ok_or_else(unsupported),
    }
}
