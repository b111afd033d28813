//! Remote layer source handling
//!
//! This module provides the `RemoteSource` struct and parsing for git-backed
//! layer references.

use serde::{Deserialize, Serialize};

use crate::error::{LaminaError, Result};

/// Remote git layer source details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSource {
    /// Repository URL (HTTPS or SSH)
    pub url: String,

    /// Path of the layer directory within the repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Version tag to check out (required before fetching)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Auth token for the remote host, when the layer needs one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl RemoteSource {
    /// Create a new remote source
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: None,
            version: None,
            auth_token: None,
        }
    }

    /// Set the version tag
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the in-repository path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Parse a remote source from a string
    ///
    /// Supported formats:
    /// - `gh:owner/repo` / `github:owner/repo` - GitHub repository
    /// - `gh:owner/repo/layers/base` - layer directory within the repository
    /// - `https://host/owner/repo.git` - Git HTTPS URL
    /// - `git@host:owner/repo.git` - Git SSH URL
    /// - Any of the above with `#version` for the version tag
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let (main_part, version) = match input.split_once('#') {
            Some((main, v)) if !v.is_empty() => (main, Some(v.to_string())),
            Some((main, _)) => (main, None),
            None => (input, None),
        };

        let (url, path) = Self::parse_url(main_part)?;

        Ok(Self {
            url,
            path,
            version,
            auth_token: None,
        })
    }

    /// Parse the URL portion (without the version fragment)
    ///
    /// Returns the clone URL and the optional in-repository path.
    fn parse_url(input: &str) -> Result<(String, Option<String>)> {
        for prefix in ["gh:", "github:"] {
            if let Some(rest) = input.strip_prefix(prefix) {
                return Self::parse_shorthand(input, rest);
            }
        }

        if input.starts_with("https://") || input.starts_with("http://") {
            return Ok(Self::split_url_path(input));
        }

        if input.starts_with("git@") || input.starts_with("ssh://") {
            return Ok((input.to_string(), None));
        }

        Err(LaminaError::InvalidLayerRef {
            input: input.to_string(),
            reason: "unknown remote source format".to_string(),
        })
    }

    /// Parse `owner/repo[/sub/path]` after a `gh:`/`github:` prefix
    fn parse_shorthand(input: &str, rest: &str) -> Result<(String, Option<String>)> {
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return Err(LaminaError::InvalidLayerRef {
                input: input.to_string(),
                reason: "expected owner/repo after the gh: prefix".to_string(),
            });
        }

        let url = format!("https://github.com/{}/{}.git", segments[0], segments[1]);
        let path = if segments.len() > 2 {
            Some(segments[2..].join("/"))
        } else {
            None
        };

        Ok((url, path))
    }

    /// Split an HTTPS URL into the clone URL and the path after `.git`
    ///
    /// `https://host/owner/repo.git/layers/base` yields the repo URL plus
    /// `layers/base`; URLs without a `.git` path component are used as-is.
    fn split_url_path(input: &str) -> (String, Option<String>) {
        if let Some(idx) = input.find(".git/") {
            let url = input[..idx + 4].to_string();
            let path = input[idx + 5..].trim_matches('/').to_string();
            let path = (!path.is_empty()).then_some(path);
            return (url, path);
        }
        (input.to_string(), None)
    }

    /// Get a cache-friendly key for this source
    ///
    /// The key identifies one (repository, version) checkout; layers that
    /// live in different sub-paths of the same checkout share the entry.
    pub fn cache_key(&self) -> String {
        let url_slug = self
            .url
            .replace("https://", "")
            .replace("http://", "")
            .replace("ssh://", "")
            .replace("git@", "")
            .replace([':', '/'], "-")
            .replace(".git", "");

        match &self.version {
            Some(version) => format!("{url_slug}-{version}"),
            None => url_slug,
        }
    }

    /// Display string including the in-repo path and version
    pub fn display(&self) -> String {
        let mut out = self.url.clone();
        if let Some(ref path) = self.path {
            out.push(':');
            out.push_str(path);
        }
        if let Some(ref version) = self.version {
            out.push('#');
            out.push_str(version);
        }
        out
    }
}
