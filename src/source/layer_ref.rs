//! Layer reference parsing
//!
//! This module provides the `LayerRef` enum for local and remote layer
//! sources, plus the two accepted `extends` entry forms.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LaminaError, Result, invalid_version};

use super::remote::RemoteSource;

/// One entry of a fragment's `extends` list
///
/// Either a plain ref string or a mapping carrying the version and auth
/// token separately:
///
/// ```yaml
/// extends:
///   - ../layers/base
///   - gh:owner/repo/layers/ui#v1.4.0
///   - source: gh:owner/repo/layers/pro
///     version: v1.4.0
///     auth: ghp_token
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtendEntry {
    /// Plain ref string
    Plain(String),
    /// Mapping with explicit version/auth
    Detailed {
        source: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        auth: Option<String>,
    },
}

/// A parsed reference to a layer source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerRef {
    /// Local layer directory (relative refs resolve against the declaring
    /// fragment's directory)
    Dir {
        path: PathBuf,
    },
    /// Remote git layer source
    Remote(RemoteSource),
}

impl LayerRef {
    /// Parse a layer ref from a plain string
    ///
    /// Strings with a remote scheme (`gh:`, `github:`, `https://`, `git@`,
    /// `ssh://`) parse as remote sources and must carry a `#version` tag;
    /// everything else is a local directory path.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(LaminaError::InvalidLayerRef {
                input: input.to_string(),
                reason: "layer location must be non-empty".to_string(),
            });
        }

        if is_remote(input) {
            let remote = RemoteSource::parse(input)?;
            if remote.version.is_none() {
                return Err(invalid_version(
                    input,
                    "remote layers require a version tag (append #<tag>)",
                ));
            }
            return Ok(LayerRef::Remote(remote));
        }

        Ok(LayerRef::Dir {
            path: PathBuf::from(input),
        })
    }

    /// Parse an `extends` entry, folding in the mapping form's version/auth
    pub fn from_entry(entry: &ExtendEntry) -> Result<Self> {
        match entry {
            ExtendEntry::Plain(input) => Self::parse(input),
            ExtendEntry::Detailed {
                source,
                version,
                auth,
            } => {
                let source = source.trim();
                if !is_remote(source) {
                    // version/auth make no sense on a local path
                    return Self::parse(source);
                }
                let mut remote = RemoteSource::parse(source)?;
                if remote.version.is_none() {
                    remote.version = version.clone();
                }
                if remote.version.is_none() {
                    return Err(invalid_version(
                        source,
                        "remote layers require a version tag (append #<tag> or set 'version')",
                    ));
                }
                remote.auth_token = auth.clone();
                Ok(LayerRef::Remote(remote))
            }
        }
    }

    /// Check if this is a local directory ref
    pub fn is_local(&self) -> bool {
        matches!(self, LayerRef::Dir { .. })
    }

    /// Get the remote source if this is a remote ref
    pub fn as_remote(&self) -> Option<&RemoteSource> {
        match self {
            LayerRef::Remote(remote) => Some(remote),
            _ => None,
        }
    }

    /// Short name used in cycle chains and resolution listings
    ///
    /// Local refs use the layer directory name; remote refs use the
    /// display URL with path and version.
    pub fn short_name(&self) -> String {
        match self {
            LayerRef::Dir { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            LayerRef::Remote(remote) => remote.display(),
        }
    }

    /// Full display string showing where the layer comes from
    pub fn display_location(&self) -> String {
        match self {
            LayerRef::Dir { path } => path.display().to_string(),
            LayerRef::Remote(remote) => remote.display(),
        }
    }
}

/// Check whether an extends string points at a remote source
fn is_remote(input: &str) -> bool {
    input.starts_with("gh:")
        || input.starts_with("github:")
        || input.starts_with("https://")
        || input.starts_with("http://")
        || input.starts_with("git@")
        || input.starts_with("ssh://")
}

/// Identity key for cycle detection: one string per distinct layer source
///
/// Local refs use the canonicalized absolute directory (so `./a` declared
/// from two different fragments is recognized as the same layer); remote
/// refs use url + path + version.
pub fn identity_key(layer_ref: &LayerRef, resolved_dir: &Path) -> String {
    match layer_ref {
        LayerRef::Dir { .. } => dunce::canonicalize(resolved_dir)
            .unwrap_or_else(|_| resolved_dir.to_path_buf())
            .display()
            .to_string(),
        LayerRef::Remote(remote) => remote.display(),
    }
}
