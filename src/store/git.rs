//! Remote layer fetching over git
//!
//! Remote layers are cloned into the layer cache and checked out at the
//! ref's version tag. Fetches happen sequentially in resolution order, one
//! blocking clone per unresolved ref, so override precedence never depends
//! on completion timing.

use std::path::{Path, PathBuf};

use git2::{Cred, CredentialType, FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Result, invalid_version, unresolved_layer};
use crate::source::{LayerRef, RemoteSource};

use super::{LayerStore, cache, resolve_local_dir};

/// Layer store backed by the local filesystem and remote git sources
pub struct GitStore {
    cache_root: PathBuf,
    /// Suppress the fetch spinner (tests, non-tty consumers)
    quiet: bool,
}

impl GitStore {
    /// Create a store using the default cache directory
    pub fn new() -> Result<Self> {
        Ok(Self {
            cache_root: cache::layers_cache_dir()?,
            quiet: false,
        })
    }

    /// Create a store with an explicit cache root
    pub fn with_cache_root(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            quiet: true,
        }
    }

    /// Ensure the (repository, version) checkout exists in the cache
    ///
    /// Version tags are immutable, so an existing entry is reused without
    /// touching the network.
    fn ensure_checkout(&self, remote: &RemoteSource, version: &str) -> Result<PathBuf> {
        let target = self.cache_root.join(remote.cache_key());
        if target.is_dir() {
            return Ok(target);
        }

        std::fs::create_dir_all(&self.cache_root)?;

        let staging = tempfile::TempDir::new_in(&self.cache_root)?;
        let clone_dir = staging.path().join("repo");

        let spinner = self.fetch_spinner(remote);
        let repo = clone(remote, &clone_dir);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        let repo = repo?;

        checkout_version(&repo, remote, version)?;
        drop(repo);

        // Publish atomically so a failed clone never leaves a half-built
        // cache entry behind.
        std::fs::rename(&clone_dir, &target)?;
        Ok(target)
    }

    fn fetch_spinner(&self, remote: &RemoteSource) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} Fetching {msg}") {
            pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        pb.set_message(remote.display());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Some(pb)
    }
}

impl LayerStore for GitStore {
    fn fetch(&self, layer_ref: &LayerRef, context_dir: &Path) -> Result<PathBuf> {
        match layer_ref {
            LayerRef::Dir { path } => resolve_local_dir(path, context_dir),
            LayerRef::Remote(remote) => {
                let version = remote.version.as_deref().ok_or_else(|| {
                    invalid_version(remote.display(), "remote layer has no version tag")
                })?;

                let checkout = self.ensure_checkout(remote, version)?;

                let layer_dir = match &remote.path {
                    Some(path) => checkout.join(path),
                    None => checkout,
                };
                if !layer_dir.is_dir() {
                    return Err(unresolved_layer(
                        remote.display(),
                        format!(
                            "path '{}' not found in repository checkout",
                            remote.path.as_deref().unwrap_or(".")
                        ),
                    ));
                }
                Ok(layer_dir)
            }
        }
    }
}

/// Clone a remote layer repository
///
/// Authentication uses the ref's auth token when present, falling back to
/// git's native credential system (SSH agent, SSH keys, default creds).
fn clone(remote: &RemoteSource, target: &Path) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks, remote.auth_token.clone());

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    // Full clone: version tags are resolved locally after the fetch.
    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);

    builder
        .clone(&remote.url, target)
        .map_err(|e| unresolved_layer(remote.display(), e.message().to_string()))
}

/// Set up authentication callbacks for the clone
fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks, auth_token: Option<String>) {
    callbacks.credentials(move |_url, username_from_url, allowed_types| {
        if let Some(ref token) = auth_token {
            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                return Cred::userpass_plaintext("x-access-token", token);
            }
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(username) = username_from_url {
                return Cred::ssh_key_from_agent(username);
            }
        }

        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        Cred::userpass_plaintext(username_from_url.unwrap_or("git"), "")
    });
}

/// Check out the version tag in a freshly cloned repository
///
/// Accepts plain tag names (`v1.4.0`) and full refs (`refs/tags/v1.4.0`).
fn checkout_version(repo: &Repository, remote: &RemoteSource, version: &str) -> Result<()> {
    let candidates = [format!("refs/tags/{version}"), version.to_string()];

    let commit = candidates
        .iter()
        .find_map(|candidate| {
            repo.find_reference(candidate)
                .ok()
                .and_then(|r| r.peel_to_commit().ok())
        })
        .or_else(|| {
            repo.revparse_single(version)
                .ok()
                .and_then(|obj| obj.peel_to_commit().ok())
        })
        .ok_or_else(|| {
            invalid_version(
                remote.display(),
                format!("version tag '{version}' not found in repository"),
            )
        })?;

    repo.checkout_tree(
        commit.as_object(),
        Some(git2::build::CheckoutBuilder::new().force()),
    )?;
    repo.set_head_detached(commit.id())?;
    Ok(())
}
