//! Layer source capability
//!
//! The resolver does not know how to reach a layer: it consumes a
//! [`LayerStore`], the injected "fetch layer by ref" capability. This keeps
//! the resolver and merge engine pure and testable without network access.
//!
//! ## Implementations
//!
//! - [`FsStore`]: local directories only; any remote ref fails with
//!   `UnresolvedLayer`. Used by unit tests and offline composition.
//! - [`GitStore`]: local directories plus remote git sources, fetched into
//!   a per-user cache and pinned to a version tag.

pub mod cache;
pub mod git;

use std::path::{Path, PathBuf};

use crate::error::{Result, unresolved_layer};
use crate::source::LayerRef;

pub use git::GitStore;

/// Capability to turn a layer ref into a readable layer directory
pub trait LayerStore {
    /// Resolve `layer_ref` into a layer directory
    ///
    /// `context_dir` is the directory of the fragment that declared the
    /// ref; relative local paths resolve against it.
    fn fetch(&self, layer_ref: &LayerRef, context_dir: &Path) -> Result<PathBuf>;
}

/// Local-filesystem-only layer store
#[derive(Debug, Default)]
pub struct FsStore;

impl LayerStore for FsStore {
    fn fetch(&self, layer_ref: &LayerRef, context_dir: &Path) -> Result<PathBuf> {
        match layer_ref {
            LayerRef::Dir { path } => resolve_local_dir(path, context_dir),
            LayerRef::Remote(remote) => Err(unresolved_layer(
                remote.display(),
                "remote layers are not available without a remote-capable store",
            )),
        }
    }
}

/// Resolve a local layer directory against the declaring fragment's dir
pub(crate) fn resolve_local_dir(path: &Path, context_dir: &Path) -> Result<PathBuf> {
    let full_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        context_dir.join(path)
    };

    if !full_path.is_dir() {
        return Err(unresolved_layer(
            path.display().to_string(),
            format!("no layer directory at '{}'", full_path.display()),
        ));
    }

    // Canonicalize so the same layer reached through different relative
    // paths gets one identity during cycle detection.
    Ok(dunce::canonicalize(&full_path).unwrap_or(full_path))
}
