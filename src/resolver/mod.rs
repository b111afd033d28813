//! Layer expansion for composition
//!
//! This module turns the root fragment's `extends` list into a flat,
//! ordered list of resolved layers: depth-first, so a layer's own bases are
//! merged immediately before the layer itself, siblings left-to-right,
//! root fragment last. The merge engine folds this list as-is.
//!
//! Cycle detection tracks the set of refs currently being expanded; a ref
//! reappearing on the active path fails with `CyclicLayerReference` naming
//! the full cycle.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, cyclic_reference, unresolved_layer};
use crate::fragment::{ConfigFragment, load_fragment};
use crate::source::{LayerRef, layer_ref::identity_key};
use crate::store::LayerStore;

/// One resolved layer, ready for merging
#[derive(Debug, Clone)]
pub struct ResolvedLayer {
    /// The ref this layer was reached through
    pub layer_ref: LayerRef,

    /// Resolved readable layer directory
    pub dir: PathBuf,

    /// The layer's parsed fragment
    pub fragment: ConfigFragment,
}

/// Layer source resolver
///
/// Owns no global state: each [`Resolver::resolve`] call runs one
/// composition's expansion against the injected store.
pub struct Resolver<'a, S: LayerStore> {
    store: &'a S,

    /// Short names of the layers currently being expanded (for diagnostics)
    active_names: Vec<String>,

    /// Identity keys of the layers currently being expanded
    active_keys: Vec<String>,

    /// Identities already fully expanded; a layer reached twice through a
    /// diamond is merged once, at its base-most position
    seen: BTreeSet<String>,
}

impl<'a, S: LayerStore> Resolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            active_names: Vec::new(),
            active_keys: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    /// Expand the project's layer graph into merge order
    ///
    /// `project_dir` must contain the root fragment. The returned list is
    /// base-first; the root fragment is the last element.
    pub fn resolve(&mut self, project_dir: &Path) -> Result<Vec<ResolvedLayer>> {
        self.active_names.clear();
        self.active_keys.clear();
        self.seen.clear();

        if !project_dir.is_dir() {
            return Err(unresolved_layer(
                project_dir.display().to_string(),
                "project directory not found",
            ));
        }

        // Absolute root path, so expanding it is independent of the CWD.
        let project_dir =
            dunce::canonicalize(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());
        let root_ref = LayerRef::Dir {
            path: project_dir.clone(),
        };

        let mut order = Vec::new();
        // The root resolves against itself; context only matters for
        // relative refs inside fragments.
        self.expand(root_ref, &project_dir, &mut order)?;
        Ok(order)
    }

    /// Depth-first expansion of one ref: bases first, then the layer itself
    fn expand(
        &mut self,
        layer_ref: LayerRef,
        context_dir: &Path,
        order: &mut Vec<ResolvedLayer>,
    ) -> Result<()> {
        let dir = self.store.fetch(&layer_ref, context_dir)?;
        let key = identity_key(&layer_ref, &dir);
        let name = layer_ref.short_name();

        if let Some(idx) = self.active_keys.iter().position(|k| *k == key) {
            let mut chain: Vec<String> = self.active_names[idx..].to_vec();
            chain.push(name);
            return Err(cyclic_reference(&chain));
        }

        if self.seen.contains(&key) {
            return Ok(());
        }

        let fragment = load_fragment(&dir)?;

        self.active_keys.push(key.clone());
        self.active_names.push(name);

        for entry in &fragment.extends {
            let child = LayerRef::from_entry(entry)?;
            self.expand(child, &dir, order)?;
        }

        self.active_keys.pop();
        self.active_names.pop();
        self.seen.insert(key);

        order.push(ResolvedLayer {
            layer_ref,
            dir,
            fragment,
        });

        Ok(())
    }
}
