//! Composition pipeline
//!
//! One synchronous pass per invocation: resolve the layer graph, fold the
//! fragments base-first, validate and emit. There is no partial result; a
//! failure at any stage aborts the whole composition.

use std::path::Path;

use crate::effective::EffectiveConfig;
use crate::error::Result;
use crate::merge::fold_fragments;
use crate::resolver::{ResolvedLayer, Resolver};
use crate::store::LayerStore;

/// Compose the effective configuration for a project directory
pub fn compose<S: LayerStore>(project_dir: &Path, store: &S) -> Result<EffectiveConfig> {
    let layers = resolve_layers(project_dir, store)?;
    let merged = fold_fragments(layers.iter().map(|layer| &layer.fragment));
    EffectiveConfig::emit(merged)
}

/// Resolve the flattened layer order without merging
pub fn resolve_layers<S: LayerStore>(
    project_dir: &Path,
    store: &S,
) -> Result<Vec<ResolvedLayer>> {
    Resolver::new(store).resolve(project_dir)
}
