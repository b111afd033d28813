//! Effective configuration emission
//!
//! The emitter validates the folded accumulator and freezes it into an
//! [`EffectiveConfig`]: created once per composition, shared read-only by
//! every downstream consumer, never mutated after emission. Later overrides
//! (the environment overlay) produce derived views instead.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::{Result, invalid_effective};
use crate::fragment::BuildOptions;
use crate::merge::MergedConfig;

/// Build targets the orchestrator understands
///
/// `esnext` means emit without down-level transpilation.
pub const RECOGNIZED_TARGETS: &[&str] = &[
    "es2015", "es2016", "es2017", "es2018", "es2019", "es2020", "es2021", "es2022", "esnext",
];

/// The fully merged, immutable configuration
///
/// Fields are private; consumers read through the accessors and cannot
/// write back. Structural equality backs the idempotence guarantee: two
/// compositions of the same inputs emit equal values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    stylesheets: Vec<String>,
    build: BuildOptions,
    runtime: EffectiveRuntime,
    prebundle: Vec<String>,
}

/// Runtime defaults of the emitted configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EffectiveRuntime {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub public: BTreeMap<String, JsonValue>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub private: BTreeMap<String, JsonValue>,
}

impl EffectiveConfig {
    /// Validate the folded accumulator and emit the immutable result
    ///
    /// Emission is idempotent: re-running composition on the same inputs
    /// yields a structurally equal value.
    pub fn emit(merged: MergedConfig) -> Result<Self> {
        if let Some(ref target) = merged.build.target {
            if !RECOGNIZED_TARGETS.contains(&target.as_str()) {
                return Err(invalid_effective(
                    "build.target",
                    format!(
                        "unrecognized target '{}' (expected one of: {})",
                        target,
                        RECOGNIZED_TARGETS.join(", ")
                    ),
                ));
            }
        }

        Ok(Self {
            stylesheets: merged.stylesheets,
            build: merged.build,
            runtime: EffectiveRuntime {
                public: merged.runtime.public,
                private: merged.runtime.private,
            },
            prebundle: merged.prebundle.into_iter().collect(),
        })
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn build(&self) -> &BuildOptions {
        &self.build
    }

    pub fn runtime_public(&self) -> &BTreeMap<String, JsonValue> {
        &self.runtime.public
    }

    pub fn runtime_private(&self) -> &BTreeMap<String, JsonValue> {
        &self.runtime.private
    }

    /// Prebundle dependencies, duplicate-free in lexical order
    pub fn prebundle(&self) -> &[String] {
        &self.prebundle
    }

    /// Stable content digest of the canonical JSON form
    ///
    /// Equal configurations share a digest, so callers can key composition
    /// caches on it.
    pub fn digest(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self)?;
        Ok(format!("blake3:{}", blake3::hash(&canonical).to_hex()))
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
