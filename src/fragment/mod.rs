//! Layer fragment configuration (lamina.yaml)
//!
//! A fragment is the parsed contents of one layer before merging. The
//! schema is closed: unknown sections and unknown build-option keys are
//! rejected instead of being passed through silently.
//!
//! ```yaml
//! extends:
//!   - ../layers/base
//! stylesheets:
//!   - ~/assets/css/colors.css
//! build:
//!   target: esnext
//!   define:
//!     __VUE_OPTIONS_API__: true
//! runtime:
//!   public:
//!     siteUrl: ""
//!   private:
//!     apiSecret: ""
//! prebundle:
//!   - zod
//!   - klona
//! ```

pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Result, malformed_fragment};
use crate::source::ExtendEntry;

pub use loader::load_fragment;

/// Name of the fragment file inside each layer directory
pub const FRAGMENT_FILE: &str = "lamina.yaml";

/// Compiler/bundler options, one named key per recognized option
///
/// Scalars follow later-wins on merge; `define` entries are deep-merged
/// key-by-key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildOptions {
    /// Emit target, validated against the enumerated esbuild targets at
    /// emission time (`esnext` means no down-level transpilation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,

    /// Compile-time constant replacements injected by the bundler
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub define: BTreeMap<String, JsonValue>,
}

impl BuildOptions {
    /// Check whether no option is set
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
            && self.sourcemap.is_none()
            && self.minify.is_none()
            && self.define.is_empty()
    }
}

/// Runtime configuration defaults, partitioned into public and private keys
///
/// Only `public` keys are overridable from the process environment at
/// startup; `private` keys never leave the server side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeDefaults {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub public: BTreeMap<String, JsonValue>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub private: BTreeMap<String, JsonValue>,
}

impl RuntimeDefaults {
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.private.is_empty()
    }
}

/// Parsed contents of one layer's lamina.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFragment {
    /// Layers this fragment inherits from, base-most first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<ExtendEntry>,

    /// Stylesheet asset paths, in load order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stylesheets: Vec<String>,

    /// Compiler/bundler options
    #[serde(default, skip_serializing_if = "BuildOptions::is_empty")]
    pub build: BuildOptions,

    /// Runtime configuration defaults
    #[serde(default, skip_serializing_if = "RuntimeDefaults::is_empty")]
    pub runtime: RuntimeDefaults,

    /// Packages to prebundle during development
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prebundle: Vec<String>,
}

impl ConfigFragment {
    /// Parse a fragment from a YAML string
    ///
    /// `origin` names the file in error messages.
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self> {
        let fragment: Self = serde_yaml::from_str(yaml)
            .map_err(|e| malformed_fragment(origin, e.to_string()))?;
        fragment.validate(origin)?;
        Ok(fragment)
    }

    /// Validate fragment-local invariants
    ///
    /// Duplicates across fragments are fine (the merge deduplicates them);
    /// duplicates within one fragment are an authoring error.
    pub fn validate(&self, origin: &str) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for dep in &self.prebundle {
            if !seen.insert(dep.as_str()) {
                return Err(malformed_fragment(
                    origin,
                    format!("duplicate prebundle entry '{dep}'"),
                ));
            }
        }
        Ok(())
    }
}
