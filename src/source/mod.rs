//! Layer reference handling
//!
//! This module parses the entries of a fragment's `extends` list into
//! [`LayerRef`] values:
//! - Local directory paths: `./layers/base`, `../shared-layer`
//! - Remote git sources: `gh:owner/repo/layers/tairo#v1.4.0`,
//!   `https://host/owner/repo.git#v1.0.0`, `git@host:owner/repo.git#v2`
//! - Detailed mapping form: `{ source: "gh:owner/repo#v1.4.0", auth: TOKEN }`
//!
//! Remote refs must carry a version tag; a remote ref without one is
//! rejected with `InvalidVersion` before any fetch is attempted.
//!
//! ## Module Organization
//!
//! - `layer_ref.rs`: LayerRef enum, extends-entry forms and parsing
//! - `remote.rs`: RemoteSource struct and URL/shorthand parsing

pub mod layer_ref;
pub mod remote;

pub use layer_ref::{ExtendEntry, LayerRef};
pub use remote::RemoteSource;
