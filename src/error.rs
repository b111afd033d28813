//! Error types and handling for Lamina
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Every composition failure is terminal: lamina never retries a fetch and
//! never emits a partial effective configuration. Each variant carries enough
//! context to locate the offending layer and field.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Lamina operations
#[derive(Error, Diagnostic, Debug)]
pub enum LaminaError {
    // Layer resolution errors
    #[error("Unresolved layer '{layer}': {reason}")]
    #[diagnostic(
        code(lamina::layer::unresolved),
        help("Check that the layer path exists or that the remote source is reachable")
    )]
    UnresolvedLayer { layer: String, reason: String },

    #[error("Invalid version for layer '{layer}': {reason}")]
    #[diagnostic(
        code(lamina::layer::invalid_version),
        help("Remote layers require a version tag, e.g. gh:owner/repo/layers/base#v1.4.0")
    )]
    InvalidVersion { layer: String, reason: String },

    #[error("Cyclic layer reference: {chain}")]
    #[diagnostic(
        code(lamina::layer::cycle),
        help("Remove the cycle from the extends chain of your layers")
    )]
    CyclicLayerReference { chain: String },

    // Fragment errors
    #[error("Malformed fragment at '{path}': {reason}")]
    #[diagnostic(
        code(lamina::fragment::malformed),
        help("Check the lamina.yaml sections: extends, stylesheets, build, runtime, prebundle")
    )]
    MalformedFragment { path: String, reason: String },

    // Effective config errors
    #[error("Invalid effective configuration: field '{field}': {reason}")]
    #[diagnostic(code(lamina::effective::invalid))]
    InvalidEffectiveConfig { field: String, reason: String },

    // Layer ref parsing errors
    #[error("Invalid layer reference: {input}")]
    #[diagnostic(
        code(lamina::source::invalid_ref),
        help("Valid formats: ./path, gh:owner/repo/sub/path#v1.0.0, https://host/repo.git#v1.0.0")
    )]
    InvalidLayerRef { input: String, reason: String },

    // Remote transport errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(lamina::git::operation_failed))]
    GitOperationFailed { message: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(lamina::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(lamina::fs::io_error))]
    IoError { message: String },
}

/// Build an `UnresolvedLayer` error
pub fn unresolved_layer(layer: impl Into<String>, reason: impl Into<String>) -> LaminaError {
    LaminaError::UnresolvedLayer {
        layer: layer.into(),
        reason: reason.into(),
    }
}

/// Build an `InvalidVersion` error
pub fn invalid_version(layer: impl Into<String>, reason: impl Into<String>) -> LaminaError {
    LaminaError::InvalidVersion {
        layer: layer.into(),
        reason: reason.into(),
    }
}

/// Build a `CyclicLayerReference` error from the active resolution chain
pub fn cyclic_reference(chain: &[String]) -> LaminaError {
    LaminaError::CyclicLayerReference {
        chain: chain.join(" -> "),
    }
}

/// Build a `MalformedFragment` error
pub fn malformed_fragment(path: impl Into<String>, reason: impl Into<String>) -> LaminaError {
    LaminaError::MalformedFragment {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Build an `InvalidEffectiveConfig` error naming the offending field
pub fn invalid_effective(field: impl Into<String>, reason: impl Into<String>) -> LaminaError {
    LaminaError::InvalidEffectiveConfig {
        field: field.into(),
        reason: reason.into(),
    }
}

impl From<std::io::Error> for LaminaError {
    fn from(err: std::io::Error) -> Self {
        LaminaError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for LaminaError {
    fn from(err: serde_yaml::Error) -> Self {
        LaminaError::MalformedFragment {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LaminaError {
    fn from(err: serde_json::Error) -> Self {
        LaminaError::MalformedFragment {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for LaminaError {
    fn from(err: git2::Error) -> Self {
        LaminaError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LaminaError>;
