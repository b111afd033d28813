//! Command implementations

pub mod completions;
pub mod compose;
pub mod env;
pub mod layers;
pub mod version;

use std::path::PathBuf;

use crate::error::{LaminaError, Result};

/// Project directory from the CLI argument or the current directory
pub fn project_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| LaminaError::IoError {
            message: format!("Failed to get current directory: {}", e),
        }),
    }
}
