//! Remote layer cache directory
//!
//! Remote checkouts are pinned to a version tag, so a cache entry never
//! goes stale and is reused as-is on later compositions.

use std::path::PathBuf;

use crate::error::Result;

/// Environment variable overriding the cache location (used by tests)
pub const CACHE_DIR_ENV: &str = "LAMINA_CACHE_DIR";

/// Root directory for cached remote layer checkouts
pub fn layers_cache_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir).join("layers"));
        }
    }

    let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
    Ok(base.join("lamina").join("layers"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cache_dir_env_override() {
        unsafe { std::env::set_var(CACHE_DIR_ENV, "/tmp/lamina-test-cache") };
        let dir = layers_cache_dir().unwrap();
        unsafe { std::env::remove_var(CACHE_DIR_ENV) };
        assert_eq!(dir, PathBuf::from("/tmp/lamina-test-cache/layers"));
    }

    #[test]
    #[serial]
    fn test_cache_dir_default_ends_with_layers() {
        unsafe { std::env::remove_var(CACHE_DIR_ENV) };
        let dir = layers_cache_dir().unwrap();
        assert!(dir.ends_with("lamina/layers"));
    }
}
