//! Common test utilities for Lamina integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test project with a stack of layer directories
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a layer directory with a fragment file
    pub fn write_layer(&self, rel: &str, fragment_yaml: &str) -> PathBuf {
        let layer_dir = self.path.join(rel);
        std::fs::create_dir_all(&layer_dir).expect("Failed to create layer directory");
        std::fs::write(layer_dir.join("lamina.yaml"), fragment_yaml)
            .expect("Failed to write fragment file");
        layer_dir
    }

    /// Create a layer directory without a fragment file
    pub fn create_dir(&self, rel: &str) -> PathBuf {
        let dir = self.path.join(rel);
        std::fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Path of a directory under the project root
    pub fn layer_path(&self, rel: &str) -> PathBuf {
        self.path.join(rel)
    }
}
